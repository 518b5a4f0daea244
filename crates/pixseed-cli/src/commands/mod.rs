//! CLI command implementations

pub mod clean;
pub mod fetch;
pub mod list;
pub mod providers;

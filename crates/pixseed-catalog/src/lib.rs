//! Pixseed Catalog - ordered table of placeholder assets to acquire
//!
//! The catalog is pure data: an ordered, duplicate-free sequence of
//! `AssetSpec` records loaded once at startup, either from the built-in
//! website image table or from a `[[asset]]` TOML file.

mod catalog;
mod spec;

pub use catalog::AssetCatalog;
pub use spec::AssetSpec;

//! Pixseed Core - Foundational types for pixseed
//!
//! This crate provides the types that all other pixseed crates depend on:
//! - `ContentHash` - SHA-256 based content hashing for acquired files
//! - Error types and Result alias

mod error;
mod hash;

pub use error::{PixseedError, Result};
pub use hash::ContentHash;

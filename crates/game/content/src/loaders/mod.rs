//! Content loaders for reading game data from files.
//!
//! Every loader has a `load(path)` for override files and a `builtin()` that
//! parses the copy embedded in the binary.

pub mod config;
pub mod factory;
pub mod species;
pub mod worlds;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use species::SpeciesLoader;
pub use worlds::WorldLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

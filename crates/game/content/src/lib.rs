//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Species roster (data-driven via RON)
//! - Campaign worlds (data-driven via RON)
//! - Battle tuning (data-driven via TOML)
//!
//! The shipped files are embedded, so a data directory is only needed for
//! overrides. Content is consumed by the runtime and never appears in battle
//! state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Roster, WorldInfo, WorldMap};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, LoadResult, SpeciesLoader, WorldLoader,
};

//! Data-driven battle content and loaders.
//!
//! This crate houses the authored content a battle is built from and the
//! loaders that read it from RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Player and enemy templates (data-driven via RON)
//! - Battle tuning (data-driven via TOML)
//!
//! Content is consumed by the runtime's combatant provider and never appears
//! in a running battle except as cloned items and spawned combatants.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, CatalogError};

#[cfg(feature = "loaders")]
pub use loaders::{ActorCatalog, ActorLoader, ConfigLoader, ContentFactory, ItemCatalog, ItemLoader};

//! Data-driven effect content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Effect catalogs (named `EffectSpec`s, data-driven via RON)
//! - Scenarios replaying effect applications (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! All loaders use effect-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EffectCatalog, EffectCatalogLoader, LoadResult, Scenario,
    ScenarioLoader, ScenarioStep, ScenarioTarget,
};

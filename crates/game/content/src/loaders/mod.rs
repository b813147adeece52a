//! Content loaders for reading effect data from files.

pub mod config;
pub mod effects;
pub mod factory;
pub mod scenario;

pub use config::ConfigLoader;
pub use effects::{EffectCatalog, EffectCatalogLoader};
pub use factory::ContentFactory;
pub use scenario::{Scenario, ScenarioLoader, ScenarioStep, ScenarioTarget};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// RON options shared by all loaders.
///
/// `implicit_some` lets optional fields be written without `Some(...)`,
/// which keeps effect data close to the automation format.
pub(crate) fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

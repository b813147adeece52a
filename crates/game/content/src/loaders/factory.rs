//! Content factory for loading effect data from a data directory.

use std::path::{Path, PathBuf};

use effect_core::EffectConfig;

use crate::loaders::{
    ConfigLoader, EffectCatalog, EffectCatalogLoader, LoadResult, Scenario, ScenarioLoader,
};

/// Content factory that loads all effect content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── effects.ron
/// └── scenarios/
///     └── poison.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<EffectConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EffectConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the effect catalog from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<EffectCatalog> {
        let path = self.data_dir.join("effects.ron");
        EffectCatalogLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }
}

//! Effect engine configuration loader.

use std::path::Path;

use effect_core::EffectConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for effect configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EffectConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EffectConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectConfig> {
        let config: EffectConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

//! CLI configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// Configuration required to replay a scenario.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            scenario: Self::DEFAULT_SCENARIO.to_string(),
        }
    }
}

impl CliConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";
    pub const DEFAULT_SCENARIO: &'static str = "poison";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EFFECT_DATA_DIR` - Directory holding `effects.ron` and `scenarios/` (default: `data`)
    /// - `EFFECT_SCENARIO` - Scenario name under `scenarios/` (default: `poison`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("EFFECT_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(scenario) = read_env::<String>("EFFECT_SCENARIO").filter(|s| !s.is_empty()) {
            config.scenario = scenario;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

//! Runtime configuration shared by automation steps.

use effect_core::EffectConfig;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub effect: EffectConfig,
    /// Caller argument that overrides effect durations (`-dur 5`).
    pub duration_arg: String,
}

impl RuntimeConfig {
    pub const DEFAULT_DURATION_ARG: &'static str = "dur";

    pub fn with_effect_config(effect: EffectConfig) -> Self {
        Self {
            effect,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            effect: EffectConfig::default(),
            duration_arg: Self::DEFAULT_DURATION_ARG.to_string(),
        }
    }
}

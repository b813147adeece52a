//! Duplicate-name handling for stacking effects.

use tracing::debug;

use super::EffectSpec;
use crate::config::EffectConfig;
use crate::state::{Effect, EffectId};

/// Converts a duplicate stacking effect into a renamed, neutralized sibling.
///
/// Stacks are tracked as distinct effects (`Poison`, `Poison x2`, ...) but
/// only the original keeps a duration, description and concentration.
#[derive(Clone, Copy, Debug)]
pub struct StackResolver<'a> {
    config: &'a EffectConfig,
}

impl<'a> StackResolver<'a> {
    pub fn new(config: &'a EffectConfig) -> Self {
        Self { config }
    }

    /// Name of the `index`-th stack of `base`.
    pub fn stacked_name(base: &str, index: u32) -> String {
        format!("{} x{}", base, index)
    }

    /// Applies stacking to `effect` and returns the matched original.
    ///
    /// `lookup` performs a strict (exact, case-sensitive) name lookup on the
    /// target's attached effects. Returns `None` and leaves the effect
    /// untouched when `spec.stacking` is off or no effect of the same name
    /// exists.
    pub fn apply<F>(&self, effect: &mut Effect, spec: &EffectSpec, mut lookup: F) -> Option<EffectId>
    where
        F: FnMut(&str) -> Option<EffectId>,
    {
        if !spec.stacking {
            return None;
        }
        let original = lookup(&effect.name)?;

        effect.neutralize();
        let base = std::mem::take(&mut effect.name);
        let mut index = self.config.first_stack_index;
        let mut name = Self::stacked_name(&base, index);
        while lookup(&name).is_some() {
            index += 1;
            name = Self::stacked_name(&base, index);
        }

        debug!(
            target: "effect::stacking",
            original = %original,
            name = %name,
            "stacked duplicate effect"
        );
        effect.name = name;
        Some(original)
    }
}

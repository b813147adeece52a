//! Runtime inputs of one effect resolution.

use super::MetaVars;
use crate::state::{CombatantId, EffectId};

/// Where the resolved effect will go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetContext {
    /// A live combatant; the effect is attached to it.
    Combatant(CombatantId),
    /// No combatant representation; the effect is built but never attached.
    Detached,
}

impl TargetContext {
    pub fn combatant(&self) -> Option<CombatantId> {
        match self {
            Self::Combatant(id) => Some(*id),
            Self::Detached => None,
        }
    }
}

/// Everything besides the [`EffectSpec`](super::EffectSpec) that resolution depends on.
///
/// The caster's concentration effect is passed explicitly instead of being
/// read from shared state.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionContext<'a> {
    pub caster: CombatantId,
    /// `None` when the step runs outside of any target context.
    pub target: Option<TargetContext>,
    /// Concentration effect the caster is currently maintaining.
    pub concentration: Option<EffectId>,
    pub vars: &'a MetaVars,
    /// Caller-supplied duration that wins over the authored one.
    pub duration_override: Option<i32>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(caster: CombatantId, target: TargetContext, vars: &'a MetaVars) -> Self {
        Self {
            caster,
            target: Some(target),
            concentration: None,
            vars,
            duration_override: None,
        }
    }

    #[must_use]
    pub fn with_concentration(mut self, concentration: Option<EffectId>) -> Self {
        self.concentration = concentration;
        self
    }

    #[must_use]
    pub fn with_duration_override(mut self, duration: Option<i32>) -> Self {
        self.duration_override = duration;
        self
    }

    #[must_use]
    pub fn without_target(mut self) -> Self {
        self.target = None;
        self
    }
}

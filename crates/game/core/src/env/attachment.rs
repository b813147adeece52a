//! Boundary with the combat registry that stores effect collections.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, Effect, EffectId};

/// Outcome of committing an effect to a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Arena id assigned to the new effect.
    pub id: EffectId,
    /// Effects evicted by this attachment (e.g. a broken concentration effect).
    pub conc_conflict: Vec<Effect>,
}

/// Errors raised by an [`AttachmentPort`] while committing an effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("combatant {0} is not part of this combat")]
    UnknownCombatant(CombatantId),
}

impl GameError for AttachError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCombatant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCombatant(_) => "ATTACH_UNKNOWN_COMBATANT",
        }
    }
}

/// Effect collections of the combatants taking part in a combat.
///
/// Implementations own cascade removal and concentration eviction; the
/// attachment protocol only queries names and commits finished effects.
pub trait AttachmentPort {
    /// Finds an effect on `target` by name.
    ///
    /// With `strict`, names must match exactly (case-sensitive). Otherwise the
    /// first effect whose name starts with `name`, ignoring case, is returned.
    fn find_effect(&self, target: CombatantId, name: &str, strict: bool) -> Option<EffectId>;

    /// Returns true if `target` carries an effect called `name`.
    fn has_effect(&self, target: CombatantId, name: &str, strict: bool) -> bool {
        self.find_effect(target, name, strict).is_some()
    }

    /// Looks up an attached effect.
    fn effect(&self, id: EffectId) -> Option<&Effect>;

    /// Combatant currently carrying the effect, if it is still attached.
    fn owner_of(&self, id: EffectId) -> Option<CombatantId> {
        self.effect(id).and_then(|effect| effect.owner)
    }

    /// Commits `effect` to `target` and reports evicted effects.
    fn add_effect(&mut self, target: CombatantId, effect: Effect)
    -> Result<Attachment, AttachError>;
}

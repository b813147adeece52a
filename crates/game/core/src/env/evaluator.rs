//! Boundary with the rule-expression evaluator.

use crate::effect::{AttackTemplate, ButtonTemplate, PassiveTemplate};
use crate::state::{AttackInteraction, ButtonInteraction, PassiveEffects};

/// Failure reported by an [`Evaluator`].
///
/// Never crosses the attachment protocol boundary: the factory rewraps it
/// into an [`EffectError`](crate::effect::EffectError).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("could not parse `{expression}`: {reason}")]
    Syntax { expression: String, reason: String },

    #[error("`{0}` is not defined")]
    UnknownName(String),

    #[error("`{expression}` did not evaluate to an integer")]
    NotAnInteger { expression: String },

    #[error("division by zero in `{0}`")]
    DivisionByZero(String),
}

/// Turns user-authored automation text into concrete values.
///
/// Only [`eval_int`](Evaluator::eval_int) and
/// [`annotate`](Evaluator::annotate) are required; payload resolution
/// defaults to annotating every string of the template.
pub trait Evaluator {
    /// Evaluates an integer expression such as `"1 + level"`.
    fn eval_int(&self, expression: &str) -> Result<i64, EvaluationError>;

    /// Replaces embedded references (e.g. `{caster_level}`) in free text.
    fn annotate(&self, text: &str) -> Result<String, EvaluationError>;

    fn resolve_passive(&self, template: &PassiveTemplate) -> Result<PassiveEffects, EvaluationError> {
        let modifiers = template
            .modifiers
            .iter()
            .map(|(key, value)| Ok((key.clone(), self.annotate(value)?)))
            .collect::<Result<_, EvaluationError>>()?;
        Ok(PassiveEffects { modifiers })
    }

    fn resolve_attack(&self, template: &AttackTemplate) -> Result<AttackInteraction, EvaluationError> {
        let eval_opt = |expr: &Option<String>| expr.as_deref().map(|e| self.eval_int(e)).transpose();
        Ok(AttackInteraction {
            attack: self.annotate(&template.attack)?,
            dc: eval_opt(&template.dc)?,
            attack_bonus: eval_opt(&template.attack_bonus)?,
            casting_mod: eval_opt(&template.casting_mod)?,
        })
    }

    fn resolve_button(&self, template: &ButtonTemplate) -> Result<ButtonInteraction, EvaluationError> {
        Ok(ButtonInteraction {
            label: self.annotate(&template.label)?,
            verb: template.verb.as_deref().map(|v| self.annotate(v)).transpose()?,
            style: template.style.clone(),
        })
    }
}

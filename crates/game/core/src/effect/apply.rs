//! The effect construction and attachment protocol.

use tracing::{debug, info};

use super::{
    EffectError, EffectFactory, EffectSpec, ParentCandidates, ParentResolver, ParentSource,
    ResolutionContext, StackResolver, TargetContext,
};
use crate::env::{AttachmentPort, Evaluator};
use crate::state::{Effect, EffectId};

/// Result of applying one effect spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedEffect {
    /// The effect as attached (or the detached template).
    pub effect: Effect,
    /// Arena id; `None` in detached mode.
    pub id: Option<EffectId>,
    /// Effects evicted by the attachment; always empty in detached mode.
    pub conc_conflict: Vec<Effect>,
    /// Which candidate became the parent, if any.
    pub parent_source: Option<ParentSource>,
}

impl AppliedEffect {
    pub fn is_attached(&self) -> bool {
        self.id.is_some()
    }
}

/// Resolves `spec` and attaches the result to the target in `ctx`.
///
/// Steps, in order: factory resolution, self-concentration guard, stacking,
/// explicit parent lookup, parent selection, attachment. Attachment is last,
/// so a failing call leaves the port untouched.
///
/// # Errors
///
/// - `MissingTarget` if `ctx` has no target context at all
/// - `DurationResolution` / `Automation` from the factory
/// - `InvalidArgument` for a bad parent variable or self-concentration
/// - `Attach` if the port rejects the target
pub fn apply_effect<P: AttachmentPort + ?Sized>(
    spec: &EffectSpec,
    ctx: &ResolutionContext<'_>,
    factory: &EffectFactory,
    evaluator: &dyn Evaluator,
    port: &mut P,
) -> Result<AppliedEffect, EffectError> {
    let target = ctx.target.ok_or(EffectError::MissingTarget)?;
    let mut effect = factory.resolve(spec, ctx, evaluator)?;

    let target = match target {
        TargetContext::Combatant(id) => id,
        TargetContext::Detached => {
            debug!(
                target: "effect::apply",
                effect = %effect.name,
                "no combatant for target, effect left detached"
            );
            return Ok(AppliedEffect {
                effect,
                id: None,
                conc_conflict: Vec::new(),
                parent_source: None,
            });
        }
    };

    let concentration = ParentResolver::concentration_candidate(
        ctx.concentration,
        spec.concentration,
        target,
        ctx.caster,
        &*port,
    )?;
    let stack = StackResolver::new(factory.config())
        .apply(&mut effect, spec, |name| port.find_effect(target, name, true));
    let explicit = ParentResolver::explicit_candidate(spec.parent.as_deref(), ctx.vars)?;

    let candidates = ParentCandidates {
        stack,
        explicit,
        concentration,
    };
    let parent_source = ParentResolver::select(&candidates).map(|(parent, source)| {
        effect.parent = Some(parent);
        source
    });

    let attachment = port.add_effect(target, effect)?;
    let effect = port
        .effect(attachment.id)
        .cloned()
        .ok_or_else(|| EffectError::Automation(format!("{} vanished on attach", attachment.id)))?;

    info!(
        target: "effect::apply",
        effect = %effect.name,
        id = %attachment.id,
        combatant = %target,
        parent = ?effect.parent,
        parent_source = parent_source.map(<&'static str>::from),
        dropped = attachment.conc_conflict.len(),
        "effect attached"
    );

    Ok(AppliedEffect {
        effect,
        id: Some(attachment.id),
        conc_conflict: attachment.conc_conflict,
        parent_source,
    })
}

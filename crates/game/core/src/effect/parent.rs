//! Parent selection for a newly created effect.
//!
//! Three mutually exclusive candidates are considered, highest priority
//! first: the stacking original, an explicitly referenced effect, and the
//! caster's active concentration effect. At most one is applied.

use tracing::debug;

use super::{EffectRef, InvalidArgument, MetaVars};
use crate::env::AttachmentPort;
use crate::state::{CombatantId, EffectId};

/// Which candidate became the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParentSource {
    Stack,
    Explicit,
    Concentration,
}

/// Parent candidates gathered during resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParentCandidates {
    pub stack: Option<EffectId>,
    pub explicit: Option<EffectId>,
    pub concentration: Option<EffectId>,
}

impl ParentCandidates {
    /// Candidates in priority order, highest first.
    pub fn ordered(&self) -> [(ParentSource, Option<EffectId>); 3] {
        [
            (ParentSource::Stack, self.stack),
            (ParentSource::Explicit, self.explicit),
            (ParentSource::Concentration, self.concentration),
        ]
    }
}

/// Pure decision logic for parent selection.
pub struct ParentResolver;

impl ParentResolver {
    /// Picks the first present candidate in priority order.
    pub fn select(candidates: &ParentCandidates) -> Option<(EffectId, ParentSource)> {
        candidates
            .ordered()
            .into_iter()
            .find_map(|(source, id)| id.map(|id| (id, source)))
    }

    /// Resolves the `parent` variable of a spec.
    ///
    /// An unset or unknown variable is not an error; the parent is simply not
    /// set through this path. A proxy to a detached effect resolves to
    /// nothing, since detached effects never enter the arena.
    ///
    /// # Errors
    ///
    /// `ParentNotEffect` if the variable holds anything but an effect proxy.
    pub fn explicit_candidate(
        parent_var: Option<&str>,
        vars: &MetaVars,
    ) -> Result<Option<EffectId>, InvalidArgument> {
        let Some((variable, value)) = parent_var.and_then(|v| vars.get(v).map(|value| (v, value)))
        else {
            return Ok(None);
        };
        let proxy = value
            .as_effect()
            .ok_or_else(|| InvalidArgument::ParentNotEffect {
                variable: variable.to_string(),
                found: value.kind(),
            })?;

        match proxy.handle() {
            EffectRef::Attached(id) => Ok(Some(*id)),
            EffectRef::Detached(effect) => {
                debug!(
                    target: "effect::parent",
                    variable,
                    effect = %effect.name,
                    "explicit parent refers to a detached effect, ignoring"
                );
                Ok(None)
            }
        }
    }

    /// Returns the caster's concentration effect as a candidate.
    ///
    /// # Errors
    ///
    /// `SelfConcentration` if a concentration effect is active, the new
    /// effect requires concentration, and it would be attached to the
    /// combatant maintaining that concentration.
    pub fn concentration_candidate<P: AttachmentPort + ?Sized>(
        concentration: Option<EffectId>,
        requires_concentration: bool,
        target: CombatantId,
        caster: CombatantId,
        port: &P,
    ) -> Result<Option<EffectId>, InvalidArgument> {
        let Some(conc) = concentration else {
            return Ok(None);
        };
        let holder = port.owner_of(conc).unwrap_or(caster);
        if requires_concentration && holder == target {
            return Err(InvalidArgument::SelfConcentration);
        }
        Ok(Some(conc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectProxy, MetaVar};
    use crate::state::{Combat, Effect};

    const STACK: EffectId = EffectId(1);
    const EXPLICIT: EffectId = EffectId(2);
    const CONC: EffectId = EffectId(3);

    #[test]
    fn priority_is_stack_then_explicit_then_concentration() {
        let all = ParentCandidates {
            stack: Some(STACK),
            explicit: Some(EXPLICIT),
            concentration: Some(CONC),
        };
        assert_eq!(ParentResolver::select(&all), Some((STACK, ParentSource::Stack)));

        let no_stack = ParentCandidates { stack: None, ..all };
        assert_eq!(
            ParentResolver::select(&no_stack),
            Some((EXPLICIT, ParentSource::Explicit))
        );

        let conc_only = ParentCandidates {
            concentration: Some(CONC),
            ..Default::default()
        };
        assert_eq!(
            ParentResolver::select(&conc_only),
            Some((CONC, ParentSource::Concentration))
        );

        assert_eq!(ParentResolver::select(&ParentCandidates::default()), None);
    }

    #[test]
    fn explicit_candidate_from_proxy() {
        let mut vars = MetaVars::new();
        vars.insert("bless", EffectProxy::attached(EXPLICIT));
        assert_eq!(
            ParentResolver::explicit_candidate(Some("bless"), &vars),
            Ok(Some(EXPLICIT))
        );
        assert_eq!(ParentResolver::explicit_candidate(Some("missing"), &vars), Ok(None));
        assert_eq!(ParentResolver::explicit_candidate(None, &vars), Ok(None));
    }

    #[test]
    fn explicit_candidate_rejects_non_proxy() {
        let mut vars = MetaVars::new();
        vars.insert("bless", MetaVar::Int(3));
        assert_eq!(
            ParentResolver::explicit_candidate(Some("bless"), &vars),
            Err(InvalidArgument::ParentNotEffect {
                variable: "bless".into(),
                found: "int",
            })
        );
    }

    #[test]
    fn detached_proxy_is_not_a_candidate() {
        let mut vars = MetaVars::new();
        vars.insert("preview", EffectProxy::detached(Effect::new("Bless", 10)));
        assert_eq!(ParentResolver::explicit_candidate(Some("preview"), &vars), Ok(None));
    }

    #[test]
    fn concentration_guard_blocks_self_target() {
        let mut combat = Combat::new();
        let caster = combat.add_combatant("Cleric");
        let ally = combat.add_combatant("Fighter");
        let conc = combat
            .add_effect(caster, Effect::new("Bless", 10).with_concentration(true))
            .unwrap()
            .id;

        assert_eq!(
            ParentResolver::concentration_candidate(Some(conc), true, caster, caster, &combat),
            Err(InvalidArgument::SelfConcentration)
        );
        assert_eq!(
            ParentResolver::concentration_candidate(Some(conc), true, ally, caster, &combat),
            Ok(Some(conc))
        );
        assert_eq!(
            ParentResolver::concentration_candidate(Some(conc), false, caster, caster, &combat),
            Ok(Some(conc))
        );
        assert_eq!(
            ParentResolver::concentration_candidate(None, true, caster, caster, &combat),
            Ok(None)
        );
    }
}

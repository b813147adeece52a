//! Turns an [`EffectSpec`] into a concrete, unattached [`Effect`].

use super::{DurationExpr, EffectError, EffectSpec, ResolutionContext};
use crate::config::EffectConfig;
use crate::env::Evaluator;
use crate::state::Effect;

/// Resolves durations, descriptions and payloads of effect specs.
///
/// Resolution is pure: nothing is attached and no shared state is touched.
#[derive(Clone, Debug, Default)]
pub struct EffectFactory {
    config: EffectConfig,
}

impl EffectFactory {
    pub fn new(config: EffectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Builds the effect described by `spec`.
    ///
    /// # Errors
    ///
    /// - `DurationResolution` if the duration expression is not an integer
    /// - `Automation` if the description or payload cannot be evaluated
    pub fn resolve(
        &self,
        spec: &EffectSpec,
        ctx: &ResolutionContext<'_>,
        evaluator: &dyn Evaluator,
    ) -> Result<Effect, EffectError> {
        let authored = self.resolve_duration(spec.duration.as_ref(), evaluator)?;
        let duration = ctx.duration_override.unwrap_or(authored);
        let description = self.resolve_description(spec.description.as_deref(), evaluator)?;

        let passive = match &spec.passive {
            Some(template) => evaluator.resolve_passive(template).map_err(automation)?,
            None => Default::default(),
        };
        let attacks = spec
            .attacks
            .iter()
            .map(|a| evaluator.resolve_attack(a).map_err(automation))
            .collect::<Result<Vec<_>, _>>()?;
        let buttons = spec
            .buttons
            .iter()
            .map(|b| evaluator.resolve_button(b).map_err(automation))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Effect::new(spec.name.clone(), duration)
            .with_description(description)
            .with_concentration(spec.concentration)
            .with_end_on_turn_end(spec.end_on_turn_end)
            .with_payload(passive, attacks, buttons))
    }

    /// Resolves the authored duration; an absent duration is indefinite.
    pub fn resolve_duration(
        &self,
        duration: Option<&DurationExpr>,
        evaluator: &dyn Evaluator,
    ) -> Result<i32, EffectError> {
        match duration {
            None => Ok(EffectConfig::INDEFINITE),
            Some(DurationExpr::Rounds(rounds)) => Ok(*rounds),
            Some(DurationExpr::Expression(expr)) => evaluator
                .eval_int(expr)
                .ok()
                .and_then(|value| i32::try_from(value).ok())
                .ok_or_else(|| EffectError::DurationResolution {
                    expression: expr.clone(),
                }),
        }
    }

    /// Annotates and truncates the authored description.
    pub fn resolve_description(
        &self,
        description: Option<&str>,
        evaluator: &dyn Evaluator,
    ) -> Result<Option<String>, EffectError> {
        match description.filter(|d| !d.is_empty()) {
            None => Ok(None),
            Some(text) => {
                let annotated = evaluator.annotate(text).map_err(automation)?;
                Ok(Some(self.config.truncate_description(annotated)))
            }
        }
    }
}

fn automation(err: crate::env::EvaluationError) -> EffectError {
    EffectError::Automation(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::testing::StubEvaluator;
    use crate::effect::{AttackTemplate, ButtonTemplate, MetaVars, PassiveTemplate, TargetContext};
    use crate::state::CombatantId;

    fn ctx(vars: &MetaVars) -> ResolutionContext<'_> {
        ResolutionContext::new(CombatantId(0), TargetContext::Detached, vars)
    }

    #[test]
    fn literal_and_expression_durations() {
        let factory = EffectFactory::default();
        let evaluator = StubEvaluator::default().with("level", 5);

        assert_eq!(
            factory.resolve_duration(Some(&DurationExpr::Rounds(3)), &evaluator),
            Ok(3)
        );
        assert_eq!(
            factory.resolve_duration(Some(&"level".into()), &evaluator),
            Ok(5)
        );
        assert_eq!(factory.resolve_duration(None, &evaluator), Ok(-1));
    }

    #[test]
    fn unresolvable_duration_names_expression() {
        let factory = EffectFactory::default();
        let err = factory
            .resolve_duration(Some(&"1d4".into()), &StubEvaluator::default())
            .unwrap_err();
        assert_eq!(
            err,
            EffectError::DurationResolution {
                expression: "1d4".into()
            }
        );
    }

    #[test]
    fn out_of_range_duration_is_rejected() {
        let factory = EffectFactory::default();
        let evaluator = StubEvaluator::default().with("huge", i64::MAX);
        assert!(matches!(
            factory.resolve_duration(Some(&"huge".into()), &evaluator),
            Err(EffectError::DurationResolution { .. })
        ));
    }

    #[test]
    fn override_wins_over_authored_duration() {
        let vars = MetaVars::new();
        let spec = EffectSpec::new("Poison").with_duration(3);
        let effect = EffectFactory::default()
            .resolve(
                &spec,
                &ctx(&vars).with_duration_override(Some(7)),
                &StubEvaluator::default(),
            )
            .unwrap();
        assert_eq!(effect.remaining, 7);

        // The authored expression is still validated.
        let broken = EffectSpec::new("Poison").with_duration("1d4");
        assert!(EffectFactory::default()
            .resolve(
                &broken,
                &ctx(&vars).with_duration_override(Some(7)),
                &StubEvaluator::default(),
            )
            .is_err());
    }

    #[test]
    fn description_is_annotated_then_truncated() {
        let factory = EffectFactory::default();
        let evaluator = StubEvaluator::default().with("dc", 15);

        let short = factory
            .resolve_description(Some("DC {dc} save"), &evaluator)
            .unwrap();
        assert_eq!(short.as_deref(), Some("DC 15 save"));

        let long = factory
            .resolve_description(Some(&"x".repeat(600)), &evaluator)
            .unwrap()
            .unwrap();
        assert_eq!(long.chars().count(), 503);
        assert!(long.ends_with("..."));

        let exact = "y".repeat(500);
        assert_eq!(
            factory.resolve_description(Some(&exact), &evaluator).unwrap(),
            Some(exact)
        );
        assert_eq!(factory.resolve_description(None, &evaluator), Ok(None));
        assert_eq!(factory.resolve_description(Some(""), &evaluator), Ok(None));
    }

    #[test]
    fn evaluator_failures_become_automation_errors() {
        let vars = MetaVars::new();
        let spec = EffectSpec::new("Hex").with_description("{broken}");
        let err = EffectFactory::default()
            .resolve(&spec, &ctx(&vars), &StubEvaluator::default())
            .unwrap_err();
        assert!(matches!(err, EffectError::Automation(_)));
    }

    #[test]
    fn payload_is_resolved_through_evaluator() {
        let vars = MetaVars::new();
        let evaluator = StubEvaluator::default().with("dc", 14).with("mod", 3);
        let mut passive = PassiveTemplate::default();
        passive
            .modifiers
            .insert("to_hit_bonus".into(), "{mod}".into());
        let spec = EffectSpec::new("Hunter's Mark")
            .with_duration(60)
            .with_passive(passive)
            .with_attack(AttackTemplate {
                attack: "Mark Strike".into(),
                dc: Some("dc".into()),
                attack_bonus: None,
                casting_mod: Some("mod".into()),
            })
            .with_button(ButtonTemplate {
                label: "Move Mark (+{mod})".into(),
                verb: None,
                style: Some("blurple".into()),
            });

        let effect = EffectFactory::default()
            .resolve(&spec, &ctx(&vars), &evaluator)
            .unwrap();

        assert_eq!(effect.passive.modifiers["to_hit_bonus"], "3");
        assert_eq!(effect.attacks[0].dc, Some(14));
        assert_eq!(effect.attacks[0].casting_mod, Some(3));
        assert_eq!(effect.buttons[0].label, "Move Mark (+3)");
        assert_eq!(effect.owner, None);
    }
}

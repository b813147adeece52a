//! Scenario loader.
//!
//! A scenario lists combatants and a sequence of effect applications that
//! share one variable table, which is how `save_as`/`parent` chains are
//! exercised from data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file, ron_options};

/// Where a scenario step sends its effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioTarget {
    /// A combatant by name.
    Combatant(String),
    /// Build the effect without attaching it.
    Detached,
}

/// One effect application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Combatant name of the caster.
    pub caster: String,
    /// `None` runs the step outside of any target context.
    #[serde(default)]
    pub target: Option<ScenarioTarget>,
    /// Catalog entry to apply.
    pub effect: String,
    /// Caller arguments, e.g. `[("dur", "5")]`.
    #[serde(default)]
    pub args: Vec<(String, String)>,
    /// Variable holding the caster's active concentration effect.
    #[serde(default)]
    pub concentration: Option<String>,
}

/// Scenario structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub combatants: Vec<String>,
    pub steps: Vec<ScenarioStep>,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON at {:?}: {}", path, e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron_options().from_str(content)?;
        Self::validate(&scenario)?;
        Ok(scenario)
    }

    /// Rejects steps naming combatants the scenario does not declare.
    fn validate(scenario: &Scenario) -> LoadResult<()> {
        let known = |name: &str| scenario.combatants.iter().any(|c| c == name);
        for (index, step) in scenario.steps.iter().enumerate() {
            if !known(&step.caster) {
                anyhow::bail!("step {}: unknown caster `{}`", index, step.caster);
            }
            if let Some(ScenarioTarget::Combatant(target)) = &step.target {
                if !known(target) {
                    anyhow::bail!("step {}: unknown target `{}`", index, target);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_with_defaults() {
        let scenario = ScenarioLoader::parse(
            r#"(
                combatants: ["Cleric", "Goblin"],
                steps: [
                    (caster: "Cleric", target: Some(Combatant("Goblin")), effect: "poison"),
                    (caster: "Cleric", target: Some(Detached), effect: "poison", args: [("dur", "5")]),
                    (caster: "Cleric", effect: "bless", concentration: Some("conc")),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(
            scenario.steps[0].target,
            Some(ScenarioTarget::Combatant("Goblin".into()))
        );
        assert_eq!(scenario.steps[1].args, vec![("dur".to_string(), "5".to_string())]);
        assert_eq!(scenario.steps[2].target, None);
        assert_eq!(scenario.steps[2].concentration.as_deref(), Some("conc"));
    }

    #[test]
    fn unknown_combatant_is_rejected() {
        let err = ScenarioLoader::parse(
            r#"(
                combatants: ["Cleric"],
                steps: [(caster: "Cleric", target: Some(Combatant("Orc")), effect: "poison")],
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown target `Orc`"));
    }
}

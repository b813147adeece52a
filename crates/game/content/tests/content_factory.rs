use std::fs;

use effect_content::{ContentFactory, ScenarioTarget};

fn write_data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("effects.ron"),
        r#"{ "poison": (name: "Poison", duration: 3, stacking: true) }"#,
    )
    .unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(
        dir.path().join("scenarios/poison.ron"),
        r#"(
            combatants: ["Cleric", "Goblin"],
            steps: [
                (caster: "Cleric", target: Some(Combatant("Goblin")), effect: "poison"),
                (caster: "Cleric", target: Some(Combatant("Goblin")), effect: "poison"),
            ],
        )"#,
    )
    .unwrap();
    dir
}

#[test]
fn loads_full_data_directory() {
    let dir = write_data_dir();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert_eq!(config, effect_core::EffectConfig::default());

    let effects = factory.load_effects().unwrap();
    assert_eq!(effects["poison"].name, "Poison");

    let scenario = factory.load_scenario("poison").unwrap();
    assert_eq!(scenario.steps.len(), 2);
    assert_eq!(
        scenario.steps[0].target,
        Some(ScenarioTarget::Combatant("Goblin".into()))
    );
}

#[test]
fn config_file_overrides_defaults() {
    let dir = write_data_dir();
    fs::write(dir.path().join("config.toml"), "truncation_marker = \"…\"\n").unwrap();

    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config.truncation_marker, "…");
    assert_eq!(config.description_limit, 500);
}

#[test]
fn missing_catalog_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load_effects().unwrap_err();
    assert!(err.to_string().contains("effects.ron"));
}

#[test]
fn bundled_data_directory_is_consistent() {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    let factory = ContentFactory::new(data_dir);

    let config = factory.load_config().unwrap();
    assert_eq!(config, effect_core::EffectConfig::default());

    let catalog = factory.load_effects().unwrap();
    let scenario = factory.load_scenario("poison").unwrap();
    for step in &scenario.steps {
        assert!(catalog.contains_key(&step.effect), "missing {}", step.effect);
    }
}

//! Effect catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use effect_core::EffectSpec;

use crate::loaders::{LoadResult, read_file, ron_options};

/// Named effect specs, keyed by catalog entry name.
///
/// File format: `{ "entry": (name: "...", duration: ..., ...) }`
///
/// Example:
/// ```ron
/// {
///     "poison": (name: "Poisoned", duration: 3, stacking: true),
///     "bless": (name: "Blessed", duration: "10", conc: true, save_as: "bless"),
/// }
/// ```
pub type EffectCatalog = BTreeMap<String, EffectSpec>;

/// Loader for effect catalogs from RON files.
pub struct EffectCatalogLoader;

impl EffectCatalogLoader {
    /// Load an effect catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<EffectCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON at {:?}: {}", path, e))
    }

    pub fn parse(content: &str) -> LoadResult<EffectCatalog> {
        let catalog: EffectCatalog = ron_options().from_str(content)?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_core::DurationExpr;

    #[test]
    fn parses_automation_field_names() {
        let catalog = EffectCatalogLoader::parse(
            r#"{
                "poison": (name: "Poisoned", duration: 3, stacking: true),
                "bless": (
                    name: "Blessed",
                    duration: "level",
                    conc: true,
                    end: true,
                    desc: "Add 1d4 to attacks",
                    effects: { "to_hit_bonus": "1d4" },
                    buttons: [(label: "Bless roll")],
                    save_as: "bless",
                    parent: "conc",
                ),
            }"#,
        )
        .unwrap();

        let poison = &catalog["poison"];
        assert_eq!(poison.duration, Some(DurationExpr::Rounds(3)));
        assert!(poison.stacking);
        assert!(poison.attacks.is_empty());

        let bless = &catalog["bless"];
        assert_eq!(bless.duration, Some(DurationExpr::Expression("level".into())));
        assert!(bless.concentration);
        assert!(bless.end_on_turn_end);
        assert_eq!(bless.description.as_deref(), Some("Add 1d4 to attacks"));
        assert_eq!(
            bless.passive.as_ref().unwrap().modifiers["to_hit_bonus"],
            "1d4"
        );
        assert_eq!(bless.buttons[0].label, "Bless roll");
        assert_eq!(bless.save_as.as_deref(), Some("bless"));
        assert_eq!(bless.parent.as_deref(), Some("conc"));
    }
}

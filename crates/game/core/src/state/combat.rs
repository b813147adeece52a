//! Reference combat registry: combatants plus an arena of attached effects.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use super::{CombatantId, Effect, EffectId};
use crate::env::{AttachError, Attachment, AttachmentPort};

/// A combat participant and the ids of the effects it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    /// Attached effects in attachment order.
    effects: Vec<EffectId>,
}

impl Combatant {
    fn new(id: CombatantId, name: String) -> Self {
        Self {
            id,
            name,
            effects: Vec::new(),
        }
    }

    pub fn effect_ids(&self) -> &[EffectId] {
        &self.effects
    }
}

/// Combat state owning every attached effect.
///
/// # Invariants
///
/// - Every id in a combatant's effect list resolves in `effects`
/// - `children[p]` contains `c` iff `effects[c].parent == Some(p)`
/// - Removing an effect removes all of its descendants
#[derive(Clone, Debug, Default)]
pub struct Combat {
    /// Sequential effect id allocator (never reused).
    next_effect_id: u64,
    combatants: Vec<Combatant>,
    effects: BTreeMap<EffectId, Effect>,
    children: BTreeMap<EffectId, BTreeSet<EffectId>>,
}

impl Combat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant and returns its id.
    pub fn add_combatant(&mut self, name: impl Into<String>) -> CombatantId {
        let id = CombatantId(self.combatants.len() as u32);
        self.combatants.push(Combatant::new(id, name.into()));
        id
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Finds a combatant by exact name.
    pub fn combatant_by_name(&self, name: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.name == name)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    /// Effects carried by a combatant, in attachment order.
    pub fn effects_of(&self, id: CombatantId) -> impl Iterator<Item = &Effect> + '_ {
        self.combatant(id)
            .into_iter()
            .flat_map(|c| c.effects.iter())
            .filter_map(|effect_id| self.effects.get(effect_id))
    }

    /// Direct children of an effect (e.g. stacked duplicates of it).
    pub fn children_of(&self, id: EffectId) -> impl Iterator<Item = &Effect> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|child| self.effects.get(child))
    }

    /// Total number of attached effects across all combatants.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Removes an effect and, recursively, all of its children.
    ///
    /// Returns every removed effect, the requested one first. Unknown ids
    /// yield an empty list.
    pub fn remove_effect(&mut self, id: EffectId) -> Vec<Effect> {
        let mut removed = Vec::new();
        let mut pending = vec![id];

        while let Some(next) = pending.pop() {
            let Some(effect) = self.effects.remove(&next) else {
                continue;
            };

            if let Some(siblings) = effect.parent.and_then(|p| self.children.get_mut(&p)) {
                siblings.remove(&next);
            }
            if let Some(owner) = effect.owner {
                if let Some(combatant) = self.combatants.iter_mut().find(|c| c.id == owner) {
                    combatant.effects.retain(|e| *e != next);
                }
            }
            if let Some(children) = self.children.remove(&next) {
                // Reverse so children are removed in ascending id order.
                pending.extend(children.into_iter().rev());
            }

            debug!(
                target: "effect::combat",
                effect = %next,
                name = %effect.name,
                "effect removed"
            );
            removed.push(effect);
        }

        removed
    }

    /// Ticks effects of `combatant` that decrement at the start of its turn.
    pub fn start_turn(&mut self, combatant: CombatantId) -> Vec<Effect> {
        self.tick(combatant, false)
    }

    /// Ticks effects of `combatant` that decrement at the end of its turn.
    pub fn end_turn(&mut self, combatant: CombatantId) -> Vec<Effect> {
        self.tick(combatant, true)
    }

    fn tick(&mut self, combatant: CombatantId, at_turn_end: bool) -> Vec<Effect> {
        let ids: Vec<EffectId> = self
            .combatant(combatant)
            .map(|c| c.effects.clone())
            .unwrap_or_default();

        let mut expired = Vec::new();
        for id in ids {
            let Some(effect) = self.effects.get_mut(&id) else {
                continue;
            };
            if effect.end_on_turn_end != at_turn_end || effect.is_indefinite() {
                continue;
            }
            if effect.remaining > 0 {
                effect.remaining -= 1;
            }
            if effect.remaining == 0 {
                expired.push(id);
            }
        }

        expired
            .into_iter()
            .flat_map(|id| self.remove_effect(id))
            .collect()
    }

    fn allocate_effect_id(&mut self) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        id
    }
}

impl AttachmentPort for Combat {
    fn find_effect(&self, target: CombatantId, name: &str, strict: bool) -> Option<EffectId> {
        let mut candidates = self.effects_of(target);
        let found = if strict {
            candidates.find(|effect| effect.name == name)
        } else {
            let needle = name.to_lowercase();
            candidates.find(|effect| effect.name.to_lowercase().starts_with(&needle))
        };
        found.and_then(|effect| effect.id)
    }

    fn effect(&self, id: EffectId) -> Option<&Effect> {
        self.effects.get(&id)
    }

    fn add_effect(
        &mut self,
        target: CombatantId,
        mut effect: Effect,
    ) -> Result<Attachment, AttachError> {
        if self.combatant(target).is_none() {
            return Err(AttachError::UnknownCombatant(target));
        }

        // Names are unique per combatant: re-applying replaces the old effect.
        if let Some(existing) = self.find_effect(target, &effect.name, true) {
            let removed = self.remove_effect(existing);
            debug!(
                target: "effect::combat",
                combatant = %target,
                effect = %effect.name,
                removed = removed.len(),
                "replaced effect with the same name"
            );
        }

        // A combatant sustains at most one concentration effect.
        let mut conc_conflict = Vec::new();
        if effect.concentration {
            let held: Vec<EffectId> = self
                .effects_of(target)
                .filter(|e| e.concentration)
                .filter_map(|e| e.id)
                .collect();
            for id in held {
                let mut removed = self.remove_effect(id).into_iter();
                if let Some(root) = removed.next() {
                    info!(
                        target: "effect::combat",
                        combatant = %target,
                        dropped = %root.name,
                        "concentration broken"
                    );
                    conc_conflict.push(root);
                }
            }
        }

        if let Some(parent) = effect.parent.filter(|p| !self.effects.contains_key(p)) {
            warn!(
                target: "effect::combat",
                effect = %effect.name,
                parent = %parent,
                "parent effect is no longer attached, clearing parent"
            );
            effect.parent = None;
        }

        let id = self.allocate_effect_id();
        effect.id = Some(id);
        effect.owner = Some(target);
        if let Some(parent) = effect.parent {
            self.children.entry(parent).or_default().insert(id);
        }
        if let Some(combatant) = self.combatants.iter_mut().find(|c| c.id == target) {
            combatant.effects.push(id);
        }
        self.effects.insert(id, effect);

        Ok(Attachment { id, conc_conflict })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(combat: &mut Combat, target: CombatantId, effect: Effect) -> EffectId {
        combat.add_effect(target, effect).unwrap().id
    }

    #[test]
    fn add_effect_assigns_id_and_owner() {
        let mut combat = Combat::new();
        let goblin = combat.add_combatant("Goblin");
        let id = attach(&mut combat, goblin, Effect::new("Poison", 3));

        let effect = combat.effect(id).unwrap();
        assert_eq!(effect.id, Some(id));
        assert_eq!(effect.owner, Some(goblin));
        assert!(combat.has_effect(goblin, "Poison", true));
        assert!(!combat.has_effect(goblin, "poison", true));
        assert_eq!(combat.find_effect(goblin, "poi", false), Some(id));
    }

    #[test]
    fn unknown_combatant_is_rejected() {
        let mut combat = Combat::new();
        let err = combat
            .add_effect(CombatantId(7), Effect::new("Poison", 3))
            .unwrap_err();
        assert_eq!(err, AttachError::UnknownCombatant(CombatantId(7)));
    }

    #[test]
    fn second_concentration_effect_evicts_the_first() {
        let mut combat = Combat::new();
        let wizard = combat.add_combatant("Wizard");
        let first = attach(
            &mut combat,
            wizard,
            Effect::new("Concentrating: Bless", 10).with_concentration(true),
        );

        let outcome = combat
            .add_effect(
                wizard,
                Effect::new("Concentrating: Haste", 10).with_concentration(true),
            )
            .unwrap();

        assert_eq!(outcome.conc_conflict.len(), 1);
        assert_eq!(outcome.conc_conflict[0].name, "Concentrating: Bless");
        assert!(combat.effect(first).is_none());
        assert_eq!(combat.effects_of(wizard).count(), 1);
    }

    #[test]
    fn same_name_effect_replaces_the_old_one() {
        let mut combat = Combat::new();
        let wizard = combat.add_combatant("Wizard");
        let goblin = combat.add_combatant("Goblin");
        let old = attach(&mut combat, goblin, Effect::new("Bane", 10));
        let mut child = Effect::new("Bane Mark", -1);
        child.parent = Some(old);
        attach(&mut combat, goblin, child);
        let elsewhere = attach(&mut combat, wizard, Effect::new("Bane", 10));

        let outcome = combat.add_effect(goblin, Effect::new("Bane", 5)).unwrap();

        let names: Vec<_> = combat.effects_of(goblin).map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bane"]);
        assert!(combat.effect(old).is_none());
        assert_eq!(combat.effect(outcome.id).unwrap().remaining, 5);
        assert!(outcome.conc_conflict.is_empty());
        assert!(combat.effect(elsewhere).is_some());
    }

    #[test]
    fn removing_parent_cascades_to_children() {
        let mut combat = Combat::new();
        let wizard = combat.add_combatant("Wizard");
        let fighter = combat.add_combatant("Fighter");
        let conc = attach(&mut combat, wizard, Effect::new("Bless", 10));

        let mut child = Effect::new("Blessed", 10);
        child.parent = Some(conc);
        let child = attach(&mut combat, fighter, child);

        let mut grandchild = Effect::new("Blessed x2", -1);
        grandchild.parent = Some(child);
        attach(&mut combat, fighter, grandchild);

        assert_eq!(combat.children_of(conc).count(), 1);
        let removed = combat.remove_effect(conc);
        let names: Vec<_> = removed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bless", "Blessed", "Blessed x2"]);
        assert_eq!(combat.effect_count(), 0);
        assert_eq!(combat.effects_of(fighter).count(), 0);
    }

    #[test]
    fn removing_child_unlinks_it_from_parent() {
        let mut combat = Combat::new();
        let fighter = combat.add_combatant("Fighter");
        let parent = attach(&mut combat, fighter, Effect::new("Rage", 10));
        let mut child = Effect::new("Rage x2", -1);
        child.parent = Some(parent);
        let child = attach(&mut combat, fighter, child);

        combat.remove_effect(child);
        assert_eq!(combat.children_of(parent).count(), 0);
        assert!(combat.effect(parent).is_some());
    }

    #[test]
    fn dangling_parent_is_cleared_on_attach() {
        let mut combat = Combat::new();
        let fighter = combat.add_combatant("Fighter");
        let mut effect = Effect::new("Marked", 2);
        effect.parent = Some(EffectId(99));
        let id = attach(&mut combat, fighter, effect);
        assert_eq!(combat.effect(id).unwrap().parent, None);
    }

    #[test]
    fn turn_ticks_respect_end_on_turn_end() {
        let mut combat = Combat::new();
        let rogue = combat.add_combatant("Rogue");
        let start = attach(&mut combat, rogue, Effect::new("Dodge", 1));
        let end = attach(
            &mut combat,
            rogue,
            Effect::new("Hidden", 2).with_end_on_turn_end(true),
        );
        let forever = attach(&mut combat, rogue, Effect::new("Cursed", -1));

        let expired = combat.start_turn(rogue);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Dodge");
        assert!(combat.effect(start).is_none());

        assert!(combat.end_turn(rogue).is_empty());
        assert_eq!(combat.effect(end).unwrap().remaining, 1);
        assert_eq!(combat.end_turn(rogue).len(), 1);
        assert_eq!(combat.effect(forever).unwrap().remaining, -1);
    }
}

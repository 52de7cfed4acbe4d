//! Data layer: parses the embedded narrative and loot tables, then boots
//! the player into the Village.
//!
//! Both tables ship inside the binary. A table that fails to parse is
//! replaced by a small built-in fallback so the game still runs.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use crate::shared::*;

const NARRATIVE_RON: &str = include_str!("../../assets/data/narrative.ron");
const LOOT_TABLE_RON: &str = include_str!("../../assets/data/loot_table.ron");

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameScene::Loading), load_all_data);
    }
}

pub fn parse_table<T: DeserializeOwned>(label: &str, source: &str) -> Result<T, String> {
    ron::from_str(source).map_err(|e| format!("Failed to parse {label}: {e}"))
}

fn fallback_narrative() -> NarrativeContent {
    let mut prompts = BTreeMap::new();
    for zone in ZoneId::ALL.into_iter().filter(|z| !z.is_village()) {
        prompts.insert(
            zone.name().to_string(),
            vec![NarrativePrompt {
                prompt: "The way ahead is quiet.".into(),
                options: vec!["Look around".into(), "Keep walking".into()],
                outcomes: vec!["You find something. (+Loot)".into(), "Nothing stirs.".into()],
            }],
        );
    }
    NarrativeContent {
        prologues: BTreeMap::new(),
        prompts,
    }
}

fn fallback_loot() -> LootTable {
    let mut zones = BTreeMap::new();
    zones.insert(
        ZoneId::OuterGrasslands.name().to_string(),
        vec![LootItem {
            name: FALLBACK_LOOT.into(),
            stat_effects: BTreeMap::new(),
            resist: BTreeMap::new(),
            combat_effects: CombatEffects::default(),
            can_deposit: false,
        }],
    );
    LootTable { zones }
}

/// Fills the content registries, then hands the starting kit to the
/// Village.
fn load_all_data(
    mut narrative: ResMut<NarrativeContent>,
    mut loot: ResMut<LootTable>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
) {
    info!("DataPlugin: populating registries…");

    *narrative = parse_table("narrative", NARRATIVE_RON).unwrap_or_else(|e| {
        warn!("{}; using built-in narrative", e);
        fallback_narrative()
    });
    info!(
        "  Narrative loaded: {} prologue zone(s), {} prompt zone(s)",
        narrative.prologues.len(),
        narrative.prompts.len()
    );

    *loot = parse_table("loot table", LOOT_TABLE_RON).unwrap_or_else(|e| {
        warn!("{}; using built-in loot table", e);
        fallback_loot()
    });
    info!("  Loot items loaded: {}", loot.all_item_names().len());

    transitions.send(ZoneTransitionEvent {
        target: SceneTarget::Zone(ZoneId::Village),
        inventory: Inventory::starting_kit().snapshot(),
        prompt_count: 0,
        reset_stats: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_narrative_parses() {
        let content: NarrativeContent = parse_table("narrative", NARRATIVE_RON).unwrap();
        for zone in ZoneId::ALL.into_iter().filter(|z| !z.is_village()) {
            let prompts = content.prompts_for(zone);
            assert!(!prompts.is_empty(), "{} has no prompts", zone.name());
            for p in prompts {
                assert_eq!(p.options.len(), p.outcomes.len(), "{}", p.prompt);
            }
        }
    }

    #[test]
    fn test_embedded_loot_table_covers_crafting_inputs() {
        let loot: LootTable = parse_table("loot table", LOOT_TABLE_RON).unwrap();
        for name in ["Wood", "Iron Ore", "Thread", "Fire Crystal", "Vines", "Leather"] {
            assert!(loot.item(name).is_some(), "missing {name}");
        }
        assert!(loot.item("Iron Ore").is_some_and(|i| i.can_deposit));
        assert_eq!(loot.item("Iron Sword").map(|i| i.combat_effects.attack), Some(12));
    }

    #[test]
    fn test_bad_source_reports_error() {
        let result: Result<LootTable, String> = parse_table("loot table", "(zones: [");
        assert!(result.unwrap_err().starts_with("Failed to parse loot table"));
    }
}

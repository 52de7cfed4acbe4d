//! Outcome text is the effect script: survival drain, damage, loot and
//! travel are all read out of the prose.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use crate::shared::*;

/// Thirst, hunger and stamina lost on every applied outcome.
pub const SURVIVAL_DRAIN: i32 = 7;
pub const CRITICAL_STAT: i32 = 15;
pub const LOW_STAT: i32 = 35;
pub const CRITICAL_PENALTY: i32 = 10;
pub const LOW_PENALTY: i32 = 5;

static TYPED_DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(([-+]\d+)\s*Health\)\s*\[type=(\w+)\]").expect("typed damage pattern")
});
static PLAIN_HEALTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([-+]\d+)\s*Health").expect("health pattern"));
static TRAVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(Travel to ([^)]+)\)").expect("travel pattern"));
const LOOT_TAG: &str = "(+Loot)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelError {
    UnknownZone(String),
}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TravelError::UnknownZone(name) => write!(f, "no zone named '{name}'"),
        }
    }
}

/// Everything an outcome did, for the caller to show and act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutcome {
    /// Outcome prose plus any loot line.
    pub text: String,
    pub loot: Option<String>,
    pub travel: Option<Result<ZoneId, TravelError>>,
    pub low_stat_penalty: i32,
}

/// Drains survival stats and applies any health change written in `text`.
///
/// A typed hit `(-N Health) [type=T]` is reduced by the matching equipped
/// resistance. Otherwise a signed `±N Health` is applied as written.
pub fn apply_health_and_drain(stats: &mut PlayerStats, equipment: &Equipment, text: &str) {
    stats.thirst = (stats.thirst - SURVIVAL_DRAIN).max(0);
    stats.hunger = (stats.hunger - SURVIVAL_DRAIN).max(0);
    stats.stamina = (stats.stamina - SURVIVAL_DRAIN).max(0);

    let typed = TYPED_DAMAGE.captures(text).map(|caps| {
        let raw: i32 = caps[1].parse().unwrap_or(i32::MAX);
        (raw.saturating_abs(), caps[2].to_lowercase())
    });

    match typed {
        Some((damage, kind)) => {
            let taken = damage.saturating_sub(equipment.resistance(&kind)).max(0);
            stats.health = stats.health.saturating_sub(taken).max(0);
        }
        None => {
            let delta = PLAIN_HEALTH
                .captures(text)
                .and_then(|c| c[1].parse::<i32>().ok());
            if let Some(delta) = delta {
                stats.health = stats.health.saturating_add(delta).clamp(0, STAT_MAX);
            }
        }
    }
}

/// Health lost for letting survival stats run low. Never applies in the
/// Village.
pub fn low_stat_penalty(stats: &PlayerStats, zone: ZoneId) -> i32 {
    if zone.is_village() {
        return 0;
    }
    let lowest = stats.stamina.min(stats.thirst).min(stats.hunger);
    if lowest < CRITICAL_STAT {
        CRITICAL_PENALTY
    } else if lowest < LOW_STAT {
        LOW_PENALTY
    } else {
        0
    }
}

/// Reads a `(Travel to Zone)` tag. `None` when the text has none.
pub fn parse_travel(text: &str) -> Option<Result<ZoneId, TravelError>> {
    let caps = TRAVEL.captures(text)?;
    let name = caps[1].trim();
    Some(ZoneId::from_name(name).ok_or_else(|| TravelError::UnknownZone(name.to_string())))
}

/// Applies an outcome to the player: stats, loot, then reads travel.
pub fn resolve_outcome(
    text: &str,
    zone: ZoneId,
    stats: &mut PlayerStats,
    equipment: &Equipment,
    inventory: &mut Inventory,
    loot: &LootTable,
    rng: &mut impl Rng,
) -> ResolvedOutcome {
    apply_health_and_drain(stats, equipment, text);
    let penalty = low_stat_penalty(stats, zone);
    stats.health = (stats.health - penalty).max(0);

    let mut shown = text.to_string();
    let mut received = None;
    if text.contains(LOOT_TAG) {
        let item = loot.random_for_zone(zone, rng);
        inventory.add(&item, 1);
        shown.push_str(&format!("\nLoot received: {item}"));
        received = Some(item);
    }

    ResolvedOutcome {
        travel: parse_travel(&shown),
        text: shown,
        loot: received,
        low_stat_penalty: penalty,
    }
}

/// Adds an item's stat effects, each kept within 0..=100. False when the item
/// has nothing that applies.
pub fn apply_item_effects(stats: &mut PlayerStats, item: Option<&LootItem>) -> bool {
    let Some(item) = item else {
        return false;
    };
    let mut modified = false;
    for (key, value) in &item.stat_effects {
        if let Some(stat) = stats.stat_mut(key) {
            *stat = stat.saturating_add(*value).clamp(0, STAT_MAX);
            modified = true;
        }
    }
    modified
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn table() -> LootTable {
        let mut zones = BTreeMap::new();
        zones.insert(
            "Shady Grove".to_string(),
            vec![LootItem {
                name: "Moss Cloak".into(),
                stat_effects: BTreeMap::new(),
                resist: BTreeMap::from([("poison".to_string(), 4)]),
                combat_effects: CombatEffects::default(),
                can_deposit: false,
            }],
        );
        LootTable { zones }
    }

    #[test]
    fn test_every_outcome_drains_survival() {
        let mut stats = PlayerStats::default();
        apply_health_and_drain(&mut stats, &Equipment::default(), "You rest.");
        assert_eq!((stats.thirst, stats.hunger, stats.stamina), (93, 93, 93));
        assert_eq!(stats.health, 100);
    }

    #[test]
    fn test_typed_damage_is_reduced_by_resistance() {
        let loot = table();
        let mut equipment = Equipment::default();
        equipment.equip("Moss Cloak", &loot);
        let mut stats = PlayerStats::default();
        apply_health_and_drain(&mut stats, &equipment, "Spores! (-10 Health) [type=Poison]");
        assert_eq!(stats.health, 94);
    }

    #[test]
    fn test_resistance_never_heals() {
        let loot = table();
        let mut equipment = Equipment::default();
        equipment.equip("Moss Cloak", &loot);
        let mut stats = PlayerStats::default();
        stats.health = 50;
        apply_health_and_drain(&mut stats, &equipment, "(-2 Health) [type=poison]");
        assert_eq!(stats.health, 50);
    }

    #[test]
    fn test_plain_health_delta_is_signed() {
        let mut stats = PlayerStats::default();
        stats.health = 60;
        apply_health_and_drain(&mut stats, &Equipment::default(), "A spring. +15 health");
        assert_eq!(stats.health, 75);
        apply_health_and_drain(&mut stats, &Equipment::default(), "Thorns (-80 Health)");
        assert_eq!(stats.health, 0);
    }

    #[test]
    fn test_extreme_health_values_saturate() {
        let mut stats = PlayerStats::default();
        apply_health_and_drain(&mut stats, &Equipment::default(), "(-2147483648 Health) [type=fire]");
        assert_eq!(stats.health, 0);

        let mut stats = PlayerStats::default();
        apply_health_and_drain(&mut stats, &Equipment::default(), "(-99999999999 Health) [type=fire]");
        assert_eq!(stats.health, 0);

        let mut stats = PlayerStats::default();
        stats.health = 50;
        apply_health_and_drain(&mut stats, &Equipment::default(), "Blessed. +2147483647 Health");
        assert_eq!(stats.health, STAT_MAX);

        let elixir = LootItem {
            name: "Elixir".into(),
            stat_effects: BTreeMap::from([("health".to_string(), i32::MAX)]),
            resist: BTreeMap::new(),
            combat_effects: CombatEffects::default(),
            can_deposit: false,
        };
        assert!(apply_item_effects(&mut stats, Some(&elixir)));
        assert_eq!(stats.health, STAT_MAX);
    }

    #[test]
    fn test_low_stat_penalty_tiers() {
        let mut stats = PlayerStats::default();
        assert_eq!(low_stat_penalty(&stats, ZoneId::ShadyGrove), 0);
        stats.hunger = 30;
        assert_eq!(low_stat_penalty(&stats, ZoneId::ShadyGrove), LOW_PENALTY);
        stats.thirst = 10;
        assert_eq!(low_stat_penalty(&stats, ZoneId::ShadyGrove), CRITICAL_PENALTY);
        assert_eq!(low_stat_penalty(&stats, ZoneId::Village), 0);
    }

    #[test]
    fn test_travel_tag_parses_case_insensitively() {
        assert_eq!(
            parse_travel("The path opens. (Travel to arid desert)"),
            Some(Ok(ZoneId::AridDesert))
        );
        assert_eq!(
            parse_travel("(travel to Nowhere)"),
            Some(Err(TravelError::UnknownZone("Nowhere".into())))
        );
        assert_eq!(parse_travel("Nothing happens."), None);
    }

    #[test]
    fn test_loot_tag_adds_item_and_line() {
        let loot = table();
        let mut stats = PlayerStats::default();
        let mut inventory = Inventory::default();
        let mut rng = StdRng::seed_from_u64(1);
        let resolved = resolve_outcome(
            "You find a bundle. (+Loot)",
            ZoneId::ShadyGrove,
            &mut stats,
            &Equipment::default(),
            &mut inventory,
            &loot,
            &mut rng,
        );
        assert_eq!(resolved.loot.as_deref(), Some("Moss Cloak"));
        assert!(resolved.text.ends_with("\nLoot received: Moss Cloak"));
        assert_eq!(inventory.count("Moss Cloak"), 1);
    }

    #[test]
    fn test_loot_falls_back_to_stick_in_unknown_zone() {
        let mut inventory = Inventory::default();
        let resolved = resolve_outcome(
            "(+Loot)",
            ZoneId::AridDesert,
            &mut PlayerStats::default(),
            &Equipment::default(),
            &mut inventory,
            &LootTable::default(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(resolved.loot.as_deref(), Some(FALLBACK_LOOT));
    }

    #[test]
    fn test_item_effects_cap_at_max() {
        let mut stats = PlayerStats::default();
        stats.hunger = 90;
        let bread = LootItem {
            name: "Bread".into(),
            stat_effects: BTreeMap::from([("hunger".to_string(), 20), ("luck".to_string(), 3)]),
            resist: BTreeMap::new(),
            combat_effects: CombatEffects::default(),
            can_deposit: false,
        };
        assert!(apply_item_effects(&mut stats, Some(&bread)));
        assert_eq!(stats.hunger, 100);
        assert!(!apply_item_effects(&mut stats, None));
    }
}

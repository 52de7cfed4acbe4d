//! Shared components, resources, events, and states for Emberwild.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use bevy::utils::Instant;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME SCENE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameScene {
    #[default]
    Loading,
    /// Village or one of the scavenger zones. Which one lives in `ZoneSession`.
    Zone,
    Camping,
}

// ═══════════════════════════════════════════════════════════════════════
// SCREEN STATE: mutually exclusive UI mode register
// ═══════════════════════════════════════════════════════════════════════

/// Exactly one is active at a time. Ordering matters: everything from
/// `Liquidity` upward is a module UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, States, Default)]
pub enum ScreenState {
    #[default]
    None,
    Prologue,
    Prompt,
    Choices,
    Outcome,
    ItemMenu,
    ItemPick,
    Liquidity,
    Merchant,
    RoyalMarket,
    Tinkerer,
    Crafting,
    Trading,
    Battle,
}

impl ScreenState {
    pub const ALL: [ScreenState; 14] = [
        ScreenState::None,
        ScreenState::Prologue,
        ScreenState::Prompt,
        ScreenState::Choices,
        ScreenState::Outcome,
        ScreenState::ItemMenu,
        ScreenState::ItemPick,
        ScreenState::Liquidity,
        ScreenState::Merchant,
        ScreenState::RoyalMarket,
        ScreenState::Tinkerer,
        ScreenState::Crafting,
        ScreenState::Trading,
        ScreenState::Battle,
    ];

    pub fn blocks_movement(self) -> bool {
        self != ScreenState::None
    }

    pub fn is_module_ui(self) -> bool {
        self >= ScreenState::Liquidity
    }

    pub fn is_narrative(self) -> bool {
        self != ScreenState::None && !self.is_module_ui()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const ZONE_PLAYER_SPEED: f32 = 80.0;
pub const CAMP_PLAYER_SPEED: f32 = 100.0;
pub const ZONE_WIDTH: f32 = 640.0;
pub const ZONE_HEIGHT: f32 = 480.0;
pub const STARTING_OROMOZI: u64 = 1000;
pub const STAT_MAX: i32 = 100;

// ═══════════════════════════════════════════════════════════════════════
// ZONES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneId {
    OuterGrasslands,
    ShadyGrove,
    AridDesert,
    Village,
}

impl ZoneId {
    /// Zone list order. Also the order `Z` cycles through and the order
    /// "Return to" walks backwards along.
    pub const ALL: [ZoneId; 4] = [
        ZoneId::OuterGrasslands,
        ZoneId::ShadyGrove,
        ZoneId::AridDesert,
        ZoneId::Village,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ZoneId::OuterGrasslands => "Outer Grasslands",
            ZoneId::ShadyGrove => "Shady Grove",
            ZoneId::AridDesert => "Arid Desert",
            ZoneId::Village => "Village",
        }
    }

    pub fn map_key(self) -> &'static str {
        match self {
            ZoneId::OuterGrasslands => "OuterGrasslandsMap",
            ZoneId::ShadyGrove => "ShadyGroveMap",
            ZoneId::AridDesert => "AridDesertMap",
            ZoneId::Village => "villageCommonsMap",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ZoneId::OuterGrasslands => 0,
            ZoneId::ShadyGrove => 1,
            ZoneId::AridDesert => 2,
            ZoneId::Village => 3,
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<ZoneId> {
        let wanted = name.trim();
        ZoneId::ALL
            .into_iter()
            .find(|z| z.name().eq_ignore_ascii_case(wanted))
    }

    pub fn next_cyclic(self) -> ZoneId {
        ZoneId::ALL[(self.index() + 1) % ZoneId::ALL.len()]
    }

    /// Where "Return to ..." leads. Outer Grasslands goes home to the
    /// Village; the Village itself has nowhere to return to.
    pub fn return_target(self) -> Option<ZoneId> {
        match self {
            ZoneId::Village => None,
            ZoneId::OuterGrasslands => Some(ZoneId::Village),
            other => Some(ZoneId::ALL[other.index() - 1]),
        }
    }

    pub fn is_village(self) -> bool {
        self == ZoneId::Village
    }
}

/// The live zone plus the bits of session state that survive zone restarts.
#[derive(Resource, Debug, Clone)]
pub struct ZoneSession {
    pub zone: ZoneId,
    pub prompt_count: u32,
    /// Snapshot taken the first time the player leaves the Village for a
    /// scavenger zone. Restored on death.
    pub initial_scavenger_inventory: Option<Vec<InventoryItem>>,
}

impl Default for ZoneSession {
    fn default() -> Self {
        Self {
            zone: ZoneId::Village,
            prompt_count: 0,
            initial_scavenger_inventory: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Ordered name → count ledger. Zero-quantity entries never persist.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn from_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let mut inv = Inventory::default();
        for item in items {
            inv.add(&item.name, item.quantity);
        }
        inv
    }

    /// Village starting kit.
    pub fn starting_kit() -> Self {
        Inventory::from_items([
            InventoryItem::new("Bread", 1),
            InventoryItem::new("Water", 1),
            InventoryItem::new("Iron Sword", 1),
            InventoryItem::new("Wooden Armor", 1),
            InventoryItem::new("Healing Medicine", 1),
        ])
    }

    /// Stacks onto an entry with the exact same name, or appends.
    pub fn add(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(InventoryItem::new(name, quantity)),
        }
    }

    /// Removes up to `quantity` of the exact name. Returns how many were
    /// actually removed.
    pub fn remove(&mut self, name: &str, quantity: u32) -> u32 {
        let Some(index) = self.items.iter().position(|i| i.name == name) else {
            return 0;
        };
        let removed = quantity.min(self.items[index].quantity);
        self.items[index].quantity -= removed;
        if self.items[index].quantity == 0 {
            self.items.remove(index);
        }
        removed
    }

    pub fn count(&self, name: &str) -> u32 {
        self.items
            .iter()
            .filter(|i| i.name == name)
            .map(|i| i.quantity)
            .sum()
    }

    pub fn has(&self, name: &str, quantity: u32) -> bool {
        self.count(name) >= quantity
    }

    pub fn find_ignore_case(&self, name: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, index: usize) -> Option<&InventoryItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> Vec<InventoryItem> {
        self.items.clone()
    }

    pub fn display_lines(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|i| format!("{} x{}", i.name, i.quantity))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER STATS & EQUIPMENT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i32,
    pub thirst: i32,
    pub hunger: i32,
    pub stamina: i32,
    pub oromozi: u64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::fresh(STARTING_OROMOZI)
    }
}

impl PlayerStats {
    pub fn fresh(oromozi: u64) -> Self {
        Self {
            health: STAT_MAX,
            thirst: STAT_MAX,
            hunger: STAT_MAX,
            stamina: STAT_MAX,
            oromozi,
        }
    }

    /// Full survival stats; currency is kept.
    pub fn reset_for_zone(&mut self) {
        *self = Self::fresh(self.oromozi);
    }

    pub fn stat_mut(&mut self, key: &str) -> Option<&mut i32> {
        match key {
            "health" => Some(&mut self.health),
            "thirst" => Some(&mut self.thirst),
            "hunger" => Some(&mut self.hunger),
            "stamina" => Some(&mut self.stamina),
            _ => None,
        }
    }

    pub fn hud_line(&self, zone: ZoneId) -> String {
        if zone.is_village() {
            format!("OROMOZI: {}", self.oromozi)
        } else {
            format!(
                "HEALTH: {}   STAMINA: {}\nHUNGER: {}   THIRST: {}\nOROMOZI: {}",
                self.health, self.stamina, self.hunger, self.thirst, self.oromozi
            )
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub items: Vec<String>,
    /// Damage type → total resistance of everything equipped.
    pub resist: BTreeMap<String, i32>,
}

impl Equipment {
    pub fn equip(&mut self, name: &str, loot: &LootTable) {
        self.items.push(name.to_string());
        self.recompute(loot);
    }

    pub fn recompute(&mut self, loot: &LootTable) {
        self.resist.clear();
        for name in &self.items {
            let Some(data) = loot.item(name) else {
                continue;
            };
            for (kind, value) in &data.resist {
                *self.resist.entry(kind.to_lowercase()).or_insert(0) += value;
            }
        }
    }

    pub fn resistance(&self, damage_type: &str) -> i32 {
        self.resist
            .get(&damage_type.to_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DATA REGISTRIES: populated by DataPlugin at startup
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEffects {
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub evasion: i32,
    #[serde(default)]
    pub defense: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootItem {
    pub name: String,
    #[serde(default)]
    pub stat_effects: BTreeMap<String, i32>,
    #[serde(default)]
    pub resist: BTreeMap<String, i32>,
    #[serde(default)]
    pub combat_effects: CombatEffects,
    #[serde(default)]
    pub can_deposit: bool,
}

pub const FALLBACK_LOOT: &str = "Stick";

/// Zone name → items that can drop there.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LootTable {
    pub zones: BTreeMap<String, Vec<LootItem>>,
}

impl LootTable {
    /// First item with this exact name across all zones.
    pub fn item(&self, name: &str) -> Option<&LootItem> {
        self.zones
            .values()
            .flat_map(|items| items.iter())
            .find(|i| i.name == name)
    }

    /// Every distinct item name, in zone then table order.
    pub fn all_item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for item in self.zones.values().flat_map(|items| items.iter()) {
            if !names.contains(&item.name) {
                names.push(item.name.clone());
            }
        }
        if names.is_empty() {
            names.push(FALLBACK_LOOT.to_string());
        }
        names
    }

    pub fn random_for_zone(&self, zone: ZoneId, rng: &mut impl Rng) -> String {
        match self.zones.get(zone.name()) {
            Some(items) if !items.is_empty() => {
                items[rng.gen_range(0..items.len())].name.clone()
            }
            _ => FALLBACK_LOOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativePrompt {
    pub prompt: String,
    pub options: Vec<String>,
    pub outcomes: Vec<String>,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeContent {
    pub prologues: BTreeMap<String, Vec<String>>,
    pub prompts: BTreeMap<String, Vec<NarrativePrompt>>,
}

impl NarrativeContent {
    pub fn prologues_for(&self, zone: ZoneId) -> &[String] {
        self.prologues
            .get(zone.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn prompts_for(&self, zone: ZoneId) -> &[NarrativePrompt] {
        self.prompts
            .get(zone.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Pixels per second. Forced to zero whenever a UI owns the input.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Walking speed in pixels per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct WalkSpeed(pub f32);

/// Axis-aligned half extents used for overlap tests.
#[derive(Component, Debug, Clone, Copy)]
pub struct HalfSize(pub Vec2);

/// AABB overlap between two centred boxes.
pub fn overlaps(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    (a_pos.x - b_pos.x).abs() < a_half.x + b_half.x
        && (a_pos.y - b_pos.y).abs() < a_half.y + b_half.y
}

/// Everything spawned for the current zone; despawned on zone transition.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ZoneEntity;

/// Everything spawned for the camp; despawned on leaving the camp.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CampEntity;

// ═══════════════════════════════════════════════════════════════════════
// FUEL SOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelKind {
    Campfire,
    Torch,
}

impl FuelKind {
    pub fn label(self) -> &'static str {
        match self {
            FuelKind::Campfire => "campfire",
            FuelKind::Torch => "torch",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Toast notification for player feedback.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

impl ToastEvent {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTarget {
    Zone(ZoneId),
    Camping,
}

/// Scene handoff. The receiving scene takes the inventory by value.
#[derive(Event, Debug, Clone)]
pub struct ZoneTransitionEvent {
    pub target: SceneTarget,
    pub inventory: Vec<InventoryItem>,
    pub prompt_count: u32,
    /// Survival stats back to full (currency kept) on arrival.
    pub reset_stats: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FireExtinguishedEvent {
    pub kind: FuelKind,
}

/// The interaction points laid out in the Village.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VillageSite {
    LiquidityBank,
    MerchantQuarter,
    RoyalMarket,
    TinkerersLab,
    CraftingWorkshop,
    TradingPost,
    BattleMode,
    ScavengerMode,
    CampingMode,
}

impl VillageSite {
    pub const ALL: [VillageSite; 9] = [
        VillageSite::LiquidityBank,
        VillageSite::MerchantQuarter,
        VillageSite::RoyalMarket,
        VillageSite::TinkerersLab,
        VillageSite::CraftingWorkshop,
        VillageSite::TradingPost,
        VillageSite::BattleMode,
        VillageSite::ScavengerMode,
        VillageSite::CampingMode,
    ];

    /// Object name as it appears on the village map.
    pub fn key(self) -> &'static str {
        match self {
            VillageSite::LiquidityBank => "liquidity_bank",
            VillageSite::MerchantQuarter => "merchant_quarter",
            VillageSite::RoyalMarket => "royal_market",
            VillageSite::TinkerersLab => "tinkerers_lab",
            VillageSite::CraftingWorkshop => "crafting_workshop",
            VillageSite::TradingPost => "trading_post",
            VillageSite::BattleMode => "battle_mode",
            VillageSite::ScavengerMode => "scavenger_mode",
            VillageSite::CampingMode => "camping_mode",
        }
    }
}

/// The player pressed interact while standing on a village site.
#[derive(Event, Debug, Clone, Copy)]
pub struct VillageInteractionEvent {
    pub site: VillageSite,
}

/// The player touched an exclamation marker; the narrative flow begins.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NarrativeStartEvent;

// ═══════════════════════════════════════════════════════════════════════
// SHARED UI CONTRACT: written by domains, rendered by the ui plugin
// ═══════════════════════════════════════════════════════════════════════

/// The one dialog box. Opening overwrites whatever was shown.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogBox {
    text: Option<String>,
}

impl DialogBox {
    pub fn showing(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn hide(&mut self) {
        self.text = None;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.text.is_some()
    }
}

/// Snapshot of whichever list menu is active, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub title: String,
    pub rows: Vec<String>,
    pub cursor_row: Option<usize>,
    pub footer: String,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDisplay {
    pub current: Option<MenuSnapshot>,
}

/// Row clicks reported by the menu view; consumed by the owning menu.
#[derive(Resource, Debug, Clone, Default)]
pub struct MenuPointer {
    pub clicked_row: Option<usize>,
}

impl MenuPointer {
    pub fn take(&mut self) -> Option<usize> {
        self.clicked_row.take()
    }

    pub fn is_pending(&self) -> bool {
        self.clicked_row.is_some()
    }
}

/// Set while a numeric prompt owns the keyboard.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextEntryFocus(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame game actions. Logic systems read this, never raw keys.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub interact: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
    pub use_item: bool,
    pub equip_item: bool,
    pub stoke: bool,
    pub cook: bool,
    pub cycle_zone: bool,
    pub typed: String,
    pub backspace: bool,
    pub submit: bool,
    pub any_key: bool,
}

impl PlayerInput {
    /// Anything an open menu, prompt or dialog would react to this frame.
    pub fn has_ui_action(&self) -> bool {
        self.ui_up
            || self.ui_down
            || self.ui_left
            || self.ui_right
            || self.ui_confirm
            || self.ui_cancel
            || self.submit
            || self.backspace
            || self.use_item
            || self.equip_item
            || !self.typed.is_empty()
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Narrative,
    Menu,
    TextEntry,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub ui_confirm: KeyCode,
    pub ui_submit: KeyCode,
    pub ui_cancel: KeyCode,
    pub use_item: KeyCode,
    pub equip_item: KeyCode,
    pub stoke: KeyCode,
    pub cook: KeyCode,
    pub cycle_zone: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::KeyI,
            ui_confirm: KeyCode::Space,
            ui_submit: KeyCode::Enter,
            ui_cancel: KeyCode::Escape,
            use_item: KeyCode::KeyU,
            equip_item: KeyCode::KeyE,
            stoke: KeyCode::KeyF,
            cook: KeyCode::KeyC,
            cycle_zone: KeyCode::KeyZ,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WALL CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Millisecond wall clock for anything that must survive scene changes
/// (cooking resume, deposit yield, listing nonces). Never reports 0, which
/// marks an unset timestamp.
#[derive(Resource, Debug, Clone)]
pub struct WallClock {
    origin: Instant,
    frozen_ms: Option<u64>,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frozen_ms: None,
        }
    }
}

impl WallClock {
    /// A clock that only moves when told to.
    pub fn frozen(ms: u64) -> Self {
        Self {
            origin: Instant::now(),
            frozen_ms: Some(ms.max(1)),
        }
    }

    pub fn now_ms(&self) -> u64 {
        match self.frozen_ms {
            Some(ms) => ms,
            None => self.origin.elapsed().as_millis() as u64 + 1,
        }
    }

    /// Moves a frozen clock forward. No effect on a live clock.
    pub fn advance_ms(&mut self, ms: u64) {
        if let Some(now) = self.frozen_ms.as_mut() {
            *now += ms;
        }
    }
}

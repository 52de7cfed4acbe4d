//! The Village: building menus, the battle stat sheet, and the two
//! departure points (scavenging and camping).

pub mod catalog;
pub mod economy;
pub mod router;

pub use economy::{liquidity_yield, EconomyAction, EconomyError, Receipt, SimulatedLedger};
pub use router::{MenuNode, ModalPurpose, Step, VillageCommand};

use bevy::prelude::*;
use crate::menu::{ListMenu, ModalInput, LIST_FOOTER};
use crate::shared::*;
use economy::Holdings;
use router::{accept_modal, build_menu, modal_for, route, Draft, MenuContext};

pub struct VillagePlugin;

impl Plugin for VillagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VillageUi>()
            .init_resource::<SimulatedLedger>();

        app.add_systems(
            Update,
            (open_village_site, village_input, sync_village_display)
                .chain()
                .after(crate::zone::apply_zone_transitions)
                .run_if(in_state(GameScene::Zone)),
        );
        app.add_systems(Update, reset_village_on_transition);
    }
}

/// A departure waiting on SPACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    Scavenger,
    Camping,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VillageView {
    #[default]
    Closed,
    Menu(ListMenu<VillageCommand>),
    Modal(ModalInput<ModalPurpose>),
    Battle,
    Confirm(Departure),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct VillageUi {
    pub node: Option<MenuNode>,
    pub view: VillageView,
    pub draft: Draft,
}

impl VillageUi {
    pub fn is_open(&self) -> bool {
        self.view != VillageView::Closed
    }

    pub fn close(&mut self) {
        *self = VillageUi::default();
    }
}

/// Sums what everything equipped adds to a fight. Health is capped at 100.
pub fn battle_summary(stats: &PlayerStats, equipment: &Equipment, loot: &LootTable) -> String {
    let mut health = stats.health;
    let mut effects = CombatEffects::default();
    for data in equipment.items.iter().filter_map(|name| loot.item(name)) {
        health += data.stat_effects.get("health").copied().unwrap_or(0);
        effects.attack += data.combat_effects.attack;
        effects.defense += data.combat_effects.defense;
        effects.evasion += data.combat_effects.evasion;
    }
    format!(
        "Battle Stats:\nHealth: {}\nAttack: {}\nDefense: {}\nEvasion: {}\n\n(Press SPACE to exit)",
        health.min(STAT_MAX),
        effects.attack,
        effects.defense,
        effects.evasion
    )
}

/// Opens `node`, walking up to the nearest parent that has something to
/// show. Returns the screen to be on.
fn open_node(
    ui: &mut VillageUi,
    node: MenuNode,
    ctx: &MenuContext,
    toasts: &mut EventWriter<ToastEvent>,
) -> ScreenState {
    let mut node = node;
    loop {
        match build_menu(node, ctx, &ui.draft) {
            Ok(menu) => {
                ui.node = Some(node);
                ui.view = VillageView::Menu(menu);
                return node.screen();
            }
            Err(notice) => {
                info!("{:?} unavailable: {}", node, notice);
                toasts.send(ToastEvent::short(notice));
                match node.parent() {
                    Some(parent) => node = parent,
                    None => {
                        ui.close();
                        return ScreenState::None;
                    }
                }
            }
        }
    }
}

fn open_village_site(
    mut events: EventReader<VillageInteractionEvent>,
    screen: Res<State<ScreenState>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut ui: ResMut<VillageUi>,
    mut dialog: ResMut<DialogBox>,
    inventory: Res<Inventory>,
    stats: Res<PlayerStats>,
    equipment: Res<Equipment>,
    ledger: Res<SimulatedLedger>,
    loot: Res<LootTable>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Some(event) = events.read().last().copied() else {
        return;
    };
    if *screen.get() != ScreenState::None || ui.is_open() {
        return;
    }
    let ui = &mut *ui;
    match event.site {
        VillageSite::BattleMode => {
            dialog.show(battle_summary(&stats, &equipment, &loot));
            ui.view = VillageView::Battle;
            next_screen.set(ScreenState::Battle);
        }
        VillageSite::ScavengerMode => {
            dialog.show("Enter Scavenger Mode with your current inventory?\n(Press SPACE to confirm)");
            ui.view = VillageView::Confirm(Departure::Scavenger);
        }
        VillageSite::CampingMode => {
            dialog.show("Go camping?\n(Press SPACE to confirm)");
            ui.view = VillageView::Confirm(Departure::Camping);
        }
        site => {
            let Some(root) = MenuNode::root_for(site) else {
                return;
            };
            let ctx = MenuContext {
                inventory: &inventory,
                ledger: &ledger,
                loot: &loot,
            };
            let next = open_node(ui, root, &ctx, &mut toasts);
            next_screen.set(next);
        }
    }
}

/// Drives the open building menu, numeric prompt, battle sheet, or
/// departure prompt.
fn village_input(
    input: Res<PlayerInput>,
    mut pointer: ResMut<MenuPointer>,
    screen: Res<State<ScreenState>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut ui: ResMut<VillageUi>,
    mut dialog: ResMut<DialogBox>,
    mut inventory: ResMut<Inventory>,
    mut stats: ResMut<PlayerStats>,
    mut ledger: ResMut<SimulatedLedger>,
    loot: Res<LootTable>,
    clock: Res<WallClock>,
    session: Res<ZoneSession>,
    mut toasts: EventWriter<ToastEvent>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
) {
    if !ui.is_open() || !(input.has_ui_action() || pointer.is_pending()) {
        return;
    }
    let ui = &mut *ui;
    let current = *screen.get();
    let mut rng = rand::thread_rng();

    let step = match &mut ui.view {
        VillageView::Closed => return,
        VillageView::Confirm(departure) => {
            let departure = *departure;
            if input.ui_cancel {
                ui.close();
                dialog.hide();
            } else if input.ui_confirm {
                let (target, prompt_count, reset_stats) = match departure {
                    Departure::Scavenger => {
                        (SceneTarget::Zone(ZoneId::OuterGrasslands), 0, true)
                    }
                    Departure::Camping => (SceneTarget::Camping, session.prompt_count, false),
                };
                info!("Leaving the Village: {:?}", departure);
                transitions.send(ZoneTransitionEvent {
                    target,
                    inventory: inventory.snapshot(),
                    prompt_count,
                    reset_stats,
                });
                ui.close();
            }
            return;
        }
        VillageView::Battle => {
            if input.ui_confirm || input.ui_cancel {
                ui.close();
                dialog.hide();
                next_screen.set(ScreenState::None);
            }
            return;
        }
        VillageView::Modal(modal) => {
            let purpose = modal.purpose;
            if input.ui_cancel {
                debug!("Numeric entry abandoned");
                Step::Open(purpose.fallback())
            } else {
                if input.backspace {
                    modal.backspace();
                }
                modal.push_str(&input.typed);
                if !input.submit {
                    return;
                }
                match accept_modal(purpose, modal.submit(), &mut ui.draft, &inventory) {
                    Ok(step) => step,
                    Err((notice, fallback)) => {
                        warn!("Rejected {:?} entry '{}'", purpose, modal.buffer);
                        toasts.send(ToastEvent::short(notice));
                        Step::Open(fallback)
                    }
                }
            }
        }
        VillageView::Menu(menu) => {
            let Some(command) = menu.drive(&input, &mut pointer) else {
                return;
            };
            route(command, &mut ui.draft, &mut rng)
        }
    };

    let next = match step {
        Step::Open(node) => {
            let ctx = MenuContext {
                inventory: &inventory,
                ledger: &ledger,
                loot: &loot,
            };
            open_node(ui, node, &ctx, &mut toasts)
        }
        Step::Prompt(purpose) => {
            ui.view = VillageView::Modal(modal_for(purpose, &ui.draft, &inventory, &ledger));
            current
        }
        Step::Submit { action, then } => {
            debug!("Submitting {:?}", action);
            let result = {
                let holdings = Holdings {
                    inventory: &inventory,
                    oromozi: stats.oromozi,
                    loot: &loot,
                    zone: session.zone,
                    now_ms: clock.now_ms(),
                };
                ledger.submit(action, &holdings, &mut rng)
            };
            match result {
                Ok(receipt) => {
                    receipt.apply(&mut inventory, &mut stats);
                    info!("{}", receipt.message);
                    toasts.send(ToastEvent::short(receipt.message));
                }
                Err(e) => {
                    warn!("Village action rejected: {}", e);
                    toasts.send(ToastEvent::short(e.to_string()));
                }
            }
            let ctx = MenuContext {
                inventory: &inventory,
                ledger: &ledger,
                loot: &loot,
            };
            open_node(ui, then, &ctx, &mut toasts)
        }
        Step::ShowDeposits => {
            toasts.send(ToastEvent {
                message: ledger.deposit_summary(clock.now_ms()),
                duration_secs: 5.0,
            });
            current
        }
        Step::Close => {
            ui.close();
            ScreenState::None
        }
    };

    if next != current {
        next_screen.set(next);
    }
}

/// What the village last put on screen, so closing only clears its own
/// menu and dialog.
#[derive(Default)]
pub struct VillageDisplayOwnership {
    menu: bool,
    dialog: bool,
}

/// Mirrors the village view into the shared menu view and dialog box.
/// Battle and departure prompts are written by `open_village_site`.
pub fn sync_village_display(
    ui: Res<VillageUi>,
    mut display: ResMut<MenuDisplay>,
    mut dialog: ResMut<DialogBox>,
    mut focus: ResMut<TextEntryFocus>,
    mut owned: Local<VillageDisplayOwnership>,
) {
    if !ui.is_changed() {
        return;
    }
    focus.set_if_neq(TextEntryFocus(matches!(ui.view, VillageView::Modal(_))));

    match &ui.view {
        VillageView::Menu(menu) => {
            display.set_if_neq(MenuDisplay {
                current: Some(menu.snapshot(LIST_FOOTER)),
            });
            owned.menu = true;
        }
        _ if owned.menu => {
            display.set_if_neq(MenuDisplay::default());
            owned.menu = false;
        }
        _ => {}
    }

    match &ui.view {
        VillageView::Modal(modal) => {
            dialog.set_if_neq(DialogBox::showing(modal.display()));
            owned.dialog = true;
        }
        VillageView::Battle | VillageView::Confirm(_) => owned.dialog = true,
        VillageView::Menu(_) | VillageView::Closed if owned.dialog => {
            dialog.set_if_neq(DialogBox::default());
            owned.dialog = false;
        }
        _ => {}
    }
}

fn reset_village_on_transition(
    mut events: EventReader<ZoneTransitionEvent>,
    mut ui: ResMut<VillageUi>,
    mut focus: ResMut<TextEntryFocus>,
) {
    if events.read().last().is_some() {
        if ui.is_open() {
            ui.close();
        }
        focus.set_if_neq(TextEntryFocus(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_battle_summary_adds_equipped_effects() {
        let mut loot = LootTable::default();
        loot.zones.insert(
            "Village".into(),
            vec![LootItem {
                name: "Iron Sword".into(),
                stat_effects: BTreeMap::from([("health".to_string(), 20)]),
                resist: BTreeMap::new(),
                combat_effects: CombatEffects {
                    attack: 12,
                    evasion: 1,
                    defense: 2,
                },
                can_deposit: false,
            }],
        );
        let mut equipment = Equipment::default();
        equipment.equip("Iron Sword", &loot);
        let mut stats = PlayerStats::default();
        stats.health = 90;
        let text = battle_summary(&stats, &equipment, &loot);
        assert!(text.starts_with("Battle Stats:\nHealth: 100\nAttack: 12\nDefense: 2\nEvasion: 1"));
        assert!(text.ends_with("(Press SPACE to exit)"));
    }
}

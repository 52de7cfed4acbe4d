use bevy::prelude::*;
use crate::cooking::{is_cookable, CookingPhase, CookingProcess};
use crate::fire::{is_fuel, CampFires};
use crate::menu::{ListMenu, MenuOption, LIST_FOOTER};
use crate::shared::*;
use super::scene::{FuelSpot, CAMP_REACH};

/// How many of the chosen fuel item go in. LEFT/RIGHT moves within
/// `1..=max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityPicker {
    pub item: String,
    pub selected: u32,
    pub max: u32,
}

impl QuantityPicker {
    pub fn new(item: String, max: u32) -> Self {
        Self {
            item,
            selected: 1,
            max: max.max(1),
        }
    }

    pub fn decrease(&mut self) {
        self.selected = self.selected.saturating_sub(1).max(1);
    }

    pub fn increase(&mut self) {
        self.selected = (self.selected + 1).min(self.max);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StokingDialog {
    pub target: FuelKind,
    pub items: ListMenu<String>,
    pub quantity: Option<QuantityPicker>,
}

/// At most one camp dialog is open. Both are the shared list menu with
/// item names as commands.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum CampDialog {
    #[default]
    Closed,
    Stoking(StokingDialog),
    Cooking(ListMenu<String>),
}

impl CampDialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, CampDialog::Closed)
    }
}

fn stoking_menu(inventory: &Inventory) -> Option<ListMenu<String>> {
    let options: Vec<_> = inventory
        .iter()
        .filter(|i| is_fuel(&i.name) && i.quantity > 0)
        .map(|i| MenuOption::new(format!("{} (x{})", i.name, i.quantity), i.name.clone()))
        .collect();
    (!options.is_empty()).then(|| ListMenu::new("Select Item to Stoke", options))
}

fn cooking_menu(inventory: &Inventory) -> Option<ListMenu<String>> {
    let options: Vec<_> = inventory
        .iter()
        .filter(|i| is_cookable(&i.name))
        .map(|i| MenuOption::new(i.name.clone(), i.name.clone()))
        .collect();
    (!options.is_empty()).then(|| ListMenu::new("Select Item to Cook", options))
}

/// F near a fuel source, C at the campfire, ESC to break camp. Only while
/// no camp dialog is open.
pub fn camp_hotkeys(
    input: Res<PlayerInput>,
    mut dialog: ResMut<CampDialog>,
    mut inventory: ResMut<Inventory>,
    fires: Res<CampFires>,
    mut cooking: ResMut<CookingProcess>,
    session: Res<ZoneSession>,
    player: Query<&Transform, With<Player>>,
    spots: Query<(&FuelSpot, &Transform)>,
    mut toasts: EventWriter<ToastEvent>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
) {
    if dialog.is_open() {
        return;
    }

    if input.ui_cancel {
        info!("Breaking camp, heading back to the Village");
        transitions.send(ZoneTransitionEvent {
            target: SceneTarget::Zone(ZoneId::Village),
            inventory: inventory.snapshot(),
            prompt_count: session.prompt_count,
            reset_stats: false,
        });
        return;
    }

    if input.stoke {
        let Ok(player_tf) = player.get_single() else {
            return;
        };
        let here = player_tf.translation.truncate();
        // Campfire wins when both are in reach.
        let target = [FuelKind::Campfire, FuelKind::Torch].into_iter().find(|kind| {
            spots.iter().any(|(spot, tf)| {
                spot.0 == *kind && tf.translation.truncate().distance(here) < CAMP_REACH
            })
        });
        let Some(target) = target else {
            debug!("Stoke pressed with nothing in reach");
            return;
        };
        match stoking_menu(&inventory) {
            Some(items) => {
                *dialog = CampDialog::Stoking(StokingDialog {
                    target,
                    items,
                    quantity: None,
                });
            }
            None => {
                info!("No stoking items in inventory for {}", target.label());
                toasts.send(ToastEvent::short(format!(
                    "Nothing to burn in the {}.",
                    target.label()
                )));
            }
        }
        return;
    }

    if input.cook {
        match cooking.phase {
            CookingPhase::Complete => match cooking.claim(&mut inventory) {
                Ok(dish) => {
                    info!("Claimed {}", dish.name);
                    toasts.send(ToastEvent::short(format!("Claimed {}.", dish.name)));
                }
                Err(e) => warn!("Claim failed: {}", e),
            },
            CookingPhase::Cooking => {
                toasts.send(ToastEvent::short(format!(
                    "Cooking... {:.0}%",
                    cooking.progress() * 100.0
                )));
            }
            CookingPhase::Idle if !fires.campfire.is_lit => {
                toasts.send(ToastEvent::short("The campfire needs to be lit first."));
            }
            CookingPhase::Idle => match cooking_menu(&inventory) {
                Some(menu) => *dialog = CampDialog::Cooking(menu),
                None => {
                    info!("No food items in inventory");
                    toasts.send(ToastEvent::short("No food items in inventory!"));
                }
            },
        }
    }
}

/// Navigation inside an open stoking or cooking dialog.
pub fn camp_dialog_input(
    input: Res<PlayerInput>,
    mut pointer: ResMut<MenuPointer>,
    mut dialog: ResMut<CampDialog>,
    mut inventory: ResMut<Inventory>,
    mut fires: ResMut<CampFires>,
    mut cooking: ResMut<CookingProcess>,
    clock: Res<WallClock>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !dialog.is_open() || !(input.has_ui_action() || pointer.is_pending()) {
        return;
    }
    if input.ui_cancel {
        *dialog = CampDialog::Closed;
        return;
    }

    let mut close = false;
    match &mut *dialog {
        CampDialog::Closed => {}
        CampDialog::Stoking(stoking) => match stoking.quantity.as_mut() {
            None => {
                if let Some(item) = stoking.items.drive(&input, &mut pointer) {
                    let held = inventory.find_ignore_case(&item).map_or(0, |i| i.quantity);
                    stoking.quantity = Some(QuantityPicker::new(item, held));
                }
            }
            Some(picker) => {
                if input.ui_left {
                    picker.decrease();
                }
                if input.ui_right {
                    picker.increase();
                }
                if input.ui_confirm || input.submit {
                    let target = stoking.target;
                    match fires
                        .get_mut(target)
                        .stoke(&mut inventory, &picker.item, picker.selected)
                    {
                        Ok(report) => {
                            info!(
                                "Stoked {} with {} {}: stokes {:.1}, burn {}s",
                                target.label(),
                                picker.selected,
                                picker.item,
                                report.stoke_count,
                                report.burn_time_remaining
                            );
                            toasts.send(ToastEvent::short(format!(
                                "Stoked the {} with {} {}.",
                                target.label(),
                                picker.selected,
                                picker.item
                            )));
                        }
                        Err(e) => {
                            warn!("Stoking the {} failed: {}", target.label(), e);
                            toasts.send(ToastEvent::short(e.to_string()));
                        }
                    }
                    close = true;
                }
            }
        },
        CampDialog::Cooking(menu) => {
            if let Some(food) = menu.drive(&input, &mut pointer) {
                match cooking.start(fires.campfire.is_lit, &mut inventory, &food, clock.now_ms()) {
                    Ok(()) => toasts.send(ToastEvent::short(format!("Cooking {food}..."))),
                    Err(e) => {
                        warn!("Could not start cooking: {}", e);
                        toasts.send(ToastEvent::short(e.to_string()))
                    }
                };
                close = true;
            }
        }
    }
    if close {
        *dialog = CampDialog::Closed;
    }
}

/// Mirrors the open camp dialog into the shared menu view.
pub fn sync_camp_menu(dialog: Res<CampDialog>, mut display: ResMut<MenuDisplay>) {
    if !dialog.is_changed() {
        return;
    }
    let current = match &*dialog {
        CampDialog::Closed => None,
        CampDialog::Cooking(menu) => Some(menu.snapshot(LIST_FOOTER)),
        CampDialog::Stoking(StokingDialog {
            items,
            quantity: None,
            ..
        }) => Some(items.snapshot(LIST_FOOTER)),
        CampDialog::Stoking(StokingDialog {
            quantity: Some(picker),
            ..
        }) => Some(MenuSnapshot {
            title: format!("How many {} to use?", picker.item),
            rows: vec![format!("Quantity: {} (Max: {})", picker.selected, picker.max)],
            cursor_row: Some(0),
            footer: "(LEFT/RIGHT to adjust, SPACE to burn)".into(),
        }),
    };
    display.set_if_neq(MenuDisplay { current });
}

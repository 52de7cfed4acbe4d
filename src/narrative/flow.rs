use bevy::prelude::*;
use rand::Rng;
use crate::deferred::{DeferredActions, DeferredFired, DeferredKind};
use crate::menu::{ListMenu, MenuOption, LIST_FOOTER};
use crate::shared::*;
use super::outcome::{apply_item_effects, resolve_outcome};
use super::RESPAWN_DELAY_SECS;

/// Prompts answered before "Return to ..." is offered.
pub const RETURN_AFTER_PROMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceCommand {
    Option(usize),
    Return(ZoneId),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickCommand {
    Item(String),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    Use,
    Equip,
}

impl PickMode {
    fn verb(self) -> &'static str {
        match self {
            PickMode::Use => "use",
            PickMode::Equip => "equip",
        }
    }
}

/// Travel waiting on the confirm key. A return trip resets survival stats
/// and the prompt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTravel {
    pub target: ZoneId,
    pub returning: bool,
}

/// Transient state of one pass through the narrative chain.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct NarrativeFlow {
    pub active_prompt: Option<NarrativePrompt>,
    pub choices: Option<ListMenu<ChoiceCommand>>,
    pub pending_travel: Option<PendingTravel>,
    pub pick_mode: Option<PickMode>,
    pub item_pick: Option<ListMenu<PickCommand>>,
}

impl NarrativeFlow {
    pub fn clear(&mut self) {
        *self = NarrativeFlow::default();
    }

    pub fn menu_snapshot(&self) -> Option<MenuSnapshot> {
        if let Some(menu) = &self.item_pick {
            return Some(menu.snapshot(LIST_FOOTER));
        }
        self.choices.as_ref().map(|menu| menu.snapshot(LIST_FOOTER))
    }
}

/// The option list for a prompt, plus "Return to ..." once enough prompts
/// have been answered, plus "Back".
pub fn choices_menu(
    prompt: &NarrativePrompt,
    zone: ZoneId,
    prompt_count: u32,
) -> ListMenu<ChoiceCommand> {
    let mut options: Vec<_> = prompt
        .options
        .iter()
        .enumerate()
        .map(|(i, label)| MenuOption::new(label.clone(), ChoiceCommand::Option(i)))
        .collect();
    if prompt_count >= RETURN_AFTER_PROMPTS {
        if let Some(target) = zone.return_target() {
            options.push(MenuOption::new(
                format!("Return to {}", target.name()),
                ChoiceCommand::Return(target),
            ));
        }
    }
    options.push(MenuOption::new("Back", ChoiceCommand::Back));
    ListMenu::new("Pick one choice:", options)
}

/// Inventory rows plus Cancel. `None` when there is nothing to pick.
pub fn item_pick_menu(inventory: &Inventory, mode: PickMode) -> Option<ListMenu<PickCommand>> {
    if inventory.is_empty() {
        return None;
    }
    let mut options: Vec<_> = inventory
        .iter()
        .map(|i| {
            MenuOption::new(format!("{} x{}", i.name, i.quantity), PickCommand::Item(i.name.clone()))
        })
        .collect();
    options.push(MenuOption::new("Cancel", PickCommand::Cancel));
    Some(ListMenu::new(format!("Select an item to {}", mode.verb()), options))
}

fn pick<T>(items: &[T], rng: &mut impl Rng) -> Option<usize> {
    (!items.is_empty()).then(|| rng.gen_range(0..items.len()))
}

/// Rolls a prompt for the zone. Falls back to `None` with a warning when
/// the zone has none.
fn show_prompt(
    flow: &mut NarrativeFlow,
    dialog: &mut DialogBox,
    content: &NarrativeContent,
    zone: ZoneId,
    rng: &mut impl Rng,
) -> ScreenState {
    flow.choices = None;
    let prompts = content.prompts_for(zone);
    let Some(index) = pick(prompts, rng) else {
        warn!("No prompts for zone: {}", zone.name());
        flow.clear();
        dialog.hide();
        return ScreenState::None;
    };
    let prompt = prompts[index].clone();
    dialog.show(format!(
        "--- {} ---\n\n{}\n\n(Press SPACE to see choices)",
        zone.name(),
        prompt.prompt
    ));
    flow.active_prompt = Some(prompt);
    ScreenState::Prompt
}

fn end_flow(
    flow: &mut NarrativeFlow,
    dialog: &mut DialogBox,
    session: &mut ZoneSession,
    next_screen: &mut NextState<ScreenState>,
) {
    flow.clear();
    dialog.hide();
    session.prompt_count += 1;
    next_screen.set(ScreenState::None);
    info!("Narrative flow ended. Prompt count: {}", session.prompt_count);
}

/// Touching a marker opens a prologue, or goes straight to a prompt when
/// the zone has no prologues.
pub fn start_narrative(
    mut events: EventReader<NarrativeStartEvent>,
    screen: Res<State<ScreenState>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut flow: ResMut<NarrativeFlow>,
    mut dialog: ResMut<DialogBox>,
    content: Res<NarrativeContent>,
    session: Res<ZoneSession>,
) {
    if events.read().last().is_none() || *screen.get() != ScreenState::None {
        return;
    }
    let mut rng = rand::thread_rng();
    flow.clear();
    let prologues = content.prologues_for(session.zone);
    let next = match pick(prologues, &mut rng) {
        Some(index) => {
            dialog.show(format!("{}\n\n(Press SPACE to continue)", prologues[index]));
            ScreenState::Prologue
        }
        None => {
            debug!("No prologues for zone: {}", session.zone.name());
            show_prompt(&mut flow, &mut dialog, &content, session.zone, &mut rng)
        }
    };
    next_screen.set(next);
}

/// Drives whichever narrative screen is up.
pub fn narrative_input(
    input: Res<PlayerInput>,
    mut pointer: ResMut<MenuPointer>,
    screen: Res<State<ScreenState>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut flow: ResMut<NarrativeFlow>,
    mut dialog: ResMut<DialogBox>,
    mut stats: ResMut<PlayerStats>,
    mut equipment: ResMut<Equipment>,
    mut inventory: ResMut<Inventory>,
    loot: Res<LootTable>,
    content: Res<NarrativeContent>,
    mut session: ResMut<ZoneSession>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let current = *screen.get();
    if !current.is_narrative() || !(input.has_ui_action() || pointer.is_pending()) {
        return;
    }
    let zone = session.zone;
    let mut rng = rand::thread_rng();

    match current {
        ScreenState::Prologue => {
            if input.ui_confirm {
                let next = show_prompt(&mut flow, &mut dialog, &content, zone, &mut rng);
                next_screen.set(next);
            }
        }
        ScreenState::Prompt => {
            if !input.ui_confirm {
                return;
            }
            let Some(prompt) = flow.active_prompt.clone() else {
                warn!("Prompt screen with no active prompt");
                next_screen.set(ScreenState::None);
                return;
            };
            dialog.hide();
            flow.choices = Some(choices_menu(&prompt, zone, session.prompt_count));
            next_screen.set(ScreenState::Choices);
        }
        ScreenState::Choices => {
            let Some(command) = flow
                .choices
                .as_mut()
                .and_then(|menu| menu.drive(&input, &mut pointer))
            else {
                return;
            };
            match command {
                ChoiceCommand::Back => {
                    let next = show_prompt(&mut flow, &mut dialog, &content, zone, &mut rng);
                    next_screen.set(next);
                }
                ChoiceCommand::Return(target) => {
                    info!("Return option selected. Traveling to zone: {}", target.name());
                    flow.choices = None;
                    flow.pending_travel = Some(PendingTravel {
                        target,
                        returning: true,
                    });
                    dialog.show(format!(
                        "Returning to {}...\n(Press SPACE to continue)",
                        target.name()
                    ));
                    next_screen.set(ScreenState::Outcome);
                }
                ChoiceCommand::Option(index) => {
                    let text = flow
                        .active_prompt
                        .as_ref()
                        .and_then(|p| p.outcomes.get(index))
                        .cloned();
                    let Some(text) = text else {
                        warn!("Choice {} has no outcome", index);
                        end_flow(&mut flow, &mut dialog, &mut session, &mut next_screen);
                        return;
                    };
                    flow.choices = None;
                    let resolved = resolve_outcome(
                        &text,
                        zone,
                        &mut stats,
                        &equipment,
                        &mut inventory,
                        &loot,
                        &mut rng,
                    );
                    if resolved.low_stat_penalty > 0 {
                        info!(
                            "Health reduced by {} due to low stats",
                            resolved.low_stat_penalty
                        );
                    }
                    match resolved.travel {
                        Some(Ok(target)) => {
                            info!("Travel outcome: heading to {}", target.name());
                            flow.pending_travel = Some(PendingTravel {
                                target,
                                returning: false,
                            });
                            dialog.show(format!(
                                "Traveling to {}...\n(Press SPACE to continue)",
                                target.name()
                            ));
                        }
                        other => {
                            if let Some(Err(e)) = other {
                                warn!("Travel outcome ignored: {}", e);
                            }
                            dialog.show(format!(
                                "Outcome:\n\n{}\n\n(Press SPACE to continue)",
                                resolved.text
                            ));
                        }
                    }
                    next_screen.set(ScreenState::Outcome);
                }
            }
        }
        ScreenState::Outcome => {
            if !input.ui_confirm {
                return;
            }
            if let Some(travel) = flow.pending_travel.take() {
                transitions.send(ZoneTransitionEvent {
                    target: SceneTarget::Zone(travel.target),
                    inventory: inventory.snapshot(),
                    prompt_count: if travel.returning { 0 } else { session.prompt_count },
                    reset_stats: travel.returning,
                });
                return;
            }
            dialog.show(
                "Item Options:\nPress 'U' to Use Item\nPress 'E' to Equip Item\n\n(Press SPACE to continue playing)",
            );
            next_screen.set(ScreenState::ItemMenu);
        }
        ScreenState::ItemMenu => {
            let mode = if input.use_item {
                PickMode::Use
            } else if input.equip_item {
                PickMode::Equip
            } else {
                if input.ui_confirm {
                    end_flow(&mut flow, &mut dialog, &mut session, &mut next_screen);
                }
                return;
            };
            flow.pick_mode = Some(mode);
            flow.item_pick = item_pick_menu(&inventory, mode);
            if flow.item_pick.is_some() {
                dialog.hide();
            } else {
                dialog.show("Your inventory is empty.\n(Press SPACE to end)");
            }
            next_screen.set(ScreenState::ItemPick);
        }
        ScreenState::ItemPick => {
            let mode = flow.pick_mode.unwrap_or(PickMode::Use);
            if flow.item_pick.is_none() {
                if input.ui_confirm {
                    end_flow(&mut flow, &mut dialog, &mut session, &mut next_screen);
                }
                return;
            }
            let Some(command) = flow
                .item_pick
                .as_mut()
                .and_then(|menu| menu.drive(&input, &mut pointer))
            else {
                return;
            };
            if let PickCommand::Item(name) = command {
                match mode {
                    PickMode::Use => {
                        if apply_item_effects(&mut stats, loot.item(&name)) {
                            inventory.remove(&name, 1);
                            info!("Used {}", name);
                            toasts.send(ToastEvent::short(format!("Used {name}.")));
                        } else {
                            toasts.send(ToastEvent::short(format!("{name} has no usable effects.")));
                        }
                    }
                    PickMode::Equip => {
                        equipment.equip(&name, &loot);
                        info!("Equipped {}; resistances {:?}", name, equipment.resist);
                        toasts.send(ToastEvent::short(format!("Equipped {name}.")));
                    }
                }
            }
            end_flow(&mut flow, &mut dialog, &mut session, &mut next_screen);
        }
        _ => {}
    }
}

/// Zero health outside the Village mid-story: show the notice and queue
/// the respawn.
pub fn check_death(
    stats: Res<PlayerStats>,
    session: Res<ZoneSession>,
    screen: Res<State<ScreenState>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut flow: ResMut<NarrativeFlow>,
    mut dialog: ResMut<DialogBox>,
    mut deferred: ResMut<DeferredActions>,
) {
    if stats.health > 0
        || session.zone.is_village()
        || *screen.get() == ScreenState::None
        || deferred.is_pending(DeferredKind::RespawnInVillage)
    {
        return;
    }
    info!("Player died in {}", session.zone.name());
    flow.clear();
    next_screen.set(ScreenState::None);
    dialog.show("You have died!\nYou wake up in Village Commons...");
    deferred.schedule(DeferredKind::RespawnInVillage, RESPAWN_DELAY_SECS);
}

/// Back to the Village with whatever was carried into the first scavenger
/// zone.
pub fn respawn_after_death(
    mut fired: EventReader<DeferredFired>,
    session: Res<ZoneSession>,
    inventory: Res<Inventory>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
) {
    for DeferredFired(kind) in fired.read() {
        if *kind != DeferredKind::RespawnInVillage {
            continue;
        }
        let restored = session
            .initial_scavenger_inventory
            .clone()
            .unwrap_or_else(|| inventory.snapshot());
        info!("Respawning in the Village with {} item stack(s)", restored.len());
        transitions.send(ZoneTransitionEvent {
            target: SceneTarget::Zone(ZoneId::Village),
            inventory: restored,
            prompt_count: 0,
            reset_stats: true,
        });
    }
}

pub fn reset_flow_on_transition(
    mut events: EventReader<ZoneTransitionEvent>,
    mut flow: ResMut<NarrativeFlow>,
) {
    if events.read().last().is_some() {
        flow.set_if_neq(NarrativeFlow::default());
    }
}

/// Mirrors the choice or item list into the shared menu view. Clears the
/// view only when it was showing one of ours.
pub fn sync_narrative_menu(
    flow: Res<NarrativeFlow>,
    mut display: ResMut<MenuDisplay>,
    mut showing: Local<bool>,
) {
    if !flow.is_changed() {
        return;
    }
    match flow.menu_snapshot() {
        Some(snapshot) => {
            display.set_if_neq(MenuDisplay {
                current: Some(snapshot),
            });
            *showing = true;
        }
        None if *showing => {
            display.set_if_neq(MenuDisplay::default());
            *showing = false;
        }
        None => {}
    }
}

use bevy::prelude::*;
use crate::deferred::DeferredActions;
use crate::shared::*;
use super::layout::spawn_zone;
use super::ExclamationTimer;

/// Takes a scene handoff payload and rebuilds the world around it.
///
/// Zone-to-zone moves restart in place: zone entities are torn down and
/// respawned here rather than through a state round trip. Only the last
/// event of a frame is honoured.
pub fn apply_zone_transitions(
    mut commands: Commands,
    mut events: EventReader<ZoneTransitionEvent>,
    zone_entities: Query<Entity, With<ZoneEntity>>,
    scene: Res<State<GameScene>>,
    mut next_scene: ResMut<NextState<GameScene>>,
    mut next_screen: ResMut<NextState<ScreenState>>,
    mut session: ResMut<ZoneSession>,
    mut inventory: ResMut<Inventory>,
    mut stats: ResMut<PlayerStats>,
    mut deferred: ResMut<DeferredActions>,
    mut dialog: ResMut<DialogBox>,
    mut menu_display: ResMut<MenuDisplay>,
    mut exclamation_timer: ResMut<ExclamationTimer>,
) {
    let Some(event) = events.read().last().cloned() else {
        return;
    };

    deferred.cancel_all();
    for entity in &zone_entities {
        commands.entity(entity).despawn_recursive();
    }

    *inventory = Inventory::from_items(event.inventory);
    session.prompt_count = event.prompt_count;
    if event.reset_stats {
        stats.reset_for_zone();
    }
    next_screen.set(ScreenState::None);
    dialog.hide();
    menu_display.current = None;

    let wanted = match event.target {
        SceneTarget::Zone(zone) => {
            if !zone.is_village() && session.initial_scavenger_inventory.is_none() {
                info!("Scavenger inventory snapshot taken: {:?}", inventory.display_lines());
                session.initial_scavenger_inventory = Some(inventory.snapshot());
            }
            session.zone = zone;
            exclamation_timer.timer.reset();
            spawn_zone(&mut commands, zone, &mut rand::thread_rng());
            info!(
                "Entered {} ({}) with {} item stack(s), prompt count {}",
                zone.name(),
                zone.map_key(),
                inventory.len(),
                session.prompt_count
            );
            GameScene::Zone
        }
        SceneTarget::Camping => {
            info!("Heading to camp with {} item stack(s)", inventory.len());
            GameScene::Camping
        }
    };

    if *scene.get() != wanted {
        next_scene.set(wanted);
    }
}

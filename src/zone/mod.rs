//! Zones: the Village and the three scavenger zones. Owns scene handoff,
//! exclamation markers, and world interaction.

mod layout;
mod transition;

pub use layout::{Exclamation, VillageObject, EXCLAMATIONS_ON_ENTRY, ZONE_PLAYER_START};
pub use transition::apply_zone_transitions;

use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;

/// Seconds between extra exclamation spawns outside the Village.
pub const EXCLAMATION_INTERVAL_SECS: f32 = 10.0;

pub struct ZonePlugin;

impl Plugin for ZonePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExclamationTimer>();

        // Handoff runs in every scene: Loading boots into the Village and the
        // camp hands back through the same event.
        app.add_systems(Update, transition::apply_zone_transitions);

        app.add_systems(
            Update,
            (spawn_exclamations_over_time, zone_interact, cycle_zone)
                .after(transition::apply_zone_transitions)
                .run_if(in_state(GameScene::Zone)),
        );
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ExclamationTimer {
    pub timer: Timer,
}

impl Default for ExclamationTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(EXCLAMATION_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

fn spawn_exclamations_over_time(
    mut commands: Commands,
    time: Res<Time>,
    session: Res<ZoneSession>,
    mut timer: ResMut<ExclamationTimer>,
) {
    if session.zone.is_village() {
        return;
    }
    timer.timer.tick(time.delta());
    let due = timer.timer.times_finished_this_tick();
    if due == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    for _ in 0..due {
        layout::spawn_exclamation(&mut commands, &mut rng);
    }
    debug!("Spawned {} exclamation(s) in {}", due, session.zone.name());
}

/// World interaction while no screen is up: village sites in the Village,
/// exclamation markers everywhere else.
fn zone_interact(
    mut commands: Commands,
    input: Res<PlayerInput>,
    screen: Res<State<ScreenState>>,
    dialog: Res<DialogBox>,
    session: Res<ZoneSession>,
    player: Query<(&Transform, &HalfSize), With<Player>>,
    sites: Query<(&VillageObject, &Transform, &HalfSize)>,
    markers: Query<(Entity, &Transform, &HalfSize), With<Exclamation>>,
    mut village_events: EventWriter<VillageInteractionEvent>,
    mut narrative_events: EventWriter<NarrativeStartEvent>,
) {
    if !input.interact || *screen.get() != ScreenState::None || dialog.is_open() {
        return;
    }
    let Ok((player_tf, player_half)) = player.get_single() else {
        return;
    };
    let here = player_tf.translation.truncate();

    if session.zone.is_village() {
        let hit = sites.iter().find(|(_, tf, half)| {
            overlaps(here, player_half.0, tf.translation.truncate(), half.0)
        });
        match hit {
            Some((object, _, _)) => {
                info!("Village interaction: {}", object.site.key());
                village_events.send(VillageInteractionEvent { site: object.site });
            }
            None => debug!("Interact pressed, but nothing to interact with"),
        }
        return;
    }

    let hit = markers.iter().find(|(_, tf, half)| {
        overlaps(here, player_half.0, tf.translation.truncate(), half.0)
    });
    match hit {
        Some((entity, tf, _)) => {
            info!("Exclamation touched at {:?}", tf.translation.truncate());
            commands.entity(entity).despawn_recursive();
            narrative_events.send(NarrativeStartEvent);
        }
        None => debug!("Interact pressed, but no exclamation overlap"),
    }
}

/// Debug travel: Z steps through the zone list in order.
fn cycle_zone(
    input: Res<PlayerInput>,
    screen: Res<State<ScreenState>>,
    dialog: Res<DialogBox>,
    session: Res<ZoneSession>,
    inventory: Res<Inventory>,
    mut transitions: EventWriter<ZoneTransitionEvent>,
) {
    if !input.cycle_zone || *screen.get() != ScreenState::None || dialog.is_open() {
        return;
    }
    let next = session.zone.next_cyclic();
    info!("Cycling zone {} -> {}", session.zone.name(), next.name());
    transitions.send(ZoneTransitionEvent {
        target: SceneTarget::Zone(next),
        inventory: inventory.snapshot(),
        prompt_count: session.prompt_count,
        reset_stats: false,
    });
}

/// Picks a marker position inside the play area, 50 px clear of the edges.
pub fn random_marker_position(rng: &mut impl Rng) -> Vec2 {
    let half_w = ZONE_WIDTH / 2.0 - 50.0;
    let half_h = ZONE_HEIGHT / 2.0 - 50.0;
    Vec2::new(rng.gen_range(-half_w..=half_w), rng.gen_range(-half_h..=half_h))
}

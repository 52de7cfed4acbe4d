use bevy::prelude::*;
use crate::cooking::{restore_process, CookingProcess};
use crate::fire::CampFires;
use crate::registry::{CookingRecord, FuelRecord, SceneRegistry};
use crate::shared::*;
use super::{CampClock, CampDialog};

/// How close the player must stand to stoke a fuel source.
pub const CAMP_REACH: f32 = 50.0;

pub const CAMP_PLAYER_START: Vec2 = Vec2::new(0.0, -40.0);
pub const CAMPFIRE_POS: Vec2 = Vec2::new(0.0, 40.0);
pub const TORCH_POS: Vec2 = Vec2::new(120.0, 40.0);

/// Marks the campfire or torch sprite.
#[derive(Component, Debug, Clone, Copy)]
pub struct FuelSpot(pub FuelKind);

/// Seeds the camp when arriving empty-handed, then restores fire, torch and
/// skillet from the registry.
pub fn enter_camp(
    mut commands: Commands,
    mut inventory: ResMut<Inventory>,
    registry: Res<SceneRegistry>,
    clock: Res<WallClock>,
    mut fires: ResMut<CampFires>,
    mut cooking: ResMut<CookingProcess>,
    mut camp_clock: ResMut<CampClock>,
    mut dialog: ResMut<CampDialog>,
) {
    if inventory.is_empty() {
        inventory.add("wood", 1);
        inventory.add("cod", 1);
        info!("Arrived at camp with nothing; seeded wood and cod");
    }

    for kind in [FuelKind::Campfire, FuelKind::Torch] {
        *fires.get_mut(kind) = registry.fuel(kind).restore(kind);
    }
    *cooking = restore_process(&registry.cooking(), fires.campfire.is_lit, clock.now_ms());
    camp_clock.timer.reset();
    *dialog = CampDialog::Closed;

    info!(
        "Camp restored: campfire lit={} burn={}s, torch lit={} burn={}s, skillet {:?}",
        fires.campfire.is_lit,
        fires.campfire.burn_time_remaining,
        fires.torch.is_lit,
        fires.torch.burn_time_remaining,
        cooking.phase
    );

    spawn_camp(&mut commands, &fires);
}

fn spawn_camp(commands: &mut Commands, fires: &CampFires) {
    commands.spawn((
        Player,
        CampEntity,
        Velocity::default(),
        WalkSpeed(CAMP_PLAYER_SPEED),
        HalfSize(Vec2::splat(12.0)),
        Sprite::from_color(Color::srgb(0.85, 0.8, 0.7), Vec2::splat(24.0)),
        Transform::from_translation(CAMP_PLAYER_START.extend(2.0)),
    ));

    for (kind, pos) in [(FuelKind::Campfire, CAMPFIRE_POS), (FuelKind::Torch, TORCH_POS)] {
        let source = fires.get(kind);
        commands.spawn((
            FuelSpot(kind),
            CampEntity,
            Sprite::from_color(flame_color(source.is_lit), Vec2::new(32.0, 48.0)),
            Transform::from_translation(pos.extend(1.0)).with_scale(Vec3::splat(source.scale)),
        ));
    }
}

fn flame_color(lit: bool) -> Color {
    if lit {
        Color::srgb(1.0, 0.67, 0.2)
    } else {
        Color::srgb(0.45, 0.45, 0.5)
    }
}

/// Writes all three camp records. Runs whenever fire, torch or skillet change.
pub fn persist_camp_state(
    fires: Res<CampFires>,
    cooking: Res<CookingProcess>,
    mut registry: ResMut<SceneRegistry>,
) {
    write_records(&fires, &cooking, &mut registry);
}

fn write_records(fires: &CampFires, cooking: &CookingProcess, registry: &mut SceneRegistry) {
    registry.set_cooking(CookingRecord::from(cooking));
    registry.set_fuel(FuelKind::Campfire, FuelRecord::from(&fires.campfire));
    registry.set_fuel(FuelKind::Torch, FuelRecord::from(&fires.torch));
}

/// Leaving the camp: persist, tear down, forget dialogs.
pub fn exit_camp(
    mut commands: Commands,
    fires: Res<CampFires>,
    cooking: Res<CookingProcess>,
    mut registry: ResMut<SceneRegistry>,
    mut dialog: ResMut<CampDialog>,
    mut menu_display: ResMut<MenuDisplay>,
    mut deferred: ResMut<crate::deferred::DeferredActions>,
    entities: Query<Entity, With<CampEntity>>,
) {
    write_records(&fires, &cooking, &mut registry);
    match registry.snapshot_json() {
        Ok(json) => debug!("Scene registry on leaving camp:\n{}", json),
        Err(e) => warn!("{}", e),
    }
    *dialog = CampDialog::Closed;
    menu_display.current = None;
    deferred.cancel_all();
    for entity in &entities {
        commands.entity(entity).despawn_recursive();
    }
}

/// Scales and tints the fuel sprites to match their sources.
pub fn sync_fire_visuals(
    fires: Res<CampFires>,
    mut spots: Query<(&FuelSpot, &mut Transform, &mut Sprite)>,
) {
    if !fires.is_changed() {
        return;
    }
    for (spot, mut transform, mut sprite) in &mut spots {
        let source = fires.get(spot.0);
        transform.scale = Vec3::splat(source.scale);
        sprite.color = flame_color(source.is_lit);
    }
}

use bevy::prelude::*;
use crate::shared::*;

/// Half extents of the walkable area, centred on the origin.
pub const PLAY_AREA_HALF: Vec2 = Vec2::new(ZONE_WIDTH / 2.0, ZONE_HEIGHT / 2.0);

/// Turns the movement axis into velocity.
///
/// Any screen other than `None`, any open list menu (the camp dialogs), or
/// an open dialog box owns the input: velocity is written as zero every
/// frame so nothing drifts while a menu is up.
pub fn player_movement(
    input: Res<PlayerInput>,
    screen: Res<State<ScreenState>>,
    menu: Res<MenuDisplay>,
    dialog: Res<DialogBox>,
    mut query: Query<(&mut Velocity, &WalkSpeed), With<Player>>,
) {
    let frozen = screen.get().blocks_movement() || menu.current.is_some() || dialog.is_open();
    for (mut velocity, speed) in &mut query {
        velocity.0 = if frozen || input.move_axis == Vec2::ZERO {
            Vec2::ZERO
        } else {
            input.move_axis.normalize_or_zero() * speed.0
        };
    }
}

/// Integrates velocity and keeps the player inside the play area.
pub fn apply_velocity(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &Velocity, Option<&HalfSize>), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut transform, velocity, half) in &mut query {
        if velocity.0 == Vec2::ZERO {
            continue;
        }
        let margin = half.map_or(Vec2::ZERO, |h| h.0);
        let limit = (PLAY_AREA_HALF - margin).max(Vec2::ZERO);
        let next = (transform.translation.truncate() + velocity.0 * dt).clamp(-limit, limit);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

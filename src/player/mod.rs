mod movement;

pub use movement::{apply_velocity, player_movement, PLAY_AREA_HALF};

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Walking exists in zones and at camp; both share the same gate.
        app.add_systems(
            Update,
            (movement::player_movement, movement::apply_velocity)
                .chain()
                .run_if(in_state(GameScene::Zone).or(in_state(GameScene::Camping))),
        );
    }
}

//! The camp: campfire, torch, skillet, and the dialogs that drive them.

pub mod dialogs;
pub mod scene;
pub mod tick;

pub use dialogs::{CampDialog, QuantityPicker, StokingDialog};
pub use scene::{FuelSpot, CAMP_REACH};
pub use tick::CampClock;

use bevy::prelude::*;
use crate::cooking::CookingProcess;
use crate::fire::CampFires;
use crate::shared::*;

pub struct CampingPlugin;

impl Plugin for CampingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CampFires>()
            .init_resource::<CookingProcess>()
            .init_resource::<CampClock>()
            .init_resource::<CampDialog>();

        app.add_systems(OnEnter(GameScene::Camping), scene::enter_camp);
        app.add_systems(OnExit(GameScene::Camping), scene::exit_camp);

        app.add_systems(
            Update,
            (
                tick::camp_tick,
                dialogs::camp_hotkeys,
                dialogs::camp_dialog_input,
                scene::persist_camp_state.run_if(
                    resource_changed::<CampFires>.or(resource_changed::<CookingProcess>),
                ),
                dialogs::sync_camp_menu,
                scene::sync_fire_visuals,
            )
                .chain()
                .run_if(in_state(GameScene::Camping)),
        );
    }
}

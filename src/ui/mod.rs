//! Everything drawn on top of the world: dialog box, list menu, HUD, camp
//! meters and toasts. Domains never touch UI nodes; they write the shared
//! `DialogBox`, `MenuDisplay` and `ToastEvent` contract and this plugin
//! renders it.

mod dialog_box;
mod hud;
mod menu_view;
mod toast;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                hud::spawn_hud,
                dialog_box::spawn_dialog_box,
                toast::spawn_toast_container,
            ),
        );

        // ─── SHARED CONTRACT, every scene ───
        app.add_systems(
            Update,
            (
                hud::update_hud,
                dialog_box::update_dialog_box,
                menu_view::rebuild_menu_view,
                toast::wire_extinguish_toasts,
                toast::handle_toast_events,
                toast::update_toasts,
            )
                .chain(),
        );

        // Clicks land before the domains read MenuPointer.
        app.add_systems(PreUpdate, menu_view::menu_row_clicks.after(bevy::ui::UiSystem::Focus));

        // ─── CAMP METERS ───
        app.add_systems(OnEnter(GameScene::Camping), hud::spawn_camp_meters);
        app.add_systems(OnExit(GameScene::Camping), hud::despawn_camp_meters);
        app.add_systems(
            Update,
            hud::update_camp_meters.run_if(in_state(GameScene::Camping)),
        );
    }
}

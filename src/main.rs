mod shared;
mod input;
mod data;
mod menu;
mod deferred;
mod registry;
mod fire;
mod cooking;
mod player;
mod zone;
mod narrative;
mod village;
mod camping;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Emberwild".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Scene and screen registers
        .init_state::<GameScene>()
        .init_state::<ScreenState>()
        // Shared resources
        .init_resource::<Inventory>()
        .init_resource::<PlayerStats>()
        .init_resource::<Equipment>()
        .init_resource::<ZoneSession>()
        .init_resource::<registry::SceneRegistry>()
        .init_resource::<WallClock>()
        .init_resource::<LootTable>()
        .init_resource::<NarrativeContent>()
        // UI contract
        .init_resource::<DialogBox>()
        .init_resource::<MenuDisplay>()
        .init_resource::<MenuPointer>()
        .init_resource::<TextEntryFocus>()
        // Input
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>()
        .init_resource::<KeyBindings>()
        // Events
        .add_event::<ToastEvent>()
        .add_event::<ZoneTransitionEvent>()
        .add_event::<FireExtinguishedEvent>()
        .add_event::<VillageInteractionEvent>()
        .add_event::<NarrativeStartEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(deferred::DeferredPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(zone::ZonePlugin)
        .add_plugins(narrative::NarrativePlugin)
        .add_plugins(village::VillagePlugin)
        .add_plugins(camping::CampingPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

//! Scavenger-zone storytelling: the narrative screen chain, outcome
//! effects, item use, and death.

pub mod flow;
pub mod outcome;

pub use flow::{ChoiceCommand, NarrativeFlow, PendingTravel, PickCommand, PickMode, RETURN_AFTER_PROMPTS};
pub use outcome::{resolve_outcome, ResolvedOutcome, TravelError};

use bevy::prelude::*;
use crate::shared::*;

/// Delay between the death notice and waking up in the Village.
pub const RESPAWN_DELAY_SECS: f32 = 2.0;

pub struct NarrativePlugin;

impl Plugin for NarrativePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NarrativeFlow>();

        app.add_systems(
            Update,
            (
                flow::start_narrative,
                flow::narrative_input,
                flow::check_death,
                flow::sync_narrative_menu,
            )
                .chain()
                .after(crate::zone::apply_zone_transitions)
                .after(crate::village::sync_village_display)
                .run_if(in_state(GameScene::Zone)),
        );

        // The respawn may fire after the flow has already been reset, so it
        // listens in every scene.
        app.add_systems(
            Update,
            (flow::respawn_after_death, flow::reset_flow_on_transition),
        );
    }
}

use bevy::prelude::*;
use crate::cooking::{CookingProcess, CookingTick};
use crate::fire::CampFires;
use crate::shared::*;

/// The camp's single 1 Hz clock. Burning and cooking both step on it.
#[derive(Resource, Debug, Clone)]
pub struct CampClock {
    pub timer: Timer,
}

impl Default for CampClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Each whole second: burn both sources, drop an unfinished dish if the
/// campfire just went out, then advance the skillet.
pub fn camp_tick(
    time: Res<Time>,
    mut clock: ResMut<CampClock>,
    mut fires: ResMut<CampFires>,
    mut cooking: ResMut<CookingProcess>,
    mut extinguished: EventWriter<FireExtinguishedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    clock.timer.tick(time.delta());
    let seconds = clock.timer.times_finished_this_tick();

    for _ in 0..seconds {
        for kind in fires.burn_second() {
            info!("The {} burned out", kind.label());
            extinguished.send(FireExtinguishedEvent { kind });
            if kind == FuelKind::Campfire && cooking.discard() {
                info!("Cooking stopped: fire is out");
                toasts.send(ToastEvent::short("Cooking stopped: the fire is out!"));
            }
        }

        if !cooking.is_cooking() {
            continue;
        }
        match cooking.tick(fires.campfire.is_lit) {
            CookingTick::Completed => {
                info!("Cooking complete");
                toasts.send(ToastEvent::short("Cooking complete! Press C to claim."));
            }
            CookingTick::Progressed(progress) => {
                debug!("Cooking {:.0}%", progress * 100.0);
            }
            CookingTick::Idle => {}
        }
    }
}

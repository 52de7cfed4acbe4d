//! One-shot delayed actions that die with the scene that scheduled them.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    RespawnInVillage,
}

#[derive(Debug, Clone)]
struct DeferredAction {
    kind: DeferredKind,
    timer: Timer,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DeferredActions {
    pending: Vec<DeferredAction>,
}

impl DeferredActions {
    pub fn schedule(&mut self, kind: DeferredKind, delay_secs: f32) {
        self.pending.push(DeferredAction {
            kind,
            timer: Timer::from_seconds(delay_secs, TimerMode::Once),
        });
    }

    pub fn is_pending(&self, kind: DeferredKind) -> bool {
        self.pending.iter().any(|a| a.kind == kind)
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            debug!("Cancelling {} deferred action(s)", self.pending.len());
        }
        self.pending.clear();
    }

    /// Advances every timer; returns the actions that came due, in the
    /// order they were scheduled.
    pub fn advance(&mut self, delta: std::time::Duration) -> Vec<DeferredKind> {
        let mut due = Vec::new();
        self.pending.retain_mut(|action| {
            action.timer.tick(delta);
            if action.timer.finished() {
                due.push(action.kind);
                false
            } else {
                true
            }
        });
        due
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct DeferredFired(pub DeferredKind);

pub struct DeferredPlugin;

impl Plugin for DeferredPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeferredActions>()
            .add_event::<DeferredFired>()
            .add_systems(Update, tick_deferred_actions);
    }
}

pub fn tick_deferred_actions(
    time: Res<Time>,
    mut actions: ResMut<DeferredActions>,
    mut fired: EventWriter<DeferredFired>,
) {
    if actions.pending.is_empty() {
        return;
    }
    for kind in actions.advance(time.delta()) {
        fired.send(DeferredFired(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fires_once_after_delay() {
        let mut actions = DeferredActions::default();
        actions.schedule(DeferredKind::RespawnInVillage, 2.0);
        assert!(actions.advance(Duration::from_millis(1500)).is_empty());
        assert_eq!(
            actions.advance(Duration::from_millis(500)),
            vec![DeferredKind::RespawnInVillage]
        );
        assert!(actions.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_cancelled_actions_never_fire() {
        let mut actions = DeferredActions::default();
        actions.schedule(DeferredKind::RespawnInVillage, 2.0);
        actions.cancel_all();
        assert!(!actions.is_pending(DeferredKind::RespawnInVillage));
        assert!(actions.advance(Duration::from_secs(3)).is_empty());
    }
}

use super::process::{CookingPhase, CookingProcess, COOKING_DURATION_SECS};
use crate::registry::CookingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub phase: CookingPhase,
    pub elapsed_seconds: u32,
}

/// Folds the wall-clock time spent away from the camp into a persisted
/// cooking record.
///
/// Time away counts whether or not the fire was still burning. If that is
/// enough to finish the dish it is complete; otherwise it keeps cooking only
/// if the campfire is lit now, and is lost if not.
pub fn reconcile_elapsed(persisted: &CookingRecord, fire_lit: bool, now_ms: u64) -> Reconciled {
    let active = persisted.is_cooking || persisted.is_complete;
    if !active || persisted.started_at_ms == 0 {
        let phase = if persisted.is_complete {
            CookingPhase::Complete
        } else if persisted.is_cooking {
            CookingPhase::Cooking
        } else {
            CookingPhase::Idle
        };
        return Reconciled {
            phase,
            elapsed_seconds: persisted.elapsed_seconds,
        };
    }

    let away_secs = (now_ms.saturating_sub(persisted.started_at_ms) / 1000) as u32;
    let adjusted = persisted.elapsed_seconds.saturating_add(away_secs);

    if adjusted >= COOKING_DURATION_SECS {
        Reconciled {
            phase: CookingPhase::Complete,
            elapsed_seconds: adjusted,
        }
    } else if fire_lit {
        Reconciled {
            phase: CookingPhase::Cooking,
            elapsed_seconds: adjusted,
        }
    } else {
        Reconciled {
            phase: CookingPhase::Idle,
            elapsed_seconds: 0,
        }
    }
}

/// Rebuilds the live process from the registry record.
pub fn restore_process(persisted: &CookingRecord, fire_lit: bool, now_ms: u64) -> CookingProcess {
    let reconciled = reconcile_elapsed(persisted, fire_lit, now_ms);
    match reconciled.phase {
        CookingPhase::Idle => CookingProcess::default(),
        phase => CookingProcess {
            phase,
            elapsed_seconds: reconciled.elapsed_seconds,
            duration_target: COOKING_DURATION_SECS,
            result_item: persisted.result_item.clone(),
            started_at_ms: persisted.started_at_ms,
        },
    }
}

//! Process-lifetime store for camp state that must outlive the camp scene.
//!
//! Typed slots replace a stringly-keyed bag: each slot is `None` until first
//! written, and readers get the documented fallback record instead.

use bevy::prelude::*;
use crate::cooking::{CookingPhase, CookingProcess};
use crate::fire::{FuelSource, BASE_LIGHT_RADIUS};
use crate::shared::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingRecord {
    pub is_cooking: bool,
    pub elapsed_seconds: u32,
    pub is_complete: bool,
    pub result_item: Option<InventoryItem>,
    pub started_at_ms: u64,
}

impl Default for CookingRecord {
    fn default() -> Self {
        Self {
            is_cooking: false,
            elapsed_seconds: 0,
            is_complete: false,
            result_item: None,
            started_at_ms: 0,
        }
    }
}

impl From<&CookingProcess> for CookingRecord {
    fn from(process: &CookingProcess) -> Self {
        Self {
            is_cooking: process.phase == CookingPhase::Cooking,
            elapsed_seconds: process.elapsed_seconds,
            is_complete: process.phase == CookingPhase::Complete,
            result_item: process.result_item.clone(),
            started_at_ms: process.started_at_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub is_lit: bool,
    pub burn_time: u32,
    pub current_stokes: f32,
    pub light_radius: f32,
    pub scale: f32,
    pub origin_y: f32,
}

impl FuelRecord {
    pub fn fallback(kind: FuelKind) -> Self {
        let profile = kind.profile();
        Self {
            is_lit: false,
            burn_time: 0,
            current_stokes: 0.0,
            light_radius: BASE_LIGHT_RADIUS,
            scale: profile.base_scale,
            origin_y: profile.base_origin_y,
        }
    }

    pub fn restore(&self, kind: FuelKind) -> FuelSource {
        FuelSource {
            kind,
            stoke_count: self.current_stokes,
            burn_time_remaining: self.burn_time,
            light_radius: self.light_radius,
            scale: self.scale,
            origin_y: self.origin_y,
            is_lit: self.is_lit,
        }
    }
}

impl From<&FuelSource> for FuelRecord {
    fn from(source: &FuelSource) -> Self {
        Self {
            is_lit: source.is_lit,
            burn_time: source.burn_time_remaining,
            current_stokes: source.stoke_count,
            light_radius: source.light_radius,
            scale: source.scale,
            origin_y: source.origin_y,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneRegistry {
    cooking_state: Option<CookingRecord>,
    fire_state: Option<FuelRecord>,
    torch_state: Option<FuelRecord>,
}

impl SceneRegistry {
    pub fn cooking(&self) -> CookingRecord {
        self.cooking_state.clone().unwrap_or_default()
    }

    pub fn set_cooking(&mut self, record: CookingRecord) {
        self.cooking_state = Some(record);
    }

    pub fn fuel(&self, kind: FuelKind) -> FuelRecord {
        let slot = match kind {
            FuelKind::Campfire => &self.fire_state,
            FuelKind::Torch => &self.torch_state,
        };
        slot.clone().unwrap_or_else(|| FuelRecord::fallback(kind))
    }

    pub fn set_fuel(&mut self, kind: FuelKind, record: FuelRecord) {
        match kind {
            FuelKind::Campfire => self.fire_state = Some(record),
            FuelKind::Torch => self.torch_state = Some(record),
        }
    }

    /// Pretty JSON of every slot, for debug logging.
    pub fn snapshot_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Registry serialization failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slots_fall_back() {
        let registry = SceneRegistry::default();
        let fire = registry.fuel(FuelKind::Campfire);
        assert!(!fire.is_lit);
        assert_eq!(fire.burn_time, 0);
        assert_eq!(fire.light_radius, 150.0);
        assert_eq!(fire.scale, 1.5);
        assert_eq!(fire.origin_y, 0.75);

        let torch = registry.fuel(FuelKind::Torch);
        assert_eq!(torch.scale, 0.75);
        assert_eq!(torch.origin_y, 0.75);
        assert_eq!(registry.cooking(), CookingRecord::default());
    }

    #[test]
    fn test_written_zero_values_are_kept() {
        let mut registry = SceneRegistry::default();
        let mut fire = FuelSource::new(FuelKind::Campfire);
        fire.extinguish();
        registry.set_fuel(FuelKind::Campfire, FuelRecord::from(&fire));
        let restored = registry.fuel(FuelKind::Campfire).restore(FuelKind::Campfire);
        assert_eq!(restored.light_radius, 0.0);
        assert_eq!(restored.scale, 0.5);
    }

    #[test]
    fn test_snapshot_json_names_slots() {
        let mut registry = SceneRegistry::default();
        registry.set_cooking(CookingRecord::default());
        let json = registry.snapshot_json().unwrap();
        assert!(json.contains("cooking_state"));
        assert!(json.contains("torch_state"));
    }
}

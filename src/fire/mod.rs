//! Campfire and torch fuel simulation.

pub mod fuel;

pub use fuel::*;

use bevy::prelude::*;
use crate::shared::*;

/// Both fuel sources of the camp.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CampFires {
    pub campfire: FuelSource,
    pub torch: FuelSource,
}

impl Default for CampFires {
    fn default() -> Self {
        Self {
            campfire: FuelSource::new(FuelKind::Campfire),
            torch: FuelSource::new(FuelKind::Torch),
        }
    }
}

impl CampFires {
    pub fn get(&self, kind: FuelKind) -> &FuelSource {
        match kind {
            FuelKind::Campfire => &self.campfire,
            FuelKind::Torch => &self.torch,
        }
    }

    pub fn get_mut(&mut self, kind: FuelKind) -> &mut FuelSource {
        match kind {
            FuelKind::Campfire => &mut self.campfire,
            FuelKind::Torch => &mut self.torch,
        }
    }

    /// One second for both sources, independently. Returns whichever went
    /// out on this second.
    pub fn burn_second(&mut self) -> Vec<FuelKind> {
        let mut out = Vec::new();
        for kind in [FuelKind::Campfire, FuelKind::Torch] {
            if self.get_mut(kind).burn_second() == BurnTick::Extinguished {
                out.push(kind);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_burn_independently() {
        let mut fires = CampFires::default();
        let mut inventory = Inventory::from_items([
            InventoryItem::new("wood", 1),
            InventoryItem::new("lint", 1),
        ]);
        fires.campfire.stoke(&mut inventory, "wood", 1).unwrap();
        fires.torch.stoke(&mut inventory, "lint", 1).unwrap();

        let mut torch_out_at = None;
        for second in 1..=90 {
            let out = fires.burn_second();
            if out.contains(&FuelKind::Torch) {
                torch_out_at = Some(second);
            }
            if second < 90 {
                assert!(fires.campfire.is_lit);
            }
        }
        assert_eq!(torch_out_at, Some(3));
        assert!(!fires.campfire.is_lit);
    }
}

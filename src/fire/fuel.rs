use crate::shared::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────────────────────────────────────
// TUNING
// ──────────────────────────────────────────────────────────────────────────────

pub const MAX_STOKES: f32 = 7.0;
pub const BURN_SECONDS_PER_STOKE: f32 = 30.0;
pub const MAX_LIGHT_RADIUS: f32 = 400.0;
pub const BASE_LIGHT_RADIUS: f32 = 150.0;
pub const RADIUS_PER_STOKE: f32 = 20.0;
pub const SCALE_PER_STOKE: f32 = 0.1;
pub const ORIGIN_Y_PER_STOKE: f32 = 0.01;
pub const WOOD_FUEL_VALUE: f32 = 3.0;
pub const KINDLING_FUEL_VALUE: f32 = 0.1;

/// Visual envelope of one fuel source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelProfile {
    pub base_scale: f32,
    pub max_scale: f32,
    pub unlit_scale: f32,
    pub base_origin_y: f32,
    pub max_origin_y: f32,
}

impl FuelKind {
    pub fn profile(self) -> FuelProfile {
        match self {
            FuelKind::Campfire => FuelProfile {
                base_scale: 1.5,
                max_scale: 3.0,
                unlit_scale: 0.5,
                base_origin_y: 0.75,
                max_origin_y: 1.0,
            },
            FuelKind::Torch => FuelProfile {
                base_scale: 0.75,
                max_scale: 1.5,
                unlit_scale: 0.25,
                base_origin_y: 0.75,
                max_origin_y: 1.0,
            },
        }
    }
}

/// Stoke units per item. "wood" anywhere in the name burns well; lint and
/// trash barely help; anything else is not fuel.
pub fn fuel_value(item_name: &str) -> f32 {
    let name = item_name.to_lowercase();
    if name.contains("wood") {
        WOOD_FUEL_VALUE
    } else if name == "lint" || name == "trash" {
        KINDLING_FUEL_VALUE
    } else {
        0.0
    }
}

pub fn is_fuel(item_name: &str) -> bool {
    fuel_value(item_name) > 0.0
}

// ──────────────────────────────────────────────────────────────────────────────
// ERRORS
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StokeError {
    MaxStokesReached,
    NotFuel { item: String },
    InvalidQuantity,
    NotEnough { item: String, have: u32, wanted: u32 },
}

impl fmt::Display for StokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StokeError::MaxStokesReached => write!(f, "Max stokes reached"),
            StokeError::NotFuel { item } => write!(f, "{item} won't burn"),
            StokeError::InvalidQuantity => write!(f, "Pick at least one to burn"),
            StokeError::NotEnough { item, have, wanted } => {
                write!(f, "Only {have} {item} on hand (wanted {wanted})")
            }
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// FUEL SOURCE
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSource {
    pub kind: FuelKind,
    pub stoke_count: f32,
    pub burn_time_remaining: u32,
    pub light_radius: f32,
    pub scale: f32,
    pub origin_y: f32,
    pub is_lit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StokeReport {
    pub added: f32,
    pub stoke_count: f32,
    pub burn_time_remaining: u32,
    pub lit_now: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnTick {
    Idle,
    Burning,
    Extinguished,
}

impl FuelSource {
    /// Unlit, never-stoked baseline.
    pub fn new(kind: FuelKind) -> Self {
        let profile = kind.profile();
        Self {
            kind,
            stoke_count: 0.0,
            burn_time_remaining: 0,
            light_radius: BASE_LIGHT_RADIUS,
            scale: profile.base_scale,
            origin_y: profile.base_origin_y,
            is_lit: false,
        }
    }

    /// Burns `quantity` of `item_name` from the inventory. Nothing is
    /// touched unless every check passes.
    pub fn stoke(
        &mut self,
        inventory: &mut Inventory,
        item_name: &str,
        quantity: u32,
    ) -> Result<StokeReport, StokeError> {
        if self.stoke_count >= MAX_STOKES {
            return Err(StokeError::MaxStokesReached);
        }
        let value = fuel_value(item_name);
        if value <= 0.0 {
            return Err(StokeError::NotFuel {
                item: item_name.to_string(),
            });
        }
        if quantity == 0 {
            return Err(StokeError::InvalidQuantity);
        }
        let Some(held) = inventory.find_ignore_case(item_name) else {
            return Err(StokeError::NotEnough {
                item: item_name.to_string(),
                have: 0,
                wanted: quantity,
            });
        };
        if held.quantity < quantity {
            return Err(StokeError::NotEnough {
                item: held.name.clone(),
                have: held.quantity,
                wanted: quantity,
            });
        }

        let stored_name = held.name.clone();
        inventory.remove(&stored_name, quantity);

        let profile = self.kind.profile();
        let total = value * quantity as f32;
        self.stoke_count = (self.stoke_count + total).min(MAX_STOKES);
        self.burn_time_remaining = (self.stoke_count * BURN_SECONDS_PER_STOKE).round() as u32;
        self.light_radius = (self.light_radius + RADIUS_PER_STOKE * total).min(MAX_LIGHT_RADIUS);
        self.scale = (self.scale + SCALE_PER_STOKE * total).min(profile.max_scale);
        self.origin_y = (self.origin_y + ORIGIN_Y_PER_STOKE * total).min(profile.max_origin_y);
        let lit_now = !self.is_lit;
        self.is_lit = true;

        Ok(StokeReport {
            added: total,
            stoke_count: self.stoke_count,
            burn_time_remaining: self.burn_time_remaining,
            lit_now,
        })
    }

    /// Back to the unlit baseline. Safe to call repeatedly.
    pub fn extinguish(&mut self) {
        self.light_radius = 0.0;
        self.scale = self.kind.profile().unlit_scale;
        self.is_lit = false;
        self.stoke_count = 0.0;
        self.burn_time_remaining = 0;
    }

    /// One second of burning.
    pub fn burn_second(&mut self) -> BurnTick {
        if self.burn_time_remaining > 0 {
            self.burn_time_remaining -= 1;
            if self.burn_time_remaining == 0 {
                self.extinguish();
                return BurnTick::Extinguished;
            }
            return BurnTick::Burning;
        }
        if self.is_lit {
            self.extinguish();
            return BurnTick::Extinguished;
        }
        BurnTick::Idle
    }

    /// Remaining burn as a fraction of the longest possible burn.
    pub fn burn_fraction(&self) -> f32 {
        (self.burn_time_remaining as f32 / (MAX_STOKES * BURN_SECONDS_PER_STOKE)).clamp(0.0, 1.0)
    }
}

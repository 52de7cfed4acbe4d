use bevy::prelude::*;
use crate::shared::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const COOKING_DURATION_SECS: u32 = 30;

/// Raw catches that can go in the skillet.
pub const COOKABLE_FOODS: &[&str] = &["cod", "bass", "catfish", "tuna"];

pub fn is_cookable(item_name: &str) -> bool {
    COOKABLE_FOODS
        .iter()
        .any(|food| food.eq_ignore_ascii_case(item_name))
}

pub fn cooked_name(raw: &str) -> String {
    format!("Cooked {raw}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CookingPhase {
    #[default]
    Idle,
    Cooking,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookingError {
    FireNotLit,
    Busy(CookingPhase),
    NotCookable(String),
    MissingFood(String),
    NothingToClaim,
}

impl fmt::Display for CookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookingError::FireNotLit => write!(f, "The campfire needs to be lit first"),
            CookingError::Busy(CookingPhase::Complete) => {
                write!(f, "Claim what's in the skillet first")
            }
            CookingError::Busy(_) => write!(f, "Something is already cooking"),
            CookingError::NotCookable(name) => write!(f, "{name} can't be cooked"),
            CookingError::MissingFood(name) => write!(f, "No {name} to cook"),
            CookingError::NothingToClaim => write!(f, "Nothing is ready to claim"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CookingTick {
    Idle,
    Progressed(f32),
    Completed,
}

/// The skillet over the campfire.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingProcess {
    pub phase: CookingPhase,
    pub elapsed_seconds: u32,
    pub duration_target: u32,
    pub result_item: Option<InventoryItem>,
    /// Wall-clock ms when cooking started; 0 when not cooking.
    pub started_at_ms: u64,
}

impl Default for CookingProcess {
    fn default() -> Self {
        Self {
            phase: CookingPhase::Idle,
            elapsed_seconds: 0,
            duration_target: COOKING_DURATION_SECS,
            result_item: None,
            started_at_ms: 0,
        }
    }
}

impl CookingProcess {
    pub fn is_cooking(&self) -> bool {
        self.phase == CookingPhase::Cooking
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CookingPhase::Complete
    }

    pub fn progress(&self) -> f32 {
        if self.duration_target == 0 {
            return 1.0;
        }
        (self.elapsed_seconds as f32 / self.duration_target as f32).min(1.0)
    }

    /// Puts one unit of `food` in the skillet. The raw unit is consumed
    /// immediately.
    pub fn start(
        &mut self,
        fire_lit: bool,
        inventory: &mut Inventory,
        food: &str,
        now_ms: u64,
    ) -> Result<(), CookingError> {
        if !fire_lit {
            return Err(CookingError::FireNotLit);
        }
        if self.phase != CookingPhase::Idle {
            return Err(CookingError::Busy(self.phase));
        }
        if !is_cookable(food) {
            return Err(CookingError::NotCookable(food.to_string()));
        }
        let Some(held) = inventory.find_ignore_case(food) else {
            return Err(CookingError::MissingFood(food.to_string()));
        };
        let stored_name = held.name.clone();
        inventory.remove(&stored_name, 1);

        self.phase = CookingPhase::Cooking;
        self.elapsed_seconds = 0;
        self.result_item = Some(InventoryItem::new(cooked_name(&stored_name), 1));
        self.started_at_ms = now_ms;
        info!("Started cooking {}", stored_name);
        Ok(())
    }

    /// One second over the fire. Only advances while cooking on a lit fire.
    pub fn tick(&mut self, fire_lit: bool) -> CookingTick {
        if !self.is_cooking() || !fire_lit {
            return CookingTick::Idle;
        }
        self.elapsed_seconds += 1;
        if self.elapsed_seconds >= self.duration_target {
            self.phase = CookingPhase::Complete;
            return CookingTick::Completed;
        }
        CookingTick::Progressed(self.progress())
    }

    /// Moves the finished dish into the inventory and empties the skillet.
    pub fn claim(&mut self, inventory: &mut Inventory) -> Result<InventoryItem, CookingError> {
        if !self.is_complete() {
            return Err(CookingError::NothingToClaim);
        }
        let Some(item) = self.result_item.take() else {
            self.reset();
            return Err(CookingError::NothingToClaim);
        };
        inventory.add(&item.name, item.quantity);
        self.reset();
        Ok(item)
    }

    /// Drops an unfinished dish. Returns true if something was thrown away.
    /// A finished dish stays claimable.
    pub fn discard(&mut self) -> bool {
        if self.is_cooking() {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = CookingProcess {
            duration_target: self.duration_target,
            ..Default::default()
        };
    }
}

//! Emberwild library crate. Re-exports every module so that `tests/`
//! integration tests can build headless apps from the same plugins and
//! systems the game binary uses.

pub mod shared;
pub mod input;
pub mod data;
pub mod menu;
pub mod deferred;
pub mod registry;
pub mod fire;
pub mod cooking;
pub mod player;
pub mod zone;
pub mod narrative;
pub mod village;
pub mod camping;
pub mod ui;

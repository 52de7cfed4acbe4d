//! Skillet cooking over the campfire, with resume across scene changes.

pub mod process;
pub mod resume;

pub use process::*;
pub use resume::{reconcile_elapsed, restore_process, Reconciled};

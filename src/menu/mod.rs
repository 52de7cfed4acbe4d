//! The generic list menu and numeric prompt shared by every menu tree.

pub mod list;
pub mod modal;

pub use list::*;
pub use modal::*;

/// Footer shown under every list menu.
pub const LIST_FOOTER: &str = "(UP/DOWN to scroll, SPACE to select)";

//! Sidebar navigation.
//!
//! Lists the configured navigation items with the active one highlighted.
//! Keyboard:
//! - Up/Down moves the cursor, wrapping at both ends
//! - Enter opens the item under the cursor
//! - 1..=9 open the item with that position directly
//!
//! A left click on an item opens it as well.

mod nav_bar_component;
mod state;

pub use nav_bar_component::NavBarComponent;
pub use state::NavBarState;

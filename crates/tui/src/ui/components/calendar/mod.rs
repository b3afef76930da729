//! Calendar pane: a month grid that is rebuilt whenever the shell's refresh
//! key changes.

mod calendar_component;
mod state;

pub use calendar_component::CalendarComponent;
pub use state::CalendarState;

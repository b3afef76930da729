//! Component system for the Care Inbox TUI.
//!
//! Components are self-contained UI elements. They receive input, mutate the
//! part of [`App`] they own and render themselves into a provided `Rect`,
//! reporting anything that must leave the UI thread as [`Effect`]s.

use care_inbox_types::{Effect, Msg};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI element with its own behavior.
///
/// Every method except `render` has a no-op default so panes only implement
/// what they react to.
pub(crate) trait Component {
    /// Handle an application-level message. The default forwards it to
    /// [`App::update`].
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw into `rect`. State changes belong in the event handlers; the only
    /// exception is recording rendered areas for hit testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Sub-areas this component would lay out inside `area`.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}

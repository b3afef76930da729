use rat_focus::FocusFlag;
use ratatui::layout::Rect;

/// Cursor, focus and hit-testing state for the sidebar.
///
/// The items themselves live in the shell; this only tracks where the
/// operator is pointing and where the items were last drawn.
#[derive(Debug, Clone)]
pub struct NavBarState {
    /// Index of the item under the cursor.
    pub cursor: usize,
    /// Focus flag for the sidebar in the global focus ring.
    pub focus: FocusFlag,
    /// Last rendered area of the sidebar; used for mouse hit testing.
    pub last_area: Rect,
    /// Last computed per-item row areas for hit testing.
    pub per_item_areas: Vec<Rect>,
}

impl NavBarState {
    pub fn new(cursor: usize) -> Self {
        Self {
            cursor,
            focus: FocusFlag::named("care_inbox.nav_bar"),
            last_area: Rect::default(),
            per_item_areas: Vec::new(),
        }
    }

    /// Move the cursor one item forward (or back), wrapping around `len`.
    pub fn cycle(&mut self, len: usize, forward: bool) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let current = self.cursor.min(len - 1);
        self.cursor = if forward { (current + 1) % len } else { (current + len - 1) % len };
    }
}

impl Default for NavBarState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_at_both_ends() {
        let mut state = NavBarState::new(3);
        state.cycle(4, true);
        assert_eq!(state.cursor, 0);
        state.cycle(4, false);
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn cycling_an_empty_list_parks_the_cursor() {
        let mut state = NavBarState::new(2);
        state.cycle(0, true);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn stale_cursor_is_clamped_before_moving() {
        let mut state = NavBarState::new(9);
        state.cycle(3, false);
        assert_eq!(state.cursor, 1);
    }
}

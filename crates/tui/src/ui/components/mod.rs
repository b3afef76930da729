//! UI components: sidebar, panes and the notification toast.

pub mod calendar;
pub mod component;
pub mod dashboard;
pub mod history;
pub mod nav_bar;
pub mod not_found;
pub mod notifications;
pub mod settings;

pub use calendar::CalendarComponent;
pub(crate) use component::Component;
pub use dashboard::DashboardComponent;
pub use history::HistoryComponent;
pub use nav_bar::NavBarComponent;
pub use not_found::NotFoundComponent;
pub use notifications::NotificationsComponent;
pub use settings::SettingsComponent;

use ratatui::layout::{Position, Rect};

/// Index of the item area under `(x, y)`, if the point lies inside
/// `container` at all.
pub fn find_target_index_by_mouse_position(container: &Rect, item_areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    item_areas.iter().position(|area| area.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_item_under_cursor() {
        let container = Rect::new(0, 0, 20, 10);
        let items = [Rect::new(1, 1, 18, 3), Rect::new(1, 4, 18, 3)];
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 5, 2), Some(0));
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 5, 5), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 5, 8), None);
    }

    #[test]
    fn hit_test_ignores_points_outside_container() {
        let container = Rect::new(0, 0, 20, 10);
        let items = [Rect::new(0, 0, 40, 40)];
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 30, 2), None);
    }
}

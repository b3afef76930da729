use care_inbox_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Borders, Paragraph},
};

use super::NavBarState;
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers::{self as th, render_button};

const STATUS_LINE: &str = "● All Systems Operational";

/// Vertical list of navigation items with a system status footer.
#[derive(Debug, Default)]
pub struct NavBarComponent;

impl NavBarComponent {
    /// Open the item at `index`, moving the cursor onto it. Out-of-range
    /// indices are ignored.
    pub fn activate(app: &mut App, index: usize) -> Vec<Effect> {
        let Some(path) = app.shell.nav_items().get(index).map(|item| item.path.clone()) else {
            return Vec::new();
        };
        app.nav_bar.cursor = index;
        app.update(&Msg::Navigate(path))
    }
}

impl Component for NavBarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let len = app.shell.nav_items().len();
        match key.code {
            KeyCode::Down => {
                app.nav_bar.cycle(len, true);
                Vec::new()
            }
            KeyCode::Up => {
                app.nav_bar.cycle(len, false);
                Vec::new()
            }
            KeyCode::Enter => Self::activate(app, app.nav_bar.cursor),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let NavBarState {
            last_area, per_item_areas, ..
        } = &app.nav_bar;
        let Some(index) = find_target_index_by_mouse_position(last_area, per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let flag = app.nav_bar.focus.clone();
        app.focus.focus(&flag);
        Self::activate(app, index)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let focused = app.nav_bar.focus.get();
        let theme = app.theme();
        let block = th::block(theme, Some(" Navigation "), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let sections = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
        let item_rects = self.get_preferred_layout(app, sections[0]);
        for (index, item) in app.shell.nav_items().iter().enumerate() {
            let Some(row_area) = item_rects.get(index).copied() else {
                break;
            };
            let label = format!("{} {}", item.icon, item.label);
            let under_cursor = focused && index == app.nav_bar.cursor;
            render_button(frame, row_area, &label, under_cursor, item.active, theme, Borders::NONE);
        }

        let status = Paragraph::new(Line::from(Span::styled(STATUS_LINE, theme.status_success())));
        frame.render_widget(status, sections[1]);

        app.nav_bar.last_area = area;
        app.nav_bar.per_item_areas = item_rects;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(app.theme(), &[(" ↑/↓", " Navigate "), ("Enter", " Open ")])
    }

    /// One row per item, stacked from the top.
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let rows = app.shell.nav_items().len();
        Layout::vertical(vec![Constraint::Length(1); rows])
            .spacing(1)
            .split(area)
            .to_vec()
    }
}

use care_inbox_types::{Effect, Msg};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month view of the AI managed schedule.
#[derive(Debug, Default)]
pub struct CalendarComponent;

impl Component for CalendarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('r') => app.update(&Msg::RefreshCalendar),
            KeyCode::Left => {
                app.calendar.select_previous_day();
                Vec::new()
            }
            KeyCode::Right => {
                app.calendar.select_next_day();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        // Identity check: a refresh that happened elsewhere still rebuilds us.
        app.calendar.sync(app.shell.refresh_key(), Local::now().date_naive());

        let theme = app.theme();
        let focused = app.pane_focus.get();
        let block = th::block(theme, Some(" AI Managed Schedule "), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let areas = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(inner);

        let header = Line::from(vec![
            Span::styled(app.calendar.title(), theme.accent_emphasis_style()),
            Span::styled(format!("   refresh #{}", app.calendar.refresh_key()), theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(header), areas[0]);

        let selected = app.calendar.selected_day();
        let rows = app.calendar.weeks().into_iter().map(|week| {
            Row::new(week.into_iter().map(|day| match day {
                Some(day) if day == selected => {
                    Cell::from(format!("{day:>3}")).style(theme.selection_style().add_modifier(Modifier::BOLD))
                }
                Some(day) => Cell::from(format!("{day:>3}")).style(theme.text_primary_style()),
                None => Cell::from(""),
            }))
        });
        let header_row = Row::new(WEEKDAYS.iter().map(|d| Cell::from(*d))).style(th::table_header_style(theme));
        let table = Table::new(rows, [Constraint::Length(5); 7])
            .header(header_row)
            .column_spacing(1);
        frame.render_widget(table, areas[1]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(app.theme(), &[(" r", " Refresh "), ("←/→", " Day ")])
    }
}

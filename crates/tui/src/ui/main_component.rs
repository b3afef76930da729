use care_inbox_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use super::components::{
    CalendarComponent, Component, DashboardComponent, HistoryComponent, NavBarComponent, NotFoundComponent,
    NotificationsComponent, SettingsComponent,
};
use super::theme::theme_helpers as th;
use crate::app::App;
use crate::shell::PaneView;

/// Width of the sidebar column.
const NAV_BAR_WIDTH: u16 = 28;

/// Build the component for whatever pane the shell says is on screen.
fn pane_component(view: PaneView) -> Box<dyn Component> {
    match view {
        PaneView::Dashboard {
            welcome,
            stat_cards,
            notice,
        } => Box::new(DashboardComponent::new(welcome, stat_cards, notice)),
        PaneView::Calendar { .. } => Box::new(CalendarComponent),
        PaneView::History { rows } => Box::new(HistoryComponent::new(rows)),
        PaneView::AiSettings => Box::new(SettingsComponent),
        PaneView::NotFound { path } => Box::new(NotFoundComponent::new(path)),
    }
}

/// Root view: header, sidebar, the active pane, the hint bar and toasts.
#[derive(Debug, Default)]
pub struct MainView {
    /// Sidebar component
    pub nav_bar_view: NavBarComponent,
    /// Alert toasts drawn above everything else
    pub notifications_view: NotificationsComponent,
    /// Area the active pane occupied on the last render; used for click-to-focus.
    content_area: Rect,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys that work regardless of focus. Returns `None` when the key should
    /// go to the focused component instead.
    fn handle_global_keys(&mut self, app: &mut App, key: KeyEvent) -> Option<Vec<Effect>> {
        let front_is_critical = app.notifications.visible().next().is_some_and(|alert| alert.is_critical());
        let effects = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.update(&Msg::Quit),
            KeyCode::Char('q') => app.update(&Msg::Quit),
            KeyCode::Char('r') if front_is_critical => app.update(&Msg::AcknowledgeAlert),
            KeyCode::Esc | KeyCode::Char('x') if !app.notifications.is_empty() => app.update(&Msg::DismissAlert),
            KeyCode::Tab => {
                app.focus.next();
                Vec::new()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                Vec::new()
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                NavBarComponent::activate(app, index)
            }
            _ => return None,
        };
        Some(effects)
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(effects) = self.handle_global_keys(app, key) {
            return effects;
        }

        if app.nav_bar.focus.get() {
            return self.nav_bar_view.handle_key_events(app, key);
        }

        pane_component(app.shell.render()).handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let mut effects = self.nav_bar_view.handle_mouse_events(app, mouse);
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.content_area.contains(Position::new(mouse.column, mouse.row))
        {
            app.focus.focus(&app.pane_focus);
            effects.extend(pane_component(app.shell.render()).handle_mouse_events(app, mouse));
        }
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.theme().roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        let view = app.shell.render();
        let title = view.title().to_string();
        render_header(frame, layout[0], app, &title);

        self.nav_bar_view.render(frame, layout[1], app);
        let mut pane = pane_component(view);
        pane.render(frame, layout[2], app);
        self.content_area = layout[2];

        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.theme().text_muted_style())];
        if app.nav_bar.focus.get() {
            hint_spans.extend(self.nav_bar_view.get_hint_spans(app));
        } else {
            hint_spans.extend(pane.get_hint_spans(app));
        }
        hint_spans.extend(self.notifications_view.get_hint_spans(app));
        hint_spans.extend(th::build_hint_spans(
            app.theme(),
            &[(" Tab", " Focus "), ("1-4", " Jump "), ("q", " Quit ")],
        ));
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.theme().text_muted_style());
        frame.render_widget(hints_widget, layout[3]);

        self.notifications_view.render(frame, area, app);
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let rows = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Sidebar + pane
            Constraint::Length(1), // Hints bar
        ])
        .split(area);
        let columns = Layout::horizontal([
            Constraint::Length(NAV_BAR_WIDTH), // Nav bar width
            Constraint::Min(1),                // Active pane
        ])
        .split(rows[1]);

        vec![
            rows[0],    // Header
            columns[0], // Navigation
            columns[1], // Active pane
            rows[2],    // Hints bar
        ]
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let theme = app.theme();
    let block = Block::bordered()
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(theme.border_style(false))
        .style(th::panel_style(theme));
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" ✉ {} ", app.shell.config().app_name), theme.accent_emphasis_style()),
        Span::styled("│ ", theme.text_muted_style()),
        Span::styled(title.to_string(), theme.text_secondary_style()),
    ]))
    .block(block);
    frame.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use care_inbox_types::{Alert, CALENDAR_PATH, DashboardConfig, Route};
    use crossterm::event::KeyEventState;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn app() -> App {
        App::new(Arc::new(DashboardConfig::demo()), Box::new(DraculaTheme::new()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn screen(app: &mut App, view: &mut MainView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area(), app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn renders_dashboard_with_sidebar_and_status() {
        let mut app = app();
        let mut view = MainView::new();
        let text = screen(&mut app, &mut view);
        assert!(text.contains("Welcome back!"));
        assert!(text.contains("All Systems Operational"));
        assert!(text.contains("12,847"));
    }

    #[test]
    fn digit_keys_jump_to_panes() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.shell.selected_route(), &Route::Calendar);
        view.handle_key_events(&mut app, key(KeyCode::Char('9')));
        assert_eq!(app.shell.selected_route(), &Route::Calendar);
    }

    #[test]
    fn sidebar_enter_opens_item_under_cursor() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, key(KeyCode::Down));
        view.handle_key_events(&mut app, key(KeyCode::Down));
        view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(app.shell.selected_route(), &Route::History);
    }

    #[test]
    fn r_refreshes_calendar_once_pane_has_focus() {
        let mut app = app();
        let mut view = MainView::new();
        app.update(&Msg::Navigate(CALENDAR_PATH.into()));
        view.handle_key_events(&mut app, key(KeyCode::Tab));
        assert!(app.pane_focus.get());

        view.handle_key_events(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.shell.refresh_key(), 1);
    }

    #[test]
    fn r_acknowledges_a_critical_alert_before_anything_else() {
        let mut app = app();
        let mut view = MainView::new();
        app.update(&Msg::Navigate(CALENDAR_PATH.into()));
        app.update(&Msg::Alert(Alert::patient_emergency()));

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('r')));
        assert_eq!(effects, vec![Effect::ResetEmergency]);
        assert_eq!(app.shell.refresh_key(), 0);
    }

    #[test]
    fn critical_toast_is_drawn_over_the_pane() {
        let mut app = app();
        let mut view = MainView::new();
        app.update(&Msg::Alert(Alert::patient_emergency()));
        let text = screen(&mut app, &mut view);
        assert!(text.contains("Patient Emergency"));
        assert!(text.contains("r acknowledge"));
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        let mut view = MainView::new();
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
        assert!(app.should_quit);
    }

    #[test]
    fn unknown_route_renders_not_found() {
        let mut app = app();
        let mut view = MainView::new();
        app.update(&Msg::Navigate("/nowhere".into()));
        let text = screen(&mut app, &mut view);
        assert!(text.contains("Nothing lives at /nowhere"));
    }
}

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Fallback pane for paths that match no route.
#[derive(Debug)]
pub struct NotFoundComponent {
    path: String,
}

impl NotFoundComponent {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl Component for NotFoundComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme();
        let body = Paragraph::new(vec![
            Line::from(Span::styled("404", theme.status_error())),
            Line::from(Span::styled(format!("Nothing lives at {}", self.path), theme.text_secondary_style())),
            Line::from(Span::styled("Pick a page from the sidebar.", theme.text_muted_style())),
        ])
        .alignment(Alignment::Center)
        .block(th::block(theme, Some(" Page not found "), app.pane_focus.get()));
        frame.render_widget(body, rect);
    }
}

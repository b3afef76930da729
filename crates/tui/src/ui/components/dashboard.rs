use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::shell::StatCard;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Landing pane: greeting, headline numbers and the priority notice.
#[derive(Debug)]
pub struct DashboardComponent {
    welcome: String,
    stat_cards: [StatCard; 3],
    notice: &'static str,
}

impl DashboardComponent {
    pub fn new(welcome: String, stat_cards: [StatCard; 3], notice: &'static str) -> Self {
        Self {
            welcome,
            stat_cards,
            notice,
        }
    }
}

impl Component for DashboardComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme();
        let block = th::block(theme, Some(" Dashboard "), app.pane_focus.get());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let areas = self.get_preferred_layout(app, inner);

        let mut heading = vec![Line::from(Span::styled("Welcome back!", theme.accent_emphasis_style()))];
        if !self.welcome.is_empty() {
            heading.push(Line::from(Span::styled(self.welcome.as_str(), theme.text_secondary_style())));
        }
        frame.render_widget(Paragraph::new(heading), areas[0]);

        let card_areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).spacing(1).split(areas[1]);
        for (card, area) in self.stat_cards.iter().zip(card_areas.iter()) {
            let title = format!(" {} {} ", card.icon, card.title);
            let card_block = th::block(theme, Some(title.as_str()), false);
            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    card.value.as_str(),
                    theme.text_primary_style().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(card.subtitle, theme.text_muted_style())),
            ])
            .block(card_block);
            frame.render_widget(body, *area);
        }

        let notice = Paragraph::new(self.notice)
            .style(theme.status_warning())
            .wrap(Wrap { trim: true })
            .block(th::block(theme, Some(" Priority "), false));
        frame.render_widget(notice, areas[2]);
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Greeting
            Constraint::Length(4), // Stat cards
            Constraint::Min(3),    // Priority notice
        ])
        .split(area)
        .to_vec()
    }
}

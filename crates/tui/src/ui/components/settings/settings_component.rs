use care_inbox_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
};

use super::PERSONALITY_MARKS;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// AI settings pane.
#[derive(Debug, Default)]
pub struct SettingsComponent;

impl Component for SettingsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Left => app.update(&Msg::SliderStep(-1)),
            KeyCode::Right => app.update(&Msg::SliderStep(1)),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme();
        let block = th::block(theme, Some(" AI Settings "), app.pane_focus.get());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let areas = Layout::vertical([
            Constraint::Length(2), // Caption
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Marks
            Constraint::Min(0),
        ])
        .split(inner);

        let caption = Paragraph::new("Adjust the assistant's tone when replying to your inbox.")
            .style(theme.text_secondary_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(caption, areas[0]);

        let slider = app.settings.slider;
        let gauge = Gauge::default()
            .gauge_style(theme.accent_primary_style())
            .percent(u16::from(slider.value()))
            .label(Span::styled(
                format!("AI Personality: {}", slider.label()),
                theme.text_primary_style().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(gauge, areas[1]);

        let marks = Layout::horizontal([Constraint::Ratio(1, PERSONALITY_MARKS.len() as u32); PERSONALITY_MARKS.len()])
            .split(areas[2]);
        for (index, (_, label)) in PERSONALITY_MARKS.iter().enumerate() {
            let style = if index == slider.mark_index() {
                theme.accent_emphasis_style()
            } else {
                theme.text_muted_style()
            };
            frame.render_widget(Paragraph::new(Line::from(Span::styled(*label, style))), marks[index]);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(app.theme(), &[(" ←/→", " Adjust personality ")])
    }
}

use care_inbox_types::{Alert, AlertSeverity};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::toast_rect;

const TOAST_WIDTH: u16 = 44;

/// Floating alert toasts in the top-right corner.
#[derive(Debug, Default)]
pub struct NotificationsComponent;

impl NotificationsComponent {
    fn toast_height(alert: &Alert, width: u16) -> u16 {
        let text_width = usize::from(width.saturating_sub(2)).max(1);
        let message_lines = alert.message.chars().count().div_ceil(text_width).max(1);
        // Borders, title line, footer line.
        (message_lines as u16).saturating_add(4)
    }

    fn footer(alert: &Alert) -> &'static str {
        match alert.severity {
            AlertSeverity::Critical => "r acknowledge · x dismiss",
            _ => "x dismiss",
        }
    }
}

impl Component for NotificationsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme();
        let pending = app.notifications.pending_count();
        let mut top = rect.y;
        for alert in app.notifications.visible() {
            let height = Self::toast_height(alert, TOAST_WIDTH) + u16::from(pending > 0);
            let area = toast_rect(rect, TOAST_WIDTH, height, top);
            if area.height == 0 {
                break;
            }
            top = area.bottom();

            let accent = th::alert_style(theme, alert.severity);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(accent)
                .title(Span::styled(format!(" {} ", alert.title), accent))
                .style(Style::default().bg(theme.roles().toast_bg));
            let mut lines = vec![Line::from(Span::styled(alert.message.as_str(), theme.text_primary_style()))];
            if pending > 0 {
                lines.push(Line::from(Span::styled(
                    format!("+{pending} more"),
                    theme.text_muted_style(),
                )));
            }
            lines.push(Line::from(Span::styled(Self::footer(alert), theme.text_muted_style())));

            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let critical = app.notifications.visible().any(Alert::is_critical);
        if critical {
            th::build_hint_spans(app.theme(), &[(" r", " Acknowledge "), ("x", " Dismiss ")])
        } else {
            th::build_hint_spans(app.theme(), &[(" x", " Dismiss ")])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_messages_grow_the_toast() {
        let short = Alert::new("t", "hi", AlertSeverity::Info);
        let long = Alert::new("t", "x".repeat(100), AlertSeverity::Info);
        assert_eq!(NotificationsComponent::toast_height(&short, TOAST_WIDTH), 5);
        assert!(NotificationsComponent::toast_height(&long, TOAST_WIDTH) > 5);
    }

    #[test]
    fn only_critical_alerts_offer_acknowledge() {
        assert!(NotificationsComponent::footer(&Alert::patient_emergency()).starts_with("r acknowledge"));
        assert_eq!(
            NotificationsComponent::footer(&Alert::new("t", "m", AlertSeverity::Warning)),
            "x dismiss"
        );
    }
}

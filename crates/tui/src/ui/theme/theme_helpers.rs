use care_inbox_types::{AlertSeverity, EmailStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for table headers: bold secondary text.
pub fn table_header_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.text_secondary_style().add_modifier(Modifier::BOLD)
}

/// Background style for the entire header row to avoid gaps between columns.
pub fn table_header_row_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default()
        .bg(theme.roles().surface_muted)
        .fg(theme.roles().text_secondary)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let dr = (r as f32 * f).round().clamp(0.0, 255.0) as u8;
            let dg = (g as f32 * f).round().clamp(0.0, 255.0) as u8;
            let db = (b as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(dr, dg, db)
        }
        other => other,
    }
}

/// Row style for a given row index, alternating between darker variants of
/// the two surface tones.
pub fn table_row_style<T: Theme + ?Sized>(theme: &T, row_index: usize) -> Style {
    let ThemeRoles {
        surface,
        surface_muted,
        text,
        ..
    } = *theme.roles();
    let background = if row_index % 2 == 0 {
        darken_rgb(surface, 0.60)
    } else {
        darken_rgb(surface_muted, 0.60)
    };
    Style::default().bg(background).fg(text)
}

/// Foreground style for an email status badge.
pub fn email_status_style<T: Theme + ?Sized>(theme: &T, status: EmailStatus) -> Style {
    let style = match status {
        EmailStatus::Processed => theme.status_success(),
        EmailStatus::Pending => theme.status_warning(),
        EmailStatus::Failed => theme.status_error(),
    };
    style.add_modifier(Modifier::BOLD)
}

/// Border/title style for an alert of the given severity.
pub fn alert_style<T: Theme + ?Sized>(theme: &T, severity: AlertSeverity) -> Style {
    match severity {
        AlertSeverity::Info => theme.status_info(),
        AlertSeverity::Warning => theme.status_warning(),
        AlertSeverity::Critical => theme.status_error().add_modifier(Modifier::BOLD),
    }
}

/// Secondary button style (outline-like, rely on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, selected: bool) -> Style {
    let style = Style::default().fg(theme.roles().accent_secondary);
    if selected {
        return style.bg(theme.roles().selection_bg).add_modifier(Modifier::BOLD);
    }
    style
}

/// Renders a standard button
pub fn render_button<T: Theme + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_focused: bool,
    is_selected: bool,
    theme: &T,
    borders: Borders,
) {
    let padding = if borders.is_empty() {
        Padding::horizontal(1) // Keep text aligned with bordered siblings
    } else {
        Padding::uniform(0)
    };

    frame.render_widget(
        Paragraph::new(label)
            .block(
                Block::bordered()
                    .borders(borders)
                    .border_style(theme.border_style(is_focused))
                    .padding(padding),
            )
            .style(button_secondary_style(theme, is_selected)),
        area,
    );
}

/// Build key/description hint spans: keys in accent, descriptions muted.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}

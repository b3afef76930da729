use care_inbox_types::EmailRecord;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Table of recently handled emails.
#[derive(Debug)]
pub struct HistoryComponent {
    rows: Vec<EmailRecord>,
}

impl HistoryComponent {
    pub fn new(rows: Vec<EmailRecord>) -> Self {
        Self { rows }
    }
}

impl Component for HistoryComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme();
        let block = th::block(theme, Some(" Email History "), app.pane_focus.get());

        if self.rows.is_empty() {
            let empty = Paragraph::new(Span::styled("No emails processed yet.", theme.text_muted_style())).block(block);
            frame.render_widget(empty, rect);
            return;
        }

        let header = Row::new(["Subject", "Recipient", "Status", "Time"].map(Cell::from))
            .style(th::table_header_row_style(theme).patch(th::table_header_style(theme)));
        let rows = self.rows.iter().enumerate().map(|(index, email)| {
            Row::new([
                Cell::from(email.subject.as_str()),
                Cell::from(email.recipient.as_str()),
                Cell::from(Span::styled(email.status.as_str(), th::email_status_style(theme, email.status))),
                Cell::from(email.timestamp.as_str()),
            ])
            .style(th::table_row_style(theme, index))
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Length(10),
                Constraint::Min(16),
            ],
        )
        .header(header)
        .column_spacing(1)
        .block(block);
        frame.render_widget(table, rect);
    }
}

//! Pane descriptions produced by [`DashboardShell::render`](super::DashboardShell::render).
//!
//! A `PaneView` is plain data: the ratatui components in `ui::components`
//! draw it, and tests assert on it without a terminal.

use care_inbox_types::{DashboardStats, EmailRecord};

/// Static notice shown beside the stat cards on the dashboard pane.
pub const PRIORITY_NOTICE: &str = "The agent has automatically detected a high-priority message from a user.";

/// One headline card on the dashboard pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

impl StatCard {
    /// Build the three dashboard cards from the configured stats.
    pub fn from_stats(stats: &DashboardStats) -> [StatCard; 3] {
        [
            StatCard {
                title: "Total Emails",
                value: group_thousands(stats.total_emails),
                subtitle: "All time processed",
                icon: "✉",
            },
            StatCard {
                title: "Today's Activity",
                value: stats.processed_today.to_string(),
                subtitle: "Emails processed",
                icon: "↗",
            },
            StatCard {
                title: "AI Accuracy",
                value: format!("{}%", stats.ai_accuracy),
                subtitle: "Classification rate",
                icon: "◎",
            },
        ]
    }
}

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneView {
    Dashboard {
        /// Greeting fetched from the backend; empty until (or unless) it arrives.
        welcome: String,
        stat_cards: [StatCard; 3],
        notice: &'static str,
    },
    Calendar {
        /// Identity of the current calendar instance; a change means "rebuild".
        refresh_key: u64,
    },
    History {
        rows: Vec<EmailRecord>,
    },
    AiSettings,
    NotFound {
        path: String,
    },
}

impl PaneView {
    pub fn title(&self) -> &str {
        match self {
            PaneView::Dashboard { .. } => "Welcome back!",
            PaneView::Calendar { .. } => "AI Managed Schedule",
            PaneView::History { .. } => "Email History",
            PaneView::AiSettings => "AI Settings",
            PaneView::NotFound { .. } => "Page not found",
        }
    }
}

/// Format an integer with comma thousands separators (`12847` → `12,847`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(324), "324");
        assert_eq!(group_thousands(12_847), "12,847");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn stat_cards_format_each_value() {
        let cards = StatCard::from_stats(&DashboardStats {
            total_emails: 12_847,
            processed_today: 324,
            ai_accuracy: 98.7,
        });
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["12,847", "324", "98.7%"]);
    }
}

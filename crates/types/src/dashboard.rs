//! Dashboard configuration injected into the shell at construction.
//!
//! The configuration is an immutable value: the shell reads it to seed its
//! navigation list and to compose the static panes, and never writes back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AI_SETTINGS_PATH, CALENDAR_PATH, DASHBOARD_PATH, HISTORY_PATH, NavItem};

/// Error surfaced when a dashboard configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dashboard config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dashboard config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Processing state of an email as shown in the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Processed,
    Pending,
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Processed => "processed",
            EmailStatus::Pending => "pending",
            EmailStatus::Failed => "failed",
        }
    }
}

/// One row of the email history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: u32,
    pub subject: String,
    pub recipient: String,
    pub status: EmailStatus,
    /// Relative, human-readable time (e.g., "2 min ago").
    pub timestamp: String,
}

impl EmailRecord {
    fn new(id: u32, subject: &str, recipient: &str, status: EmailStatus, timestamp: &str) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            recipient: recipient.to_string(),
            status,
            timestamp: timestamp.to_string(),
        }
    }
}

/// Headline numbers shown on the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_emails: u64,
    pub processed_today: u64,
    /// Classification accuracy as a percentage (0.0..=100.0).
    pub ai_accuracy: f64,
}

/// Everything the dashboard displays that does not come from the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub app_name: String,
    pub stats: DashboardStats,
    pub recent_emails: Vec<EmailRecord>,
    pub navigation: Vec<NavItem>,
}

impl DashboardConfig {
    /// The seeded demo data shipped with the control panel.
    pub fn demo() -> Self {
        Self {
            app_name: "Care Inbox Control Panel".to_string(),
            stats: DashboardStats {
                total_emails: 12_847,
                processed_today: 324,
                ai_accuracy: 98.7,
            },
            recent_emails: vec![
                EmailRecord::new(1, "Welcome to our service", "john@example.com", EmailStatus::Processed, "2 min ago"),
                EmailRecord::new(2, "Your order confirmation", "sarah@example.com", EmailStatus::Pending, "5 min ago"),
                EmailRecord::new(3, "Password reset request", "mike@example.com", EmailStatus::Processed, "8 min ago"),
                EmailRecord::new(4, "Newsletter subscription", "emma@example.com", EmailStatus::Failed, "12 min ago"),
                EmailRecord::new(5, "Thank you for your feedback", "alex@example.com", EmailStatus::Processed, "15 min ago"),
            ],
            navigation: vec![
                NavItem::new("Dashboard", "▦", DASHBOARD_PATH).active(),
                NavItem::new("Calendar", "▤", CALENDAR_PATH),
                NavItem::new("Email History", "✉", HISTORY_PATH),
                NavItem::new("AI Settings", "⚙", AI_SETTINGS_PATH),
            ],
        }
    }

    /// Load a configuration from a JSON file using the same camelCase keys as
    /// the demo data (`appName`, `stats`, `recentEmails`, `navigation`).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn demo_history_keeps_seeded_order_and_statuses() {
        let config = DashboardConfig::demo();
        let statuses: Vec<&str> = config.recent_emails.iter().map(|e| e.status.as_str()).collect();
        assert_eq!(statuses, ["processed", "pending", "processed", "failed", "processed"]);
        let ids: Vec<u32> = config.recent_emails.iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn demo_navigation_starts_on_dashboard() {
        let config = DashboardConfig::demo();
        let active: Vec<&str> = config.navigation.iter().filter(|i| i.active).map(|i| i.path.as_str()).collect();
        assert_eq!(active, [DASHBOARD_PATH]);
    }

    #[test]
    fn config_loads_from_camel_case_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = r##"{
            "appName": "Clinic Desk",
            "stats": { "totalEmails": 10, "processedToday": 2, "aiAccuracy": 90.5 },
            "recentEmails": [
                { "id": 7, "subject": "Hi", "recipient": "a@b.c", "status": "failed", "timestamp": "now" }
            ],
            "navigation": [
                { "label": "Dashboard", "icon": "*", "path": "/dashboard", "active": true },
                { "label": "History", "icon": "#", "path": "/history" }
            ]
        }"##;
        file.write_all(json.as_bytes()).expect("write config");

        let config = DashboardConfig::from_json_file(file.path()).expect("load config");
        assert_eq!(config.app_name, "Clinic Desk");
        assert_eq!(config.recent_emails[0].status, EmailStatus::Failed);
        assert!(!config.navigation[1].active);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write config");
        let err = DashboardConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

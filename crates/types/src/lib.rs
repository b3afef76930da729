//! Shared type definitions for the Care Inbox control panel.
//!
//! The TUI, the API client and the CLI all speak in terms of the types
//! declared here: navigation routes and items, the injected dashboard
//! configuration, the wire payloads returned by the status backend, and the
//! `Msg`/`Effect` pair that drives the UI event loop.

mod dashboard;
mod status;

pub use dashboard::{ConfigError, DashboardConfig, DashboardStats, EmailRecord, EmailStatus};
pub use status::{EmergencyStatus, ResetAck, RootGreeting};

use serde::{Deserialize, Serialize};

/// Canonical path of the dashboard pane.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Canonical path of the calendar pane.
pub const CALENDAR_PATH: &str = "/calendar";
/// Spelling used by older navigation configs; treated as an alias of [`CALENDAR_PATH`].
pub const LEGACY_CALENDAR_PATH: &str = "/calender";
/// Canonical path of the email history pane.
pub const HISTORY_PATH: &str = "/history";
/// Canonical path of the AI settings pane.
pub const AI_SETTINGS_PATH: &str = "/ai-settings";

/// The selector value that determines which pane the shell renders.
///
/// Unknown paths do not fail: they become [`Route::NotFound`] carrying the
/// path that was requested, so the render step can stay a total match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Calendar,
    History,
    AiSettings,
    NotFound(String),
}

impl Route {
    /// Resolve a navigation path into a route.
    pub fn from_path(path: &str) -> Self {
        match path {
            DASHBOARD_PATH => Route::Dashboard,
            CALENDAR_PATH | LEGACY_CALENDAR_PATH => Route::Calendar,
            HISTORY_PATH => Route::History,
            AI_SETTINGS_PATH => Route::AiSettings,
            other => Route::NotFound(other.to_string()),
        }
    }

    /// The canonical path of this route.
    pub fn path(&self) -> &str {
        match self {
            Route::Dashboard => DASHBOARD_PATH,
            Route::Calendar => CALENDAR_PATH,
            Route::History => HISTORY_PATH,
            Route::AiSettings => AI_SETTINGS_PATH,
            Route::NotFound(path) => path,
        }
    }
}

/// A single entry in the sidebar navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Human-friendly label (e.g., "Email History").
    pub label: String,
    /// Short glyph rendered before the label.
    pub icon: String,
    /// Whether this item is the selected one.
    #[serde(default)]
    pub active: bool,
    /// Navigation path this item routes to.
    pub path: String,
}

impl NavItem {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            active: false,
            path: path.into(),
        }
    }

    /// Builder-style helper to mark the item active.
    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// How urgently an alert should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertSeverity {
    #[default]
    Info,
    Warning,
    Critical,
}

/// A user-visible notification raised onto the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    /// When `false` the alert stays on screen until the operator dismisses it.
    pub auto_close: bool,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            auto_close: true,
        }
    }

    /// The fixed alert raised whenever the backend reports an active emergency.
    pub fn patient_emergency() -> Self {
        Self {
            title: "Patient Emergency".to_string(),
            message: "The agent has detected a patient emergency. Please manually intervene.".to_string(),
            severity: AlertSeverity::Critical,
            auto_close: false,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == AlertSeverity::Critical
    }
}

/// Events delivered to the UI thread.
///
/// Input handlers, the animation ticker and background tasks all funnel into
/// this enum; `App::update` is the only place that mutates state in response.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Periodic UI tick (drives toast expiry).
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
    /// Select the pane at `path`.
    Navigate(String),
    /// Discard and rebuild the calendar pane.
    RefreshCalendar,
    /// Result of the one-shot welcome fetch; `None` when it failed.
    WelcomeLoaded(Option<String>),
    /// Raise an alert on the notification surface.
    Alert(Alert),
    /// Dismiss the front-most alert without touching the backend.
    DismissAlert,
    /// Dismiss the front-most alert and clear the backend emergency flag.
    AcknowledgeAlert,
    /// Move the personality slider by `n` steps (negative moves left).
    SliderStep(i8),
    /// Outcome of a reset request; `Err` carries a display message.
    EmergencyResetFinished(Result<String, String>),
    /// Leave the application.
    Quit,
}

/// Side effects requested by the UI and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the root greeting once and deliver `Msg::WelcomeLoaded`.
    FetchWelcome,
    /// POST the emergency reset endpoint and deliver `Msg::EmergencyResetFinished`.
    ResetEmergency,
    /// Stop the event loop.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve_to_named_routes() {
        assert_eq!(Route::from_path("/dashboard"), Route::Dashboard);
        assert_eq!(Route::from_path("/calendar"), Route::Calendar);
        assert_eq!(Route::from_path("/history"), Route::History);
        assert_eq!(Route::from_path("/ai-settings"), Route::AiSettings);
    }

    #[test]
    fn legacy_calendar_spelling_is_accepted() {
        assert_eq!(Route::from_path("/calender"), Route::Calendar);
        assert_eq!(Route::Calendar.path(), CALENDAR_PATH);
    }

    #[test]
    fn unknown_path_becomes_not_found_keeping_the_path() {
        let route = Route::from_path("/billing");
        assert_eq!(route, Route::NotFound("/billing".to_string()));
        assert_eq!(route.path(), "/billing");
    }

    #[test]
    fn emergency_alert_is_sticky_and_critical() {
        let alert = Alert::patient_emergency();
        assert!(alert.is_critical());
        assert!(!alert.auto_close);
        assert_eq!(alert.title, "Patient Emergency");
    }
}

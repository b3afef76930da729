//! # Care Inbox TUI Library
//!
//! Terminal control panel for the Care Inbox email assistant. It shows the
//! dashboard, calendar, email history and AI settings panes behind a sidebar,
//! and raises a sticky alert whenever the backend reports a patient
//! emergency.
//!
//! ## Architecture
//!
//! - [`shell::DashboardShell`] owns route selection and decides which pane is
//!   on screen.
//! - [`poller::NotificationPoller`] checks the emergency endpoint on a fixed
//!   period and feeds alerts to the UI through a channel.
//! - [`app::App`] is the single state container; it turns `Msg`s into state
//!   changes and `Effect`s for the runtime to execute.
//! - `ui` holds the components, theming and the event loop.

pub mod app;
pub mod notifications;
pub mod poller;
pub mod shell;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use care_inbox_api::StatusEndpoints;
use care_inbox_types::DashboardConfig;

/// Everything the TUI needs from the outside world.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Seed data for the panes and the sidebar.
    pub dashboard: Arc<DashboardConfig>,
    /// Backend endpoints for the greeting and the emergency flag.
    pub endpoints: StatusEndpoints,
    /// Period of the emergency poller.
    pub poll_period: Duration,
    /// Theme identifier; unknown or missing names fall back to Dracula.
    pub theme: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dashboard: Arc::new(DashboardConfig::demo()),
            endpoints: StatusEndpoints::default(),
            poll_period: poller::DEFAULT_POLL_PERIOD,
            theme: None,
        }
    }
}

/// Runs the TUI until the operator quits.
///
/// # Errors
///
/// Returns an error when the endpoints cannot be used to build an HTTP client
/// or when terminal setup or drawing fails.
pub async fn run(config: RunConfig) -> Result<()> {
    ui::runtime::run_app(config).await
}

//! Dashboard shell: navigation selection and pane dispatch.
//!
//! The shell owns the selected route, the ordered navigation list, the
//! calendar refresh key and the welcome text. All mutation happens through
//! the operations below; rendering is a pure function of that state and the
//! injected [`DashboardConfig`].

mod pane;

pub use pane::{PRIORITY_NOTICE, PaneView, StatCard, group_thousands};

use std::sync::Arc;

use care_inbox_types::{DashboardConfig, NavItem, Route};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DashboardShell {
    config: Arc<DashboardConfig>,
    selected_route: Route,
    nav_items: Vec<NavItem>,
    refresh_key: u64,
    welcome_message: String,
}

impl DashboardShell {
    /// Seed the shell from an immutable configuration. The initial route is
    /// always the dashboard, regardless of which item the config marks active.
    pub fn new(config: Arc<DashboardConfig>) -> Self {
        let mut shell = Self {
            nav_items: config.navigation.clone(),
            config,
            selected_route: Route::Dashboard,
            refresh_key: 0,
            welcome_message: String::new(),
        };
        shell.mark_active(&Route::Dashboard);
        shell
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selected_route(&self) -> &Route {
        &self.selected_route
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    pub fn welcome_message(&self) -> &str {
        &self.welcome_message
    }

    /// Index of the active navigation item, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.nav_items.iter().position(|item| item.active)
    }

    /// Select the pane at `path`.
    ///
    /// Every item's `active` flag is recomputed by comparing the item's route
    /// with the selected one, so aliases such as `/calender` light up the
    /// calendar item. An unknown path leaves no item active and selects the
    /// not-found pane.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::from_path(path);
        self.mark_active(&route);
        self.selected_route = route;
        debug!(path, route = ?self.selected_route, "navigated");
    }

    /// Force the calendar pane to discard and rebuild its internal state.
    pub fn refresh_calendar_pane(&mut self) {
        self.refresh_key += 1;
    }

    /// Store the result of the one-shot welcome fetch. A failed fetch
    /// (`None`) leaves the current message untouched.
    pub fn set_welcome_message(&mut self, message: Option<String>) {
        if let Some(message) = message {
            self.welcome_message = message;
        }
    }

    /// Describe the pane for the current state.
    pub fn render(&self) -> PaneView {
        match &self.selected_route {
            Route::Dashboard => PaneView::Dashboard {
                welcome: self.welcome_message.clone(),
                stat_cards: StatCard::from_stats(&self.config.stats),
                notice: PRIORITY_NOTICE,
            },
            Route::Calendar => PaneView::Calendar {
                refresh_key: self.refresh_key,
            },
            Route::History => PaneView::History {
                rows: self.config.recent_emails.clone(),
            },
            Route::AiSettings => PaneView::AiSettings,
            Route::NotFound(path) => PaneView::NotFound { path: path.clone() },
        }
    }

    fn mark_active(&mut self, route: &Route) {
        self.nav_items = self
            .nav_items
            .iter()
            .map(|item| NavItem {
                active: Route::from_path(&item.path) == *route,
                ..item.clone()
            })
            .collect();
    }
}

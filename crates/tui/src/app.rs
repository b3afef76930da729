//! Application state and logic for the Care Inbox TUI.
//!
//! `App` is the single state container owned by the UI thread. Input
//! handlers, the ticker and background tasks all reach it as [`Msg`]s through
//! [`App::update`], which returns the [`Effect`]s the runtime should perform.

use std::sync::Arc;
use std::time::Instant;

use care_inbox_types::{Alert, AlertSeverity, DashboardConfig, Effect, Msg};
use chrono::Local;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::notifications::NotificationCenter;
use crate::shell::DashboardShell;
use crate::ui::components::calendar::CalendarState;
use crate::ui::components::nav_bar::NavBarState;
use crate::ui::components::settings::SettingsState;
use crate::ui::theme::Theme;

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active color theme
    pub theme: Box<dyn Theme>,
}

pub struct App {
    /// Shared, cross-cutting context (theme)
    pub ctx: SharedCtx,
    /// Route selection, navigation list, refresh key and welcome text
    pub shell: DashboardShell,
    /// Sidebar cursor and hit-testing state
    pub nav_bar: NavBarState,
    /// Calendar pane state, rebuilt whenever the refresh key changes
    pub calendar: CalendarState,
    /// AI settings pane state
    pub settings: SettingsState,
    /// Alerts raised by background tasks
    pub notifications: NotificationCenter,
    /// Focus flag for whichever pane is on screen
    pub pane_focus: FocusFlag,
    container_focus: FocusFlag,
    /// Focus ring spanning sidebar and pane
    pub focus: Focus,
    /// Set once the operator asked to leave
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<DashboardConfig>, theme: Box<dyn Theme>) -> Self {
        let shell = DashboardShell::new(config);
        let nav_bar = NavBarState::new(shell.active_index().unwrap_or_default());
        let calendar = CalendarState::new(shell.refresh_key(), Local::now().date_naive());
        let mut app = Self {
            ctx: SharedCtx { theme },
            shell,
            nav_bar,
            calendar,
            settings: SettingsState::default(),
            notifications: NotificationCenter::default(),
            pane_focus: FocusFlag::named("care_inbox.pane"),
            container_focus: FocusFlag::named("care_inbox.app"),
            focus: Focus::default(),
            should_quit: false,
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus.focus(&app.nav_bar.focus);
        app
    }

    /// Apply a message to the application state.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        let mut effects = Vec::new();
        let now = Instant::now();
        match msg {
            Msg::Tick => {
                self.notifications.expire(now);
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
            }
            Msg::Navigate(path) => {
                self.shell.navigate(path);
                if let Some(index) = self.shell.active_index() {
                    self.nav_bar.cursor = index;
                }
            }
            Msg::RefreshCalendar => {
                self.shell.refresh_calendar_pane();
                self.calendar.sync(self.shell.refresh_key(), Local::now().date_naive());
            }
            Msg::WelcomeLoaded(message) => {
                self.shell.set_welcome_message(message.clone());
            }
            Msg::Alert(alert) => {
                self.notifications.push(alert.clone(), now);
            }
            Msg::DismissAlert => {
                self.notifications.dismiss_front(now);
            }
            Msg::AcknowledgeAlert => {
                if let Some(alert) = self.notifications.dismiss_front(now)
                    && alert.is_critical()
                {
                    let duplicates = self.notifications.dismiss_matching(&alert, now);
                    info!(duplicates, "emergency acknowledged by operator");
                    effects.push(Effect::ResetEmergency);
                }
            }
            Msg::SliderStep(steps) => {
                self.settings.slider.step_by(*steps);
            }
            Msg::EmergencyResetFinished(outcome) => {
                let alert = match outcome {
                    Ok(status) => Alert::new("Emergency cleared", status.clone(), AlertSeverity::Info),
                    Err(error) => {
                        warn!(%error, "emergency reset failed");
                        Alert::new("Reset failed", error.clone(), AlertSeverity::Warning)
                    }
                };
                self.notifications.push(alert, now);
            }
            Msg::Quit => {
                self.should_quit = true;
                effects.push(Effect::Quit);
            }
        }
        effects
    }

    pub fn theme(&self) -> &dyn Theme {
        &*self.ctx.theme
    }
}

impl HasFocus for App {
    /// Sidebar first, then the active pane.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.nav_bar.focus);
        builder.leaf_widget(&self.pane_focus);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

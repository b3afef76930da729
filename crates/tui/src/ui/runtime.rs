//! Runtime: terminal lifecycle, event loop and effect execution.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Multiplex terminal input, background messages and the UI tick in a
//!   single `select!` loop.
//! - Execute the `Effect`s returned by `App::update`; network work runs on
//!   spawned tasks that report back through the message channel.
//! - Start the emergency poller on entry and stop it before the terminal is
//!   restored on exit.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use care_inbox_api::{StatusClient, StatusSource};
use care_inbox_types::{Effect, Msg};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc::{self, UnboundedSender},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::RunConfig;
use crate::app::App;
use crate::poller::{ChannelAlertSink, NotificationPoller};
use crate::ui::components::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

/// Toast expiry resolution.
const TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Spawn a blocking task that reads terminal input and forwards it over a
/// channel. The task ends once the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        loop {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if sender.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!(%error, "failed to read terminal event");
                        break;
                    }
                },
                Err(error) => {
                    warn!(%error, "failed to poll terminal events");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut CrosstermTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.is_press() => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// One-shot greeting lookup for the dashboard. Any failure yields `None` so
/// the dashboard keeps whatever text it already shows.
async fn fetch_welcome(source: &dyn StatusSource) -> Option<String> {
    match source.greeting().await {
        Ok(greeting) => Some(greeting.hello),
        Err(error) => {
            debug!(%error, "welcome message unavailable");
            None
        }
    }
}

/// Run `effects`. Returns `true` when one of them asks the loop to stop.
fn process_effects(effects: Vec<Effect>, client: &Arc<StatusClient>, messages: &UnboundedSender<Msg>) -> bool {
    let mut quit = false;
    for effect in effects {
        match effect {
            Effect::FetchWelcome => {
                let client = Arc::clone(client);
                let messages = messages.clone();
                tokio::spawn(async move {
                    let welcome = fetch_welcome(&*client).await;
                    let _ = messages.send(Msg::WelcomeLoaded(welcome));
                });
            }
            Effect::ResetEmergency => {
                let client = Arc::clone(client);
                let messages = messages.clone();
                tokio::spawn(async move {
                    let outcome = client
                        .reset_emergency()
                        .await
                        .map(|ack| ack.status)
                        .map_err(|error| error.to_string());
                    let _ = messages.send(Msg::EmergencyResetFinished(outcome));
                });
            }
            Effect::Quit => quit = true,
        }
    }
    quit
}

/// Entry point for the TUI runtime: sets up the terminal, starts the poller,
/// runs the event loop and tears everything down in reverse order.
pub async fn run_app(config: RunConfig) -> Result<()> {
    let client = Arc::new(StatusClient::new(config.endpoints)?);
    let (message_sender, mut message_receiver) = mpsc::unbounded_channel::<Msg>();

    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut app = App::new(config.dashboard, theme::load(config.theme.as_deref()));

    let source: Arc<dyn StatusSource> = client.clone();
    let mut poller = NotificationPoller::new(
        source,
        Arc::new(ChannelAlertSink::new(message_sender.clone())),
        config.poll_period,
    )
    .start();

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(
        &mut terminal,
        &mut app,
        &mut main_view,
        &client,
        &message_sender,
        &mut message_receiver,
        &mut input_receiver,
    )
    .await;

    // An in-flight status request may still finish; its answer is discarded.
    poller.stop();
    cleanup_terminal(&mut terminal)?;
    info!("care inbox closed");
    outcome
}

async fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    main_view: &mut MainView,
    client: &Arc<StatusClient>,
    message_sender: &UnboundedSender<Msg>,
    message_receiver: &mut mpsc::UnboundedReceiver<Msg>,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut ticker = time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if process_effects(vec![Effect::FetchWelcome], client, message_sender) {
        return Ok(());
    }
    render(terminal, app, main_view)?;

    loop {
        let effects = tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) => handle_input_event(app, main_view, event),
                    None => {
                        debug!("input channel closed");
                        break;
                    }
                }
            }
            // Background tasks: poller alerts, welcome fetch, reset outcome
            Some(message) = message_receiver.recv() => main_view.handle_message(app, message),
            // Toast expiry
            _ = ticker.tick() => main_view.handle_message(app, Msg::Tick),
            _ = signal::ctrl_c() => break,
        };

        if process_effects(effects, client, message_sender) || app.should_quit {
            break;
        }
        render(terminal, app, main_view)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use care_inbox_api::{StatusEndpoints, StatusError};
    use care_inbox_types::{EmergencyStatus, RootGreeting};
    use reqwest::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct UnreachableBackend;

    #[async_trait]
    impl StatusSource for UnreachableBackend {
        async fn greeting(&self) -> Result<RootGreeting, StatusError> {
            Err(StatusError::Status(StatusCode::BAD_GATEWAY))
        }

        async fn emergency_status(&self) -> Result<EmergencyStatus, StatusError> {
            Err(StatusError::Status(StatusCode::BAD_GATEWAY))
        }
    }

    async fn client_answering(status: u16, body: &str) -> (MockServer, StatusClient) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;
        let endpoints = StatusEndpoints::new(format!("{}/", server.uri()), format!("{}/emergency/status", server.uri()));
        let client = StatusClient::new(endpoints).expect("client");
        (server, client)
    }

    #[tokio::test]
    async fn failing_source_yields_no_welcome() {
        assert_eq!(fetch_welcome(&UnreachableBackend).await, None);
    }

    #[tokio::test]
    async fn server_error_yields_no_welcome() {
        let (_server, client) = client_answering(500, "").await;
        assert_eq!(fetch_welcome(&client).await, None);
    }

    #[tokio::test]
    async fn greeting_becomes_the_welcome_text() {
        let (_server, client) = client_answering(200, r#"{"Hello":"World"}"#).await;
        assert_eq!(fetch_welcome(&client).await.as_deref(), Some("World"));
    }

    #[tokio::test]
    async fn fetch_effect_reports_failure_as_empty_welcome() {
        let (_server, client) = client_answering(500, "").await;
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let quit = process_effects(vec![Effect::FetchWelcome], &Arc::new(client), &sender);

        assert!(!quit);
        assert_eq!(receiver.recv().await, Some(Msg::WelcomeLoaded(None)));
    }
}

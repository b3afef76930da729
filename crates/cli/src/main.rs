use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use care_inbox_api::{DEFAULT_EMERGENCY_STATUS_URL, DEFAULT_ROOT_URL, StatusClient, StatusEndpoints, StatusSource};
use care_inbox_tui::RunConfig;
use care_inbox_tui::poller::{AlertSink, NotificationPoller};
use care_inbox_types::{Alert, DashboardConfig};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = "care-inbox";
const LOG_FILE_NAME: &str = "care-inbox.log";

/// Terminal control panel for the Care Inbox email assistant.
#[derive(Parser, Debug)]
#[command(name = "care-inbox", version, about)]
struct Cli {
    /// Backend root URL; `GET /` returns the dashboard greeting
    #[arg(long, env = "CARE_INBOX_ROOT_URL", default_value = DEFAULT_ROOT_URL)]
    root_url: String,

    /// Emergency status endpoint; the reset endpoint is derived from it
    #[arg(long, env = "CARE_INBOX_EMERGENCY_URL", default_value = DEFAULT_EMERGENCY_STATUS_URL)]
    emergency_url: String,

    /// Milliseconds between two emergency checks
    #[arg(long, env = "CARE_INBOX_POLL_INTERVAL_MS", default_value_t = 7000)]
    poll_interval_ms: u64,

    /// Color theme (dracula, nord)
    #[arg(long, env = "CARE_INBOX_THEME")]
    theme: Option<String>,

    /// JSON file replacing the built-in demo dashboard data
    #[arg(long, env = "CARE_INBOX_DASHBOARD_CONFIG", value_name = "FILE")]
    dashboard_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the emergency status once and print it as JSON
    Status,
    /// Clear the backend emergency flag
    Reset,
    /// Poll for emergencies without the TUI, printing each alert
    Watch,
}

impl Cli {
    fn endpoints(&self) -> Result<StatusEndpoints> {
        let endpoints = StatusEndpoints::new(&self.root_url, &self.emergency_url);
        endpoints.validate().context("invalid backend endpoint")?;
        Ok(endpoints)
    }

    fn poll_period(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    fn dashboard(&self) -> Result<DashboardConfig> {
        match &self.dashboard_config {
            Some(path) => DashboardConfig::from_json_file(path)
                .with_context(|| format!("failed to load dashboard config from {}", path.display())),
            None => Ok(DashboardConfig::demo()),
        }
    }
}

/// Prints alerts for the headless `watch` command.
struct StdoutAlertSink;

impl AlertSink for StdoutAlertSink {
    fn show(&self, alert: Alert) {
        println!("[{:?}] {}: {}", alert.severity, alert.title, alert.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // No subcommand => TUI
    let Some(command) = &cli.command else {
        init_file_tracing()?;
        let config = RunConfig {
            dashboard: Arc::new(cli.dashboard()?),
            endpoints: cli.endpoints()?,
            poll_period: cli.poll_period(),
            theme: cli.theme.clone(),
        };
        return care_inbox_tui::run(config).await;
    };

    init_stderr_tracing();
    let client = StatusClient::new(cli.endpoints()?)?;
    match command {
        Commands::Status => {
            let status = client.emergency_status().await.context("failed to fetch emergency status")?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Reset => {
            let ack = client.reset_emergency().await.context("failed to reset emergency")?;
            println!("{}", serde_json::to_string_pretty(&ack)?);
        }
        Commands::Watch => {
            let poller = NotificationPoller::new(Arc::new(client), Arc::new(StdoutAlertSink), cli.poll_period()).start();
            signal::ctrl_c().await.context("failed to listen for Ctrl+C")?;
            poller.shutdown().await;
        }
    }
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Route logs to a file so they do not draw over the TUI.
fn init_file_tracing() -> Result<()> {
    let dir = dirs_next::data_local_dir()
        .context("no local data directory on this platform")?
        .join(LOG_DIR_NAME);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    info!(log_file = %path.display(), "care inbox starting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// The CLI with every `CARE_INBOX_*` lookup switched off.
    fn command_without_env() -> clap::Command {
        let ids: Vec<String> = Cli::command().get_arguments().map(|arg| arg.get_id().to_string()).collect();
        ids.iter()
            .fold(Cli::command(), |command, id| command.mut_arg(id, |arg| arg.env(None::<&str>)))
    }

    fn parse(args: &[&str]) -> Cli {
        let matches = command_without_env().try_get_matches_from(args).unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn defaults_match_backend_constants() {
        let cli = parse(&["care-inbox"]);
        assert_eq!(cli.poll_period(), Duration::from_millis(7000));
        let endpoints = StatusEndpoints::new(&cli.root_url, &cli.emergency_url);
        assert!(endpoints.emergency_reset_url.ends_with("/emergency/reset"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommands_parse() {
        let cli = parse(&["care-inbox", "--poll-interval-ms", "500", "watch"]);
        assert!(matches!(cli.command, Some(Commands::Watch)));
        assert_eq!(cli.poll_period(), Duration::from_millis(500));
    }

    #[test]
    fn plain_http_is_rejected_for_remote_hosts() {
        let cli = parse(&["care-inbox", "--emergency-url", "http://example.com/emergency/status"]);
        assert!(cli.endpoints().is_err());
    }

    #[test]
    fn every_option_has_an_env_fallback() {
        assert!(
            Cli::command()
                .get_arguments()
                .filter(|arg| !arg.is_positional())
                .all(|arg| arg.get_env().is_some())
        );
        assert!(command_without_env().get_arguments().all(|arg| arg.get_env().is_none()));
    }
}

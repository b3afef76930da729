//! Background emergency notifier.
//!
//! The poller asks a [`StatusSource`] for the emergency flag on a fixed
//! period and raises [`Alert::patient_emergency`] on an [`AlertSink`] every
//! time the flag is set. Failures are logged and polling carries on at the
//! same period.
//!
//! The timer is owned by a [`PollerHandle`]. Stopping the handle (explicitly
//! or by dropping it) ends the timer; a response that lands after the stop is
//! discarded rather than turned into an alert.

use std::sync::Arc;
use std::time::Duration;

use care_inbox_api::StatusSource;
use care_inbox_types::{Alert, Msg};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default period between two status checks.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(7000);
/// Shortest period the poller accepts; shorter requests are raised to it.
pub const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// Receives alerts raised by the poller.
pub trait AlertSink: Send + Sync {
    fn show(&self, alert: Alert);
}

/// Forwards alerts to the UI event loop as `Msg::Alert`.
#[derive(Debug, Clone)]
pub struct ChannelAlertSink {
    sender: UnboundedSender<Msg>,
}

impl ChannelAlertSink {
    pub fn new(sender: UnboundedSender<Msg>) -> Self {
        Self { sender }
    }
}

impl AlertSink for ChannelAlertSink {
    fn show(&self, alert: Alert) {
        if self.sender.send(Msg::Alert(alert)).is_err() {
            debug!("alert dropped; UI channel closed");
        }
    }
}

pub struct NotificationPoller {
    source: Arc<dyn StatusSource>,
    sink: Arc<dyn AlertSink>,
    period: Duration,
}

impl NotificationPoller {
    pub fn new(source: Arc<dyn StatusSource>, sink: Arc<dyn AlertSink>, period: Duration) -> Self {
        Self {
            source,
            sink,
            period: period.max(MIN_POLL_PERIOD),
        }
    }

    /// Spawn the polling task on the current Tokio runtime.
    ///
    /// The first check runs one full period after this call.
    pub fn start(self) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(self.source, self.sink, self.period, cancel.clone()));
        info!(period_ms = self.period.as_millis() as u64, "emergency poller started");
        PollerHandle {
            cancel: Some(cancel),
            task: Some(task),
        }
    }
}

/// Scoped owner of a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the timer. Returns `true` the first time it is called and `false`
    /// afterwards.
    pub fn stop(&mut self) -> bool {
        match self.cancel.take() {
            Some(cancel) => {
                cancel.cancel();
                info!("emergency poller stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Stop the timer and wait for the polling task to wind down. An
    /// in-flight request is allowed to finish; its result is ignored.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take()
            && let Err(error) = task.await
        {
            warn!(%error, "emergency poller task ended abnormally");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(source: Arc<dyn StatusSource>, sink: Arc<dyn AlertSink>, period: Duration, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = source.emergency_status().await;
        if cancel.is_cancelled() {
            debug!("discarding emergency status received after stop");
            break;
        }

        match outcome {
            Ok(status) if status.emergency_active => {
                warn!(
                    thread_id = status.last_thread_id.as_deref().unwrap_or("-"),
                    message = status.message.as_deref().unwrap_or("-"),
                    "emergency flagged by agent"
                );
                sink.show(Alert::patient_emergency());
            }
            Ok(_) => debug!("no active emergency"),
            Err(error) => warn!(%error, "error fetching emergency status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use care_inbox_api::StatusError;
    use care_inbox_types::{EmergencyStatus, RootGreeting};
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PERIOD: Duration = DEFAULT_POLL_PERIOD;

    #[derive(Clone, Copy)]
    enum Reply {
        Active,
        Inactive,
        Fail,
    }

    /// Replays scripted replies; repeats the last one when the script runs out.
    struct ScriptedSource {
        replies: Mutex<VecDeque<Reply>>,
        last: Mutex<Reply>,
        calls: AtomicUsize,
        latency: Duration,
    }

    impl ScriptedSource {
        fn new(replies: &[Reply]) -> Arc<Self> {
            Self::with_latency(replies, Duration::ZERO)
        }

        fn with_latency(replies: &[Reply], latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().copied().collect()),
                last: Mutex::new(*replies.last().unwrap_or(&Reply::Inactive)),
                calls: AtomicUsize::new(0),
                latency,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn greeting(&self) -> Result<RootGreeting, StatusError> {
            Ok(RootGreeting { hello: "World".into() })
        }

        async fn emergency_status(&self) -> Result<EmergencyStatus, StatusError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                time::sleep(self.latency).await;
            }
            let reply = self.replies.lock().unwrap().pop_front().unwrap_or(*self.last.lock().unwrap());
            match reply {
                Reply::Active => Ok(EmergencyStatus {
                    emergency_active: true,
                    ..EmergencyStatus::default()
                }),
                Reply::Inactive => Ok(EmergencyStatus::default()),
                Reply::Fail => Err(StatusError::Status(StatusCode::SERVICE_UNAVAILABLE)),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        alerts: Mutex<Vec<Alert>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.alerts.lock().unwrap().len()
        }
    }

    impl AlertSink for RecordingSink {
        fn show(&self, alert: Alert) {
            self.alerts.lock().unwrap().push(alert);
        }
    }

    fn start(source: &Arc<ScriptedSource>, sink: &Arc<RecordingSink>) -> PollerHandle {
        NotificationPoller::new(source.clone(), sink.clone(), PERIOD).start()
    }

    /// Let the clock run just past `n` periods from now.
    async fn run_periods(n: u32) {
        time::sleep(PERIOD * n + Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_request_before_first_period() {
        let source = ScriptedSource::new(&[Reply::Active]);
        let sink = Arc::new(RecordingSink::default());
        let _handle = start(&source, &sink);

        time::sleep(PERIOD - Duration::from_millis(1)).await;
        assert_eq!(source.calls(), 0);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn one_alert_per_positive_tick_without_dedup() {
        let source = ScriptedSource::new(&[Reply::Active]);
        let sink = Arc::new(RecordingSink::default());
        let _handle = start(&source, &sink);

        run_periods(3).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(sink.count(), 3);
        assert!(sink.alerts.lock().unwrap().iter().all(|a| *a == Alert::patient_emergency()));
    }

    #[tokio::test(start_paused = true)]
    async fn inactive_and_failed_ticks_raise_nothing_and_polling_continues() {
        let source = ScriptedSource::new(&[Reply::Inactive, Reply::Fail, Reply::Fail, Reply::Active]);
        let sink = Arc::new(RecordingSink::default());
        let _handle = start(&source, &sink);

        run_periods(3).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(sink.count(), 0);

        run_periods(1).await;
        assert_eq!(source.calls(), 4);
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_stop() {
        let source = ScriptedSource::new(&[Reply::Active]);
        let sink = Arc::new(RecordingSink::default());
        let mut handle = start(&source, &sink);

        run_periods(2).await;
        assert_eq!(source.calls(), 2);

        assert!(handle.stop());
        assert!(!handle.stop());
        assert!(!handle.is_running());

        run_periods(10).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(sink.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() {
        let source = ScriptedSource::new(&[Reply::Inactive]);
        let sink = Arc::new(RecordingSink::default());
        drop(start(&source, &sink));

        run_periods(5).await;
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn response_after_stop_is_ignored() {
        let source = ScriptedSource::with_latency(&[Reply::Active], Duration::from_secs(3));
        let sink = Arc::new(RecordingSink::default());
        let mut handle = start(&source, &sink);

        // The first request starts at 7 s and answers at 10 s; stop in between.
        time::sleep(PERIOD + Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);
        handle.stop();

        run_periods(3).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_the_task() {
        let source = ScriptedSource::new(&[Reply::Inactive]);
        let sink = Arc::new(RecordingSink::default());
        let handle = start(&source, &sink);

        run_periods(1).await;
        handle.shutdown().await;

        run_periods(4).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_raised_to_the_minimum() {
        let source = ScriptedSource::new(&[Reply::Inactive]);
        let sink = Arc::new(RecordingSink::default());
        let poller = NotificationPoller::new(source.clone(), sink.clone(), Duration::ZERO);
        assert_eq!(poller.period, MIN_POLL_PERIOD);

        let mut handle = poller.start();
        time::sleep(MIN_POLL_PERIOD * 3 + Duration::from_micros(500)).await;
        assert!(source.calls() >= 1);

        handle.stop();
        let task = handle.task.take().expect("task");
        assert!(task.await.is_ok());
    }

    #[tokio::test]
    async fn channel_sink_forwards_alert_messages() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        ChannelAlertSink::new(sender).show(Alert::patient_emergency());
        assert_eq!(receiver.recv().await, Some(Msg::Alert(Alert::patient_emergency())));
    }
}

//! Background payment monitoring: the repeating poll timer and its lifecycle.
//!
//! `start` arms at most one timer, `stop` disarms it without interrupting a
//! cycle already in flight, and `run_once` runs a cycle immediately. Cycles may
//! overlap; they share nothing but the notifier's dedup set.

pub mod cycle;
pub mod wake;


pub use cycle::{
    AckError, Acknowledger, AnnouncementSource, CycleOutcome, FetchError, PaymentService,
    run_cycle,
};
pub use wake::{CommandWake, NoPeriodicWake, PeriodicWake};

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::notification::Notifier;

/// Timer periods used by the controller.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    pub poll_interval: Duration,
    pub wake_interval: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            wake_interval: Duration::from_secs(120),
        }
    }
}

/// Snapshot of the loop for diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollStatus {
    pub running: bool,
    pub last_outcome: Option<CycleOutcome>,
}

struct PollTimer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollTimer {
    fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && !self.task.is_finished()
    }
}

struct ControllerInner {
    source: Arc<dyn AnnouncementSource>,
    acker: Arc<dyn Acknowledger>,
    notifier: Arc<Notifier>,
    wake: Arc<dyn PeriodicWake>,
    schedule: PollSchedule,
    timer: Mutex<Option<PollTimer>>,
    last_outcome: std::sync::Mutex<Option<CycleOutcome>>,
}

/// Lifecycle controller for background monitoring. Cheap to clone.
#[derive(Clone)]
pub struct PollingController {
    inner: Arc<ControllerInner>,
}

impl PollingController {
    pub fn new(
        source: Arc<dyn AnnouncementSource>,
        acker: Arc<dyn Acknowledger>,
        notifier: Arc<Notifier>,
        wake: Arc<dyn PeriodicWake>,
        schedule: PollSchedule,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                source,
                acker,
                notifier,
                wake,
                schedule,
                timer: Mutex::new(None),
                last_outcome: std::sync::Mutex::new(None),
            }),
        }
    }

    /// Startup transition: start monitoring and check immediately.
    pub async fn activate(&self) -> CycleOutcome {
        tracing::info!("Background notifier activated");
        self.start().await;
        self.run_once().await
    }

    /// Arm the repeating timer. Returns `false` if it was already running.
    pub async fn start(&self) -> bool {
        let mut slot = self.inner.timer.lock().await;
        if slot.as_ref().is_some_and(PollTimer::is_active) {
            tracing::debug!("Background monitoring already running");
            return false;
        }
        if let Some(stale) = slot.take() {
            stale.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(timer_loop(self.inner.clone(), cancel.clone()));
        *slot = Some(PollTimer { cancel, task });

        let wake_interval = self.inner.schedule.wake_interval;
        if self.inner.wake.try_register_periodic_wake(wake_interval) {
            tracing::info!(interval_secs = wake_interval.as_secs(), "Periodic wake-up registered");
        } else {
            tracing::warn!("Periodic wake-up unavailable, relying on poll timer only");
        }

        tracing::info!(
            interval_secs = self.inner.schedule.poll_interval.as_secs(),
            "Background monitoring started"
        );
        true
    }

    /// Disarm the timer. Returns `false` if it was not running.
    pub async fn stop(&self) -> bool {
        let mut slot = self.inner.timer.lock().await;
        let Some(timer) = slot.take() else {
            return false;
        };
        timer.cancel.cancel();
        self.inner.wake.unregister_periodic_wake();
        tracing::info!("Background monitoring stopped");
        true
    }

    /// Run one cycle now, independent of the timer.
    pub async fn run_once(&self) -> CycleOutcome {
        self.inner.run_once().await
    }

    pub async fn is_running(&self) -> bool {
        self.inner
            .timer
            .lock()
            .await
            .as_ref()
            .is_some_and(PollTimer::is_active)
    }

    pub async fn status(&self) -> PollStatus {
        PollStatus {
            running: self.is_running().await,
            last_outcome: self.inner.last_outcome(),
        }
    }
}

impl ControllerInner {
    async fn run_once(&self) -> CycleOutcome {
        let outcome = run_cycle(&*self.source, &*self.acker, &self.notifier).await;
        if let Ok(mut last) = self.last_outcome.lock() {
            *last = Some(outcome.clone());
        }
        outcome
    }

    fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome.lock().ok().and_then(|last| last.clone())
    }
}

async fn timer_loop(inner: Arc<ControllerInner>, cancel: CancellationToken) {
    let period = inner.schedule.poll_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                inner.run_once().await;
            }
        }
    }
    tracing::debug!("Poll timer task exited");
}

//! Optional coarse periodic wake-up.
//!
//! The repeating poll timer is the primary mechanism; a wake-up only bounds
//! detection latency when that timer is not enough.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::commands::Command;

pub trait PeriodicWake: Send + Sync {
    /// Ask for a wake-up every `interval`. Returns `false` if not available.
    fn try_register_periodic_wake(&self, interval: Duration) -> bool;

    fn unregister_periodic_wake(&self) {}
}

/// Hosts without any periodic wake-up facility.
pub struct NoPeriodicWake;

impl PeriodicWake for NoPeriodicWake {
    fn try_register_periodic_wake(&self, _interval: Duration) -> bool {
        false
    }
}

/// Wake-up that enqueues `CHECK_NOW` on the command channel.
pub struct CommandWake {
    tx: mpsc::Sender<Command>,
    shutdown: CancellationToken,
    active: Mutex<Option<CancellationToken>>,
}

impl CommandWake {
    pub fn new(tx: mpsc::Sender<Command>, shutdown: CancellationToken) -> Self {
        Self {
            tx,
            shutdown,
            active: Mutex::new(None),
        }
    }
}

impl PeriodicWake for CommandWake {
    fn try_register_periodic_wake(&self, interval: Duration) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return false;
        };
        let Ok(mut active) = self.active.lock() else {
            return false;
        };
        if let Some(previous) = active.take() {
            previous.cancel();
        }

        let token = self.shutdown.child_token();
        *active = Some(token.clone());
        runtime.spawn(wake_loop(self.tx.clone(), token, interval));
        true
    }

    fn unregister_periodic_wake(&self) {
        if let Ok(mut active) = self.active.lock() {
            if let Some(token) = active.take() {
                token.cancel();
            }
        }
    }
}

async fn wake_loop(tx: mpsc::Sender<Command>, token: CancellationToken, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                match tx.try_send(Command::CheckNow) {
                    Ok(()) => tracing::debug!("Periodic wake-up queued a payment check"),
                    Err(TrySendError::Full(_)) => {
                        tracing::debug!("Command queue full, skipping periodic wake-up");
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_without_runtime_fails() {
        let (tx, _rx) = mpsc::channel(4);
        let wake = CommandWake::new(tx, CancellationToken::new());
        assert!(!wake.try_register_periodic_wake(Duration::from_secs(120)));
    }

    #[test]
    fn no_periodic_wake_never_registers() {
        assert!(!NoPeriodicWake.try_register_periodic_wake(Duration::from_secs(120)));
    }

    #[tokio::test(start_paused = true)]
    async fn registered_wake_queues_checks_until_unregistered() {
        let (tx, mut rx) = mpsc::channel(8);
        let wake = CommandWake::new(tx, CancellationToken::new());

        assert!(wake.try_register_periodic_wake(Duration::from_secs(120)));
        tokio::time::sleep(Duration::from_secs(241)).await;
        assert_eq!(rx.try_recv().unwrap(), Command::CheckNow);
        assert_eq!(rx.try_recv().unwrap(), Command::CheckNow);
        assert!(rx.try_recv().is_err());

        wake.unregister_periodic_wake();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_wake() {
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let wake = CommandWake::new(tx, shutdown.clone());

        assert!(wake.try_register_periodic_wake(Duration::from_secs(120)));
        shutdown.cancel();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(rx.try_recv().is_err());
    }
}

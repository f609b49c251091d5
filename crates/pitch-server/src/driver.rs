use std::sync::{Arc, Mutex};
use std::time::Duration;

use pitch_core::clock::TickOutcome;
use pitch_core::TimerSession;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::lock_session;

/// The 1 Hz tick source. At most one tick task runs at a time; stopping it
/// aborts the task so no tick lands after a pause or reset.
#[derive(Debug)]
pub struct TickDriver {
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: Mutex::new(None),
        }
    }

    /// Begin ticking `session`, replacing any running tick task.
    pub fn start(&self, session: Arc<Mutex<TimerSession>>) {
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let outcome = lock_session(&session).tick();
                match outcome {
                    TickOutcome::Counted { .. } => {}
                    TickOutcome::Expired => {
                        tracing::info!("countdown expired");
                        break;
                    }
                    TickOutcome::Idle => break,
                }
            }
        });
        if let Some(old) = self.slot().replace(handle) {
            old.abort();
        }
    }

    pub fn stop(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

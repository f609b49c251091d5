//! Side-effect surface of a [`TimerSession`](crate::session::TimerSession).
//!
//! The session never renders or plays anything itself. Render callbacks are
//! delivered as [`SessionEvent`]s; segment actions and cue stops are handed
//! over through [`SessionHooks`] and are fire-and-forget: implementations
//! must return without waiting on audio or network work.

use crate::clock::ClockView;
use crate::segment::SegmentAction;
use crate::session::CheckpointRow;
use crate::types::{Checkpoint, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Clock display changed (tick, start, pause or reset).
    Clock(ClockView),
    /// Countdown reached zero.
    Expired { message: String },
    /// Transient banner for a fired checkpoint.
    SegmentTriggered {
        segment: String,
        checkpoint: Checkpoint,
        display_ms: u64,
        fired_at: DateTime<Utc>,
    },
    /// Per-checkpoint reveal/swap rows changed. Unrevealed names are masked.
    Checkpoints { rows: Vec<CheckpointRow> },
    ModeChanged { mode: Mode },
    /// Manual cue deck changed what is playing.
    CueChanged { playing: Option<String> },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Clock(_) => "clock",
            SessionEvent::Expired { .. } => "expired",
            SessionEvent::SegmentTriggered { .. } => "segment_triggered",
            SessionEvent::Checkpoints { .. } => "checkpoints",
            SessionEvent::ModeChanged { .. } => "mode_changed",
            SessionEvent::CueChanged { .. } => "cue_changed",
        }
    }
}

pub trait SessionHooks: Send + Sync {
    /// Render callback. Return value is never observed.
    fn emit(&self, event: SessionEvent);

    /// Start one segment action. Must not block.
    fn perform(&self, action: &SegmentAction);

    /// Stop a cue started by the manual deck.
    fn stop_cue(&self, cue: &str);
}

/// Hooks that discard everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {
    fn emit(&self, _event: SessionEvent) {}
    fn perform(&self, _action: &SegmentAction) {}
    fn stop_cue(&self, _cue: &str) {}
}

/// One recorded side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Event(SessionEvent),
    Perform(SegmentAction),
    StopCue(String),
}

/// Hooks that keep every side effect in memory. Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    log: Mutex<Vec<Recorded>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Recorded> {
        match self.log.lock() {
            Ok(mut log) => std::mem::take(&mut *log),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.snapshot()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Event(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn performed(&self) -> Vec<SegmentAction> {
        self.snapshot()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Perform(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn snapshot(&self) -> Vec<Recorded> {
        match self.log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, entry: Recorded) {
        match self.log.lock() {
            Ok(mut log) => log.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

impl SessionHooks for RecordingHooks {
    fn emit(&self, event: SessionEvent) {
        self.push(Recorded::Event(event));
    }

    fn perform(&self, action: &SegmentAction) {
        self.push(Recorded::Perform(action.clone()));
    }

    fn stop_cue(&self, cue: &str) {
        self.push(Recorded::StopCue(cue.to_string()));
    }
}

impl<T: SessionHooks + ?Sized> SessionHooks for std::sync::Arc<T> {
    fn emit(&self, event: SessionEvent) {
        (**self).emit(event)
    }

    fn perform(&self, action: &SegmentAction) {
        (**self).perform(action)
    }

    fn stop_cue(&self, cue: &str) {
        (**self).stop_cue(cue)
    }
}

use crate::hooks::{SessionEvent, SessionHooks};
use crate::selector::Assignment;
use crate::types::Checkpoint;
use chrono::Utc;
use std::collections::BTreeMap;

/// Whether each checkpoint has fired in the current run.
///
/// A checkpoint goes `pending -> fired` once per run; only [`clear`](Self::clear)
/// (driven by a full timer reset) puts it back to pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggeredSet {
    fired: BTreeMap<Checkpoint, bool>,
}

impl TriggeredSet {
    pub fn new(checkpoints: &[Checkpoint]) -> Self {
        Self {
            fired: checkpoints.iter().map(|c| (*c, false)).collect(),
        }
    }

    pub fn is_fired(&self, checkpoint: Checkpoint) -> bool {
        self.fired.get(&checkpoint).copied().unwrap_or(false)
    }

    /// Mark fired. Returns `false` if it had already fired this run.
    fn mark(&mut self, checkpoint: Checkpoint) -> bool {
        let slot = self.fired.entry(checkpoint).or_insert(false);
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn clear(&mut self) {
        for fired in self.fired.values_mut() {
            *fired = false;
        }
    }
}

/// A checkpoint that fired on this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub checkpoint: Checkpoint,
    /// `None` when nothing was assigned; the checkpoint is still consumed.
    pub segment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TriggerScheduler {
    checkpoints: Vec<Checkpoint>,
    triggered: TriggeredSet,
    notification_ms: u64,
}

impl TriggerScheduler {
    pub fn new(checkpoints: Vec<Checkpoint>, notification_ms: u64) -> Self {
        let triggered = TriggeredSet::new(&checkpoints);
        Self {
            checkpoints,
            triggered,
            notification_ms,
        }
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn triggered(&self) -> &TriggeredSet {
        &self.triggered
    }

    pub fn reset(&mut self) {
        self.triggered.clear();
    }

    /// Fire the checkpoint whose instant is exactly `remaining_seconds`, once.
    ///
    /// Exact equality, not `<=`: the countdown passes each value once per run,
    /// so this is the single firing instant. Actions run in list order and are
    /// not awaited.
    pub fn on_tick(
        &mut self,
        remaining_seconds: u32,
        assignment: &Assignment,
        hooks: &dyn SessionHooks,
    ) -> Option<Firing> {
        let checkpoint = self
            .checkpoints
            .iter()
            .copied()
            .find(|c| c.seconds() == Some(remaining_seconds))?;

        if !self.triggered.mark(checkpoint) {
            return None;
        }

        let Some(segment) = assignment.get(checkpoint) else {
            tracing::debug!(%checkpoint, "checkpoint reached with no assigned segment");
            return Some(Firing {
                checkpoint,
                segment: None,
            });
        };

        tracing::info!(
            segment = %segment.name,
            %checkpoint,
            "triggering segment"
        );

        hooks.emit(SessionEvent::SegmentTriggered {
            segment: segment.name.clone(),
            checkpoint,
            display_ms: self.notification_ms,
            fired_at: Utc::now(),
        });
        for action in &segment.actions {
            hooks.perform(action);
        }

        Some(Firing {
            checkpoint,
            segment: Some(segment.name.clone()),
        })
    }
}

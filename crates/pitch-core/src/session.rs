//! The `TimerSession` aggregate: one owned value holding the clock, the
//! checkpoint assignment, trigger history, reveal/swap state and the manual
//! cue deck, plus the mode coordination rules that tie them together.
//!
//! All operations are synchronous and must be called from one place at a
//! time (a host wraps the session in a single mutex). Side effects leave
//! through [`SessionHooks`] and are never awaited.

use crate::clock::{Clock, ClockView, TickOutcome};
use crate::config::Config;
use crate::cue::CueDeck;
use crate::error::{PitchError, Result};
use crate::hooks::{SessionEvent, SessionHooks};
use crate::reveal::RevealSwapController;
use crate::scheduler::{TriggerScheduler, TriggeredSet};
use crate::segment::{Catalog, SegmentAction};
use crate::selector::{select_for_checkpoints, Assignment};
use crate::types::{Checkpoint, Mode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub total_seconds: u32,
    pub warning_seconds: u32,
    pub checkpoints: Vec<Checkpoint>,
    pub notification_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            total_seconds: config.timer.total_seconds,
            warning_seconds: config.timer.warning_seconds,
            checkpoints: config.timer.checkpoints.clone(),
            notification_ms: config.notification_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// One reveal/swap row. `name` is only present while the row is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointRow {
    pub checkpoint: Checkpoint,
    pub label: String,
    pub assigned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub revealed: bool,
    pub swap_armed: bool,
    pub triggered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub clock: ClockView,
    pub checkpoints: Vec<CheckpointRow>,
    pub swap_target: Option<Checkpoint>,
    pub playing_cue: Option<String>,
    pub segments: Vec<String>,
}

/// Result of clicking a segment tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TileOutcome {
    /// The tile filled the swap-armed checkpoint; nothing was played.
    Swapped { checkpoint: Checkpoint },
    Played { cue: Option<String> },
    Stopped { cue: String },
}

// ---------------------------------------------------------------------------
// TimerSession
// ---------------------------------------------------------------------------

pub struct TimerSession {
    clock: Clock,
    catalog: Catalog,
    mode: Mode,
    assignment: Assignment,
    scheduler: TriggerScheduler,
    reveal: RevealSwapController,
    deck: CueDeck,
    rng: StdRng,
    hooks: Arc<dyn SessionHooks>,
}

impl TimerSession {
    pub fn new(settings: SessionSettings, catalog: Catalog, hooks: Arc<dyn SessionHooks>) -> Self {
        Self {
            clock: Clock::new(settings.total_seconds, settings.warning_seconds),
            catalog,
            mode: Mode::Manual,
            assignment: Assignment::default(),
            scheduler: TriggerScheduler::new(settings.checkpoints, settings.notification_ms),
            reveal: RevealSwapController::new(),
            deck: CueDeck::new(),
            rng: StdRng::from_entropy(),
            hooks,
        }
    }

    /// Make segment draws reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        self.scheduler.checkpoints()
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn triggered(&self) -> &TriggeredSet {
        self.scheduler.triggered()
    }

    pub fn swap_target(&self) -> Option<Checkpoint> {
        self.reveal.swap_target()
    }

    pub fn is_revealed(&self, checkpoint: Checkpoint) -> bool {
        self.reveal.is_revealed(checkpoint)
    }

    pub fn playing_cue(&self) -> Option<&str> {
        self.deck.playing()
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    pub fn start(&mut self) -> bool {
        let started = self.clock.start();
        if started {
            self.emit_clock();
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.clock.pause();
        if paused {
            self.emit_clock();
        }
        paused
    }

    /// Stop the countdown, restore the start value and clear per-run state.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.emit_clock();
        self.on_timer_reset();
    }

    /// One second elapsed. Ticks arriving while paused are ignored.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.clock.tick();
        if outcome == TickOutcome::Idle {
            return outcome;
        }
        self.emit_clock();

        // Checkpoints are consulted before expiry handling.
        if self.mode.is_automatic() {
            let remaining = self.clock.remaining_seconds();
            let fired = self
                .scheduler
                .on_tick(remaining, &self.assignment, self.hooks.as_ref());
            if fired.is_some() {
                self.emit_rows();
            }
        }

        if outcome == TickOutcome::Expired {
            let minutes = self.clock.total_seconds() / 60;
            self.hooks.emit(SessionEvent::Expired {
                message: format!("Timer complete! {minutes} minutes have elapsed."),
            });
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Mode coordination
    // -----------------------------------------------------------------------

    /// Switch mode. Returns `false` if already in `mode`.
    ///
    /// Entering automatic draws fresh segments and clears reveal/swap state.
    /// Leaving it keeps the assignment and trigger history, so checkpoints
    /// already fired this run stay fired across a round-trip.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        match mode {
            Mode::Automatic => {
                self.select_segments();
                self.reveal.reset();
            }
            Mode::Manual => self.reveal.disarm(),
        }
        self.hooks.emit(SessionEvent::ModeChanged { mode });
        self.emit_rows();
        true
    }

    /// Explicit re-draw while automatic. No-op in manual mode.
    pub fn reselect(&mut self) -> bool {
        if !self.mode.is_automatic() {
            return false;
        }
        self.select_segments();
        self.reveal.reset();
        self.emit_rows();
        true
    }

    fn on_timer_reset(&mut self) {
        self.scheduler.reset();
        self.reveal.reset();
        if self.mode.is_automatic() {
            self.select_segments();
        } else {
            self.assignment.clear();
        }
        self.emit_rows();
    }

    fn select_segments(&mut self) {
        self.assignment =
            select_for_checkpoints(&self.catalog, self.scheduler.checkpoints(), &mut self.rng);
    }

    // -----------------------------------------------------------------------
    // Reveal / swap
    // -----------------------------------------------------------------------

    pub fn reveal(&mut self, checkpoint: Checkpoint) -> Result<bool> {
        self.update_reveal(checkpoint, |r| r.reveal(checkpoint))
    }

    pub fn hide(&mut self, checkpoint: Checkpoint) -> Result<bool> {
        self.update_reveal(checkpoint, |r| r.hide(checkpoint))
    }

    /// Flip reveal state; returns the new state.
    pub fn toggle_reveal(&mut self, checkpoint: Checkpoint) -> Result<bool> {
        self.ensure_configured(checkpoint)?;
        if !self.assignment.contains(checkpoint) {
            return Ok(false);
        }
        let revealed = self.reveal.toggle_reveal(checkpoint);
        self.emit_rows();
        Ok(revealed)
    }

    fn update_reveal(
        &mut self,
        checkpoint: Checkpoint,
        f: impl FnOnce(&mut RevealSwapController) -> bool,
    ) -> Result<bool> {
        self.ensure_configured(checkpoint)?;
        if !self.assignment.contains(checkpoint) {
            return Ok(false);
        }
        let changed = f(&mut self.reveal);
        if changed {
            self.emit_rows();
        }
        Ok(changed)
    }

    /// Arm or disarm `checkpoint` for swap; returns the armed checkpoint after
    /// the toggle.
    pub fn toggle_swap_mode(&mut self, checkpoint: Checkpoint) -> Result<Option<Checkpoint>> {
        self.ensure_configured(checkpoint)?;
        if !self.assignment.contains(checkpoint) {
            return Ok(self.reveal.swap_target());
        }
        self.reveal.toggle_swap_mode(checkpoint);
        self.emit_rows();
        Ok(self.reveal.swap_target())
    }

    /// Route a tile selection into the armed checkpoint.
    ///
    /// Returns `false` when nothing is armed or `segment_name` is unknown; the
    /// caller then plays the tile instead. Trigger history is not touched, so
    /// swapping a checkpoint that already fired has no effect until the next
    /// reset.
    pub fn handle_swap_select(&mut self, segment_name: &str) -> bool {
        let Some(target) = self.reveal.swap_target() else {
            return false;
        };
        if !self
            .reveal
            .handle_swap_select(segment_name, &self.catalog, &mut self.assignment)
        {
            return false;
        }
        if self.scheduler.triggered().is_fired(target) {
            tracing::info!(
                checkpoint = %target,
                segment = segment_name,
                "swapped a checkpoint that already fired; takes effect after reset"
            );
        }
        self.emit_rows();
        true
    }

    // -----------------------------------------------------------------------
    // Tiles / manual cues
    // -----------------------------------------------------------------------

    /// A segment tile was clicked: fill the swap slot if one is armed,
    /// otherwise play (or stop) the tile.
    pub fn select_tile(&mut self, segment_name: &str) -> Result<TileOutcome> {
        if let Some(target) = self.reveal.swap_target() {
            if self.handle_swap_select(segment_name) {
                return Ok(TileOutcome::Swapped { checkpoint: target });
            }
        }

        let segment = self
            .catalog
            .get(segment_name)
            .cloned()
            .ok_or_else(|| PitchError::SegmentNotFound(segment_name.to_string()))?;

        let cue = match segment.tile_cue() {
            Some(SegmentAction::PlayCue { cue }) => Some(cue.clone()),
            Some(SegmentAction::PlayRandomCue { cues }) if !cues.is_empty() => {
                Some(cues[self.rng.gen_range(0..cues.len())].clone())
            }
            _ => None,
        };

        let outcome = match cue {
            Some(cue) => {
                let change = self.deck.press(&segment.name, &cue);
                if let Some(stop) = &change.stop {
                    self.hooks.stop_cue(stop);
                }
                let outcome = match change.start {
                    Some(start) => {
                        self.hooks.perform(&SegmentAction::play_cue(start.clone()));
                        TileOutcome::Played { cue: Some(start) }
                    }
                    None => TileOutcome::Stopped { cue },
                };
                self.hooks.emit(SessionEvent::CueChanged {
                    playing: self.deck.playing().map(str::to_string),
                });
                outcome
            }
            None => TileOutcome::Played { cue: None },
        };

        if matches!(outcome, TileOutcome::Played { .. }) {
            for action in segment.actions.iter().filter(|a| !a.is_cue()) {
                self.hooks.perform(action);
            }
        }
        Ok(outcome)
    }

    /// Playback of a manual cue ended on its own.
    pub fn cue_finished(&mut self, cue: &str) -> bool {
        let cleared = self.deck.finished(cue);
        if cleared {
            self.hooks.emit(SessionEvent::CueChanged { playing: None });
        }
        cleared
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn rows(&self) -> Vec<CheckpointRow> {
        self.scheduler
            .checkpoints()
            .iter()
            .map(|&checkpoint| {
                let segment = self.assignment.get(checkpoint);
                let assigned = segment.is_some();
                let revealed = assigned && self.reveal.is_revealed(checkpoint);
                CheckpointRow {
                    checkpoint,
                    label: checkpoint.label(),
                    assigned,
                    name: segment.filter(|_| revealed).map(|s| s.name.clone()),
                    revealed,
                    swap_armed: assigned && self.reveal.is_swap_armed(checkpoint),
                    triggered: self.scheduler.triggered().is_fired(checkpoint),
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            clock: self.clock.view(),
            checkpoints: self.rows(),
            swap_target: self.reveal.swap_target(),
            playing_cue: self.deck.playing().map(str::to_string),
            segments: self
                .catalog
                .segments()
                .iter()
                .map(|s| s.name.clone())
                .collect(),
        }
    }

    fn ensure_configured(&self, checkpoint: Checkpoint) -> Result<()> {
        if self.scheduler.checkpoints().contains(&checkpoint) {
            Ok(())
        } else {
            Err(PitchError::CheckpointNotConfigured(checkpoint.minutes()))
        }
    }

    fn emit_clock(&self) {
        self.hooks.emit(SessionEvent::Clock(self.clock.view()));
    }

    fn emit_rows(&self) {
        self.hooks.emit(SessionEvent::Checkpoints { rows: self.rows() });
    }
}

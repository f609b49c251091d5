use serde::{Deserialize, Serialize};

pub const DEFAULT_TOTAL_SECONDS: u32 = 30 * 60;
pub const DEFAULT_WARNING_SECONDS: u32 = 5 * 60;

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockView {
    pub remaining_seconds: u32,
    pub display: String,
    pub warning: bool,
    pub running: bool,
}

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    /// Counted down to `remaining`, still above zero.
    Counted { remaining: u32 },
    /// Reached zero on this tick and stopped.
    Expired,
}

/// One-second-resolution countdown. Owns run/pause/reset; the tick source
/// itself lives with whoever hosts the session.
#[derive(Debug, Clone)]
pub struct Clock {
    total_seconds: u32,
    warning_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

impl Clock {
    pub fn new(total_seconds: u32, warning_seconds: u32) -> Self {
        Self {
            total_seconds,
            warning_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_warning(&self) -> bool {
        self.remaining_seconds <= self.warning_seconds && self.remaining_seconds > 0
    }

    /// Returns `false` when already running or already at zero.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns `false` when already paused.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    pub fn reset(&mut self) {
        self.pause();
        self.remaining_seconds = self.total_seconds;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted {
                remaining: self.remaining_seconds,
            }
        }
    }

    pub fn view(&self) -> ClockView {
        ClockView {
            remaining_seconds: self.remaining_seconds,
            display: format_time(self.remaining_seconds),
            warning: self.is_warning(),
            running: self.running,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SECONDS, DEFAULT_WARNING_SECONDS)
    }
}

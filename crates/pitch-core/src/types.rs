use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Checkpoint
// ---------------------------------------------------------------------------

/// A countdown instant, in whole minutes remaining, at which a segment fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checkpoint(u32);

impl Checkpoint {
    pub const TWENTY: Checkpoint = Checkpoint(20);
    pub const TEN: Checkpoint = Checkpoint(10);

    pub const fn from_minutes(minutes: u32) -> Self {
        Checkpoint(minutes)
    }

    pub fn defaults() -> Vec<Checkpoint> {
        vec![Checkpoint::TWENTY, Checkpoint::TEN]
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Remaining-seconds value at which this checkpoint fires, or `None` if
    /// the minute count does not fit in seconds.
    pub fn seconds(self) -> Option<u32> {
        self.0.checked_mul(60)
    }

    pub fn label(self) -> String {
        format!("{:02}:00", self.0)
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl std::str::FromStr for Checkpoint {
    type Err = crate::error::PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both "20" and "20:00".
        let minutes = s.strip_suffix(":00").unwrap_or(s);
        minutes
            .parse::<u32>()
            .map(Checkpoint)
            .map_err(|_| crate::error::PitchError::InvalidCheckpoint(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Manual,
    Automatic,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Manual => "manual",
            Mode::Automatic => "automatic",
        }
    }

    pub fn is_automatic(self) -> bool {
        self == Mode::Automatic
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = crate::error::PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Mode::Manual),
            "automatic" | "auto" => Ok(Mode::Automatic),
            _ => Err(crate::error::PitchError::InvalidMode(s.to_string())),
        }
    }
}

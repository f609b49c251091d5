use crate::error::{PitchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// SegmentAction
// ---------------------------------------------------------------------------

/// One step of a segment. The session never interprets these: it hands them
/// to [`SessionHooks::perform`](crate::hooks::SessionHooks::perform) in list
/// order and does not observe the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentAction {
    PlayCue {
        cue: String,
    },
    /// Pick one of `cues` uniformly at perform time.
    PlayRandomCue {
        cues: Vec<String>,
    },
    RandomActors {
        #[serde(default = "default_actor_count")]
        count: usize,
    },
    RandomMovie,
    OpenScenePicker,
}

fn default_actor_count() -> usize {
    5
}

impl SegmentAction {
    pub fn play_cue(cue: impl Into<String>) -> Self {
        SegmentAction::PlayCue { cue: cue.into() }
    }

    pub fn is_cue(&self) -> bool {
        matches!(
            self,
            SegmentAction::PlayCue { .. } | SegmentAction::PlayRandomCue { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SegmentAction::PlayCue { .. } => "play_cue",
            SegmentAction::PlayRandomCue { .. } => "play_random_cue",
            SegmentAction::RandomActors { .. } => "random_actors",
            SegmentAction::RandomMovie => "random_movie",
            SegmentAction::OpenScenePicker => "open_scene_picker",
        }
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<SegmentAction>,
}

impl Segment {
    pub fn new(name: impl Into<String>, actions: Vec<SegmentAction>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// The cue a manual tile click plays: the first cue-type action.
    pub fn tile_cue(&self) -> Option<&SegmentAction> {
        self.actions.iter().find(|a| a.is_cue())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered, immutable list of segments with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    segments: Vec<Segment>,
}

impl Catalog {
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let mut seen = HashSet::new();
        for s in &segments {
            if s.name.trim().is_empty() {
                return Err(PitchError::InvalidConfig(
                    "segment name must not be empty".to_string(),
                ));
            }
            if !seen.insert(s.name.as_str()) {
                return Err(PitchError::DuplicateSegment(s.name.clone()));
            }
        }
        Ok(Self { segments })
    }

    /// Load a catalog from a YAML file holding a list of segments.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PitchError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let segments: Vec<Segment> = serde_yaml::from_str(&data)?;
        Self::new(segments)
    }

    pub fn get(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// The segments the game ships with.
pub fn default_segments() -> Vec<Segment> {
    vec![
        Segment::new(
            "Lightning Round",
            vec![SegmentAction::play_cue("lightning-round")],
        ),
        Segment::new(
            "Crunch the Numbers",
            vec![SegmentAction::play_cue("crunch-numbers")],
        ),
        Segment::new(
            "Tagline or Title",
            vec![SegmentAction::play_cue("tagline-title")],
        ),
        Segment::new(
            "Casting",
            vec![
                SegmentAction::play_cue("meetings"),
                SegmentAction::RandomActors { count: 5 },
            ],
        ),
        Segment::new(
            "Show Me a Scene",
            vec![
                SegmentAction::play_cue("show-me-a-scene"),
                SegmentAction::OpenScenePicker,
            ],
        ),
        Segment::new(
            "Studio Note",
            vec![
                SegmentAction::play_cue("studio-note"),
                SegmentAction::RandomMovie,
            ],
        ),
    ]
}

pub fn default_catalog() -> Catalog {
    Catalog {
        segments: default_segments(),
    }
}

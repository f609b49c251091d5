use crate::cue::DeckChange;
use serde::{Deserialize, Serialize};

/// One choice in the "Show Me a Scene" picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneType {
    pub name: String,
    pub label: String,
    pub cue: String,
}

impl SceneType {
    pub fn new(name: impl Into<String>, label: impl Into<String>, cue: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            cue: cue.into(),
        }
    }
}

pub fn default_scenes() -> Vec<SceneType> {
    [
        ("emotional", "Emotional"),
        ("action", "Action"),
        ("trailer", "Trailer"),
        ("comedic", "Comedic"),
        ("gloomy", "Gloomy"),
    ]
    .into_iter()
    .map(|(name, label)| SceneType::new(name, label, format!("scene-{name}")))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selected {
    scene: String,
    cue: String,
}

/// Picker modal state. At most one scene cue plays; the picker closes when
/// that cue ends or fails to play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenePicker {
    open: bool,
    selected: Option<Selected>,
}

impl ScenePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.scene.as_str())
    }

    pub fn playing(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.cue.as_str())
    }

    /// Show the picker with nothing selected. Returns a leftover scene cue
    /// to stop.
    pub fn open(&mut self) -> Option<String> {
        self.open = true;
        self.selected.take().map(|s| s.cue)
    }

    /// Choose `scene`. Any scene cue already playing is stopped first, even
    /// when the same scene is chosen again.
    pub fn select(&mut self, scene: &str, cue: &str) -> DeckChange {
        self.open = true;
        let previous = self.selected.replace(Selected {
            scene: scene.to_string(),
            cue: cue.to_string(),
        });
        DeckChange {
            stop: previous.map(|s| s.cue),
            start: Some(cue.to_string()),
        }
    }

    /// The scene cue stopped on its own. Closes the picker and returns
    /// `true` if `cue` was the selected one.
    pub fn finished(&mut self, cue: &str) -> bool {
        if self.playing() != Some(cue) {
            return false;
        }
        self.selected = None;
        self.open = false;
        true
    }

    /// Dismiss the picker. Returns the scene cue to stop, if any.
    pub fn close(&mut self) -> Option<String> {
        self.open = false;
        self.selected.take().map(|s| s.cue)
    }
}

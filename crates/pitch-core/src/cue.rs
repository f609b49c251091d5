/// The manual sting deck: one tile plays at a time, clicking the playing tile
/// stops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueDeck {
    playing: Option<PlayingCue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlayingCue {
    segment: String,
    cue: String,
}

/// What the deck asks the host to do, in order: stop first, then start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckChange {
    pub stop: Option<String>,
    pub start: Option<String>,
}

impl CueDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cue id currently playing, if any.
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_ref().map(|p| p.cue.as_str())
    }

    pub fn playing_segment(&self) -> Option<&str> {
        self.playing.as_ref().map(|p| p.segment.as_str())
    }

    /// Press the tile for `segment`, whose cue resolved to `cue`.
    pub fn press(&mut self, segment: &str, cue: &str) -> DeckChange {
        match self.playing.take() {
            Some(current) if current.segment == segment => DeckChange {
                stop: Some(current.cue),
                start: None,
            },
            current => {
                self.playing = Some(PlayingCue {
                    segment: segment.to_string(),
                    cue: cue.to_string(),
                });
                DeckChange {
                    stop: current.map(|c| c.cue),
                    start: Some(cue.to_string()),
                }
            }
        }
    }

    /// Playback of `cue` ended on its own. Returns `true` if it was the
    /// playing cue.
    pub fn finished(&mut self, cue: &str) -> bool {
        if self.playing() == Some(cue) {
            self.playing = None;
            true
        } else {
            false
        }
    }
}

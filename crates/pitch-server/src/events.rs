use pitch_core::{Checkpoint, SceneType, SessionEvent};
use serde::Serialize;
use tmdb_client::{Actor, Movie};

/// Everything pushed to browsers over `/api/events`.
///
/// Session render callbacks pass through unchanged; the host adds its own
/// events for audio, fetched results and timed dismissals.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerEvent {
    Session(SessionEvent),
    Host(HostEvent),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Start playing an audio cue.
    Cue { cue: String },
    /// Stop a cue started from the tile deck.
    CueStop { cue: String },
    Movie {
        movie: Movie,
        #[serde(skip_serializing_if = "Option::is_none")]
        poster_url: Option<String>,
    },
    Actors { actors: Vec<ActorCard> },
    /// A collaborator query failed; the UI shows `error` inline.
    FetchFailed { what: String, error: String },
    /// Show the scene picker with these choices.
    ScenePicker { scenes: Vec<SceneType> },
    SceneClosed,
    BannerDismissed { checkpoint: Checkpoint },
    ModalClosed,
}

/// Actor as rendered in the casting modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorCard {
    pub id: u64,
    pub name: String,
    pub profile_url: Option<String>,
    pub known_for: Vec<String>,
}

impl ActorCard {
    pub fn from_actor(actor: &Actor, image_url: impl Fn(&str) -> String) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            profile_url: actor.profile_path.as_deref().map(&image_url),
            known_for: actor
                .known_for
                .iter()
                .filter_map(|k| k.title.clone().or_else(|| k.name.clone()))
                .collect(),
        }
    }
}

impl ServerEvent {
    /// SSE event name.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Session(e) => e.kind(),
            ServerEvent::Host(e) => e.kind(),
        }
    }
}

impl HostEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::Cue { .. } => "cue",
            HostEvent::CueStop { .. } => "cue_stop",
            HostEvent::Movie { .. } => "movie",
            HostEvent::Actors { .. } => "actors",
            HostEvent::FetchFailed { .. } => "fetch_failed",
            HostEvent::ScenePicker { .. } => "scene_picker",
            HostEvent::SceneClosed => "scene_closed",
            HostEvent::BannerDismissed { .. } => "banner_dismissed",
            HostEvent::ModalClosed => "modal_closed",
        }
    }
}

impl From<SessionEvent> for ServerEvent {
    fn from(e: SessionEvent) -> Self {
        ServerEvent::Session(e)
    }
}

impl From<HostEvent> for ServerEvent {
    fn from(e: HostEvent) -> Self {
        ServerEvent::Host(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::Mode;

    #[test]
    fn session_events_keep_their_own_tag() {
        let ev = ServerEvent::from(SessionEvent::ModeChanged {
            mode: Mode::Automatic,
        });
        assert_eq!(ev.kind(), "mode_changed");
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "mode_changed");
        assert_eq!(json["mode"], "automatic");
    }

    #[test]
    fn host_events_are_tagged() {
        let ev = ServerEvent::from(HostEvent::BannerDismissed {
            checkpoint: Checkpoint::TEN,
        });
        assert_eq!(ev.kind(), "banner_dismissed");
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "banner_dismissed");
        assert_eq!(json["checkpoint"], 10);
    }

    #[test]
    fn actor_card_prefers_titles() {
        let actor: Actor = serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "Someone",
            "profile_path": "/p.jpg",
            "known_for": [{"id": 1, "title": "A Film"}, {"id": 2, "name": "A Show"}]
        }))
        .unwrap();
        let card = ActorCard::from_actor(&actor, |p| format!("https://img{p}"));
        assert_eq!(card.profile_url.as_deref(), Some("https://img/p.jpg"));
        assert_eq!(card.known_for, vec!["A Film", "A Show"]);
    }
}

//! The action worker: turns segment actions into audio cues, TMDb fetches
//! and timed dismissals, off the tick path.
//!
//! Fetch failures end up as `fetch_failed` events and never reach the
//! session. A fetch that resolves after its modal closed still publishes its
//! result.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pitch_core::config::Config;
use pitch_core::{Checkpoint, SceneType, ScenePicker, SegmentAction};
use rand::seq::SliceRandom;
use tmdb_client::TmdbClient;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::events::{ActorCard, HostEvent, ServerEvent};
use crate::state::lock_scenes;

#[derive(Debug, Clone)]
pub enum WorkerCommand {
    Perform(SegmentAction),
    DismissBanner { checkpoint: Checkpoint, after_ms: u64 },
}

pub fn spawn(
    rx: mpsc::UnboundedReceiver<WorkerCommand>,
    events: broadcast::Sender<ServerEvent>,
    tmdb: Arc<TmdbClient>,
    config: Arc<Config>,
    picker: Arc<Mutex<ScenePicker>>,
) -> JoinHandle<()> {
    let ctx = WorkerContext {
        events,
        tmdb,
        scenes: Arc::new(config.scenes.clone()),
        picker,
        modal: Arc::new(ModalTimer::new(Duration::from_secs(
            config.modal.auto_close_seconds,
        ))),
    };
    tokio::spawn(run(rx, ctx))
}

#[derive(Clone)]
struct WorkerContext {
    events: broadcast::Sender<ServerEvent>,
    tmdb: Arc<TmdbClient>,
    scenes: Arc<Vec<SceneType>>,
    picker: Arc<Mutex<ScenePicker>>,
    modal: Arc<ModalTimer>,
}

impl WorkerContext {
    fn publish(&self, event: HostEvent) {
        let _ = self.events.send(event.into());
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<WorkerCommand>, ctx: WorkerContext) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            WorkerCommand::Perform(action) => perform(&ctx, action),
            WorkerCommand::DismissBanner {
                checkpoint,
                after_ms,
            } => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(after_ms)).await;
                    ctx.publish(HostEvent::BannerDismissed { checkpoint });
                });
            }
        }
    }
    tracing::debug!("action worker stopped");
}

fn perform(ctx: &WorkerContext, action: SegmentAction) {
    tracing::debug!(action = action.kind(), "performing action");
    match action {
        SegmentAction::PlayCue { cue } => ctx.publish(HostEvent::Cue { cue }),
        SegmentAction::PlayRandomCue { cues } => {
            match cues.choose(&mut rand::thread_rng()) {
                Some(cue) => ctx.publish(HostEvent::Cue { cue: cue.clone() }),
                None => tracing::warn!("play_random_cue with no cues"),
            }
        }
        SegmentAction::OpenScenePicker => {
            let leftover = lock_scenes(&ctx.picker).open();
            if let Some(cue) = leftover {
                ctx.publish(HostEvent::CueStop { cue });
            }
            ctx.publish(HostEvent::ScenePicker {
                scenes: ctx.scenes.as_ref().clone(),
            });
        }
        SegmentAction::RandomMovie => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let event = match ctx.tmdb.random_movie().await {
                    Ok(movie) => {
                        let poster_url = movie.poster_path.as_deref().map(|p| ctx.tmdb.image_url(p));
                        HostEvent::Movie { movie, poster_url }
                    }
                    Err(e) => fetch_failed("movie", &e),
                };
                ctx.publish(event);
                ctx.modal.restart(ctx.events.clone());
            });
        }
        SegmentAction::RandomActors { count } => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let event = match ctx.tmdb.popular_actors().await {
                    Ok(actors) => HostEvent::Actors {
                        actors: actors
                            .iter()
                            .take(count)
                            .map(|a| ActorCard::from_actor(a, |p| ctx.tmdb.image_url(p)))
                            .collect(),
                    },
                    Err(e) => fetch_failed("actors", &e),
                };
                ctx.publish(event);
                ctx.modal.restart(ctx.events.clone());
            });
        }
    }
}

fn fetch_failed(what: &str, err: &tmdb_client::TmdbError) -> HostEvent {
    tracing::warn!(what, error = %err, "collaborator query failed");
    HostEvent::FetchFailed {
        what: what.to_string(),
        error: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// ModalTimer
// ---------------------------------------------------------------------------

/// Restartable auto-close for the result modal: every restart cancels the
/// pending close and schedules a new one.
#[derive(Debug)]
pub struct ModalTimer {
    after: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ModalTimer {
    pub fn new(after: Duration) -> Self {
        Self {
            after,
            pending: Mutex::new(None),
        }
    }

    pub fn restart(&self, events: broadcast::Sender<ServerEvent>) {
        let after = self.after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = events.send(HostEvent::ModalClosed.into());
        });
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = pending.replace(handle) {
            old.abort();
        }
    }
}

use std::sync::{Arc, Mutex, MutexGuard};

use pitch_core::config::Config;
use pitch_core::session::SessionSettings;
use pitch_core::{
    Checkpoint, ScenePicker, SegmentAction, SessionEvent, SessionHooks, TimerSession,
};
use tmdb_client::TmdbClient;
use tokio::sync::{broadcast, mpsc};

use crate::driver::TickDriver;
use crate::events::{HostEvent, ServerEvent};
use crate::worker::{self, WorkerCommand};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Mutex<TimerSession>>,
    pub scenes: Arc<Mutex<ScenePicker>>,
    pub driver: Arc<TickDriver>,
    pub tmdb: Arc<TmdbClient>,
    pub event_tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    pub fn new(config: Config, tmdb: TmdbClient) -> pitch_core::Result<Self> {
        Self::build(config, tmdb, None)
    }

    /// Like [`AppState::new`] with reproducible segment draws.
    pub fn with_seed(config: Config, tmdb: TmdbClient, seed: u64) -> pitch_core::Result<Self> {
        Self::build(config, tmdb, Some(seed))
    }

    fn build(config: Config, tmdb: TmdbClient, seed: Option<u64>) -> pitch_core::Result<Self> {
        let catalog = config.catalog()?;
        let config = Arc::new(config);
        let tmdb = Arc::new(tmdb);
        let (event_tx, _) = broadcast::channel(256);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let hooks = ServerHooks {
            events: event_tx.clone(),
            actions: action_tx,
            banner_ms: config.notification_ms(),
        };
        let mut session = TimerSession::new(SessionSettings::from(&*config), catalog, Arc::new(hooks));
        if let Some(seed) = seed {
            session = session.with_seed(seed);
        }

        let scenes = Arc::new(Mutex::new(ScenePicker::new()));

        // Guard: only spawn if inside a Tokio runtime (skipped in sync unit tests).
        if tokio::runtime::Handle::try_current().is_ok() {
            worker::spawn(
                action_rx,
                event_tx.clone(),
                tmdb.clone(),
                config.clone(),
                scenes.clone(),
            );
        }

        Ok(Self {
            config,
            session: Arc::new(Mutex::new(session)),
            scenes,
            driver: Arc::new(TickDriver::default()),
            tmdb,
            event_tx,
        })
    }

    pub fn session(&self) -> MutexGuard<'_, TimerSession> {
        lock_session(&self.session)
    }

    pub fn scenes(&self) -> MutexGuard<'_, ScenePicker> {
        lock_scenes(&self.scenes)
    }

    /// Publish to every SSE subscriber. No subscribers is fine.
    pub fn publish(&self, event: HostEvent) {
        let _ = self.event_tx.send(event.into());
    }
}

/// Lock the session, recovering from a poisoned lock. Never hold the guard
/// across an `.await`.
pub fn lock_session(session: &Mutex<TimerSession>) -> MutexGuard<'_, TimerSession> {
    session.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn lock_scenes(scenes: &Mutex<ScenePicker>) -> MutexGuard<'_, ScenePicker> {
    scenes.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// ServerHooks
// ---------------------------------------------------------------------------

/// Session side effects as channel sends. Nothing here blocks or awaits.
pub struct ServerHooks {
    events: broadcast::Sender<ServerEvent>,
    actions: mpsc::UnboundedSender<WorkerCommand>,
    banner_ms: u64,
}

impl ServerHooks {
    fn command(&self, cmd: WorkerCommand) {
        if self.actions.send(cmd).is_err() {
            tracing::warn!("action channel closed; dropping command");
        }
    }
}

impl SessionHooks for ServerHooks {
    fn emit(&self, event: SessionEvent) {
        let banner: Option<Checkpoint> = match &event {
            SessionEvent::SegmentTriggered { checkpoint, .. } => Some(*checkpoint),
            _ => None,
        };
        // No subscribers is fine.
        let _ = self.events.send(event.into());
        if let Some(checkpoint) = banner {
            self.command(WorkerCommand::DismissBanner {
                checkpoint,
                after_ms: self.banner_ms,
            });
        }
    }

    fn perform(&self, action: &SegmentAction) {
        self.command(WorkerCommand::Perform(action.clone()));
    }

    fn stop_cue(&self, cue: &str) {
        let _ = self
            .events
            .send(HostEvent::CueStop { cue: cue.to_string() }.into());
    }
}

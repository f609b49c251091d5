pub mod clock;
pub mod config;
pub mod cue;
pub mod error;
pub mod hooks;
pub mod reveal;
pub mod scene;
pub mod scheduler;
pub mod segment;
pub mod selector;
pub mod session;
pub mod types;

pub use error::{PitchError, Result};
pub use hooks::{SessionEvent, SessionHooks};
pub use scene::{SceneType, ScenePicker};
pub use segment::{Catalog, Segment, SegmentAction};
pub use session::{SessionSettings, SessionSnapshot, TileOutcome, TimerSession};
pub use types::{Checkpoint, Mode};

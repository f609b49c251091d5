use crate::clock::{DEFAULT_TOTAL_SECONDS, DEFAULT_WARNING_SECONDS};
use crate::error::{PitchError, Result};
use crate::scene::{default_scenes, SceneType};
use crate::segment::{default_catalog, Catalog, Segment};
use crate::types::Checkpoint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const CONFIG_FILE: &str = "pitch.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TimerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_total_seconds")]
    pub total_seconds: u32,
    #[serde(default = "default_warning_seconds")]
    pub warning_seconds: u32,
    /// Minutes remaining; segments are drawn for these in list order.
    #[serde(default = "Checkpoint::defaults")]
    pub checkpoints: Vec<Checkpoint>,
}

fn default_total_seconds() -> u32 {
    DEFAULT_TOTAL_SECONDS
}

fn default_warning_seconds() -> u32 {
    DEFAULT_WARNING_SECONDS
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_seconds: default_total_seconds(),
            warning_seconds: default_warning_seconds(),
            checkpoints: Checkpoint::defaults(),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationConfig / ModalConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_display_seconds")]
    pub display_seconds: u64,
}

fn default_display_seconds() -> u64 {
    5
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_seconds: default_display_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalConfig {
    #[serde(default = "default_auto_close_seconds")]
    pub auto_close_seconds: u64,
}

fn default_auto_close_seconds() -> u64 {
    30
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            auto_close_seconds: default_auto_close_seconds(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served as the browser UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

fn default_port() -> u16 {
    3141
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TmdbConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_recent_actor_window")]
    pub recent_actor_window: usize,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w185".to_string()
}

fn default_recent_actor_window() -> usize {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            recent_actor_window: default_recent_actor_window(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Catalog override. The built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    /// Choices offered by the scene picker.
    #[serde(default = "default_scenes")]
    pub scenes: Vec<SceneType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notification: NotificationConfig::default(),
            modal: ModalConfig::default(),
            server: ServerConfig::default(),
            tmdb: TmdbConfig::default(),
            segments: None,
            scenes: default_scenes(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PitchError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(PitchError::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Write the config to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_yaml(path, self, true).map(|_| ())
    }

    /// Write a default config to `path` unless a file is already there.
    /// Returns true if written.
    pub fn write_default(path: &Path) -> Result<bool> {
        write_yaml(path, &Self::default(), false)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.segments {
            Some(segments) => Catalog::new(segments.clone()),
            None => Ok(default_catalog()),
        }
    }

    pub fn notification_ms(&self) -> u64 {
        self.notification.display_seconds.saturating_mul(1000)
    }

    pub fn scene(&self, name: &str) -> Option<&SceneType> {
        self.scenes.iter().find(|s| s.name == name)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let timer = &self.timer;

        if timer.total_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timer.total_seconds must be greater than zero".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for checkpoint in &timer.checkpoints {
            if checkpoint.minutes() == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "checkpoint 00:00 coincides with expiry".to_string(),
                });
            } else {
                match checkpoint.seconds() {
                    None => warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!(
                            "checkpoint {} is too large to express in seconds",
                            checkpoint
                        ),
                    }),
                    Some(seconds) if seconds >= timer.total_seconds => {
                        warnings.push(ConfigWarning {
                            level: WarnLevel::Warning,
                            message: format!(
                                "checkpoint {} is at or above the countdown start and will never fire",
                                checkpoint
                            ),
                        })
                    }
                    Some(_) => {}
                }
            }
            if !seen.insert(*checkpoint) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate checkpoint {}", checkpoint),
                });
            }
        }

        let mut scene_names = HashSet::new();
        for scene in &self.scenes {
            if scene.name == "close" {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "scene name 'close' is reserved".to_string(),
                });
            }
            if !scene_names.insert(scene.name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate scene '{}'", scene.name),
                });
            }
        }
        if self.scenes.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no scenes configured: the scene picker will be empty".to_string(),
            });
        }

        match self.catalog() {
            Ok(catalog) => {
                if catalog.len() < timer.checkpoints.len() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "{} segment(s) for {} checkpoints: segments will repeat",
                            catalog.len(),
                            timer.checkpoints.len()
                        ),
                    });
                }
            }
            Err(e) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: e.to_string(),
            }),
        }

        warnings
    }

    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|w| w.level == WarnLevel::Error)
    }
}

/// Serialise `value` into a sibling temp file, then move it onto `path`.
/// Readers never see a half-written config. With `overwrite` false an
/// existing file is left alone and `Ok(false)` is returned.
fn write_yaml<T: Serialize>(path: &Path, value: &T, overwrite: bool) -> Result<bool> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_yaml::to_writer(&mut tmp, value)?;
    tmp.flush()?;

    if overwrite {
        tmp.persist(path).map_err(|e| e.error)?;
        return Ok(true);
    }
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error.into()),
    }
}

/// Find `pitch.yaml` by walking upward from `start`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => return None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

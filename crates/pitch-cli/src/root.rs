use anyhow::Context;
use pitch_core::config::{self, Config};
use std::path::{Path, PathBuf};

/// Resolve the config file path.
///
/// Priority:
/// 1. `--config` flag / `PITCH_CONFIG` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `pitch.yaml`
/// 3. None (built-in defaults)
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    config::discover(&cwd)
}

/// Load the resolved config. An explicit path must exist; a discovered one
/// always does; no path means defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    match resolve_config(explicit) {
        Some(path) => {
            let config = Config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}

/// Where `config init` writes when no path was given.
pub fn init_target(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(config::CONFIG_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_config_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        assert_eq!(resolve_config(Some(&path)), Some(path));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("missing.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("config file not found"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pitch.yaml");
        std::fs::write(&path, "timer:\n  total_seconds: 600\n").unwrap();
        let (config, found) = load_config(Some(&path)).unwrap();
        assert_eq!(config.timer.total_seconds, 600);
        assert_eq!(found, Some(path));
    }
}

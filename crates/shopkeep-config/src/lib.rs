//! Configuration and durable session storage for the shopkeep admin.
//!
//! TOML file + `SHOPKEEP_*` environment layering over built-in defaults,
//! platform config/state paths, and the file-backed
//! [`SessionPersistence`] implementation the store layer rehydrates
//! from at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use shopkeep_api::{ApiClient, TransportConfig};
use shopkeep_core::{Session, SessionPersistence};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL; `/api/` is appended by the client.
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Where the session file lives. Platform state dir when unset.
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: default_timeout(),
            state_dir: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Build the transport client from this config.
    pub fn api_client(&self) -> Result<ApiClient, ConfigError> {
        let transport = TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        };
        ApiClient::new(&self.base_url, &transport).map_err(|err| ConfigError::Validation {
            field: "base_url".into(),
            reason: err.to_string(),
        })
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(state_dir_fallback)
            .join("session.json")
    }

    /// File-backed persistence rooted at [`session_path`](Self::session_path).
    pub fn session_persistence(&self) -> FileSessionPersistence {
        FileSessionPersistence::new(self.session_path())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "shopkeep", "shopkeep").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn state_dir_fallback() -> PathBuf {
    ProjectDirs::from("com", "shopkeep", "shopkeep").map_or_else(dirs_fallback, |dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_dir())
            .to_path_buf()
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("shopkeep");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load from the canonical file location plus `SHOPKEEP_*` env vars.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit TOML file plus `SHOPKEEP_*` env vars.
/// A missing file is fine; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHOPKEEP_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize the config to TOML at the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── File-backed session persistence ─────────────────────────────────

/// One JSON file holding the persisted [`Session`].
///
/// Failures never propagate: a malformed or unreadable file loads as
/// `None` (logged-out) and write errors are logged and dropped, per the
/// [`SessionPersistence`] contract.
pub struct FileSessionPersistence {
    path: PathBuf,
}

impl FileSessionPersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionPersistence for FileSessionPersistence {
    fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "discarding malformed session file");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let write = || -> Result<(), std::io::Error> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(session).map_err(std::io::Error::other)?;
            std::fs::write(&self.path, json)
        };
        if let Err(err) = write() {
            warn!(path = %self.path.display(), %err, "failed to persist session");
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove session file");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_session() -> Session {
        Session {
            token: Some("tok".into()),
            id: Some(4),
            username: Some("admin".into()),
            permissions: vec!["ADMIN".into()],
        }
    }

    #[test]
    fn defaults_apply_when_the_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn toml_values_override_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://shop.internal\"\ntimeout_secs = 5\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.base_url, "http://shop.internal");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn session_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = FileSessionPersistence::new(dir.path().join("session.json"));

        persistence.save(&sample_session());
        assert_eq!(persistence.load(), Some(sample_session()));
    }

    #[test]
    fn malformed_session_file_loads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let persistence = FileSessionPersistence::new(path);
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn clear_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = FileSessionPersistence::new(dir.path().join("session.json"));

        persistence.save(&sample_session());
        persistence.clear();
        assert_eq!(persistence.load(), None);
        assert!(!persistence.path().exists());

        // Clearing an absent file is a quiet no-op.
        persistence.clear();
    }

    #[test]
    fn session_path_prefers_the_configured_state_dir() {
        let config = Config {
            state_dir: Some(PathBuf::from("/tmp/shopkeep-test")),
            ..Config::default()
        };
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/shopkeep-test/session.json")
        );
    }
}

//! Configuration management for tts-notify.
//!
//! Every section has defaults, so the hook runs without any config file.
//! When one exists it is YAML and may set any subset of fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub url: String,
    pub service_dir: PathBuf,
    /// Defaults to `chatterbox_manager.py` inside `service_dir`.
    pub manager_script: Option<PathBuf>,
    pub health_timeout_ms: u64,
    pub verify_timeout_ms: u64,
    pub speak_timeout_ms: u64,
    pub ensure_timeout_ms: u64,
    pub settle_ms: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000".into(),
            service_dir: home_dir().join("Desktop/Devel/projects/chatterbox"),
            manager_script: None,
            health_timeout_ms: 500,
            verify_timeout_ms: 5000,
            speak_timeout_ms: 30_000,
            ensure_timeout_ms: 40_000,
            settle_ms: 2000,
        }
    }
}

impl TtsConfig {
    pub fn manager_script(&self) -> PathBuf {
        self.manager_script
            .clone()
            .unwrap_or_else(|| self.service_dir.join("chatterbox_manager.py"))
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_timeout_ms)
    }

    pub fn speak_timeout(&self) -> Duration {
        Duration::from_millis(self.speak_timeout_ms)
    }

    pub fn ensure_timeout(&self) -> Duration {
        Duration::from_millis(self.ensure_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Who the spoken messages are addressed to.
    pub addressee: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            addressee: "David".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: home_dir().join(".claude/logs/tts-hooks.log"),
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: home_dir().join(".claude/logs/tts-hook-history"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tts: TtsConfig,
    pub message: MessageConfig,
    pub log: LogConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Find the config file to load.
    ///
    /// An explicit path always wins, even if it does not exist (so the read
    /// error gets reported). Otherwise the first existing of:
    /// 1. ~/.config/tts-notify/config.yaml
    /// 2. /etc/tts-notify/config.yaml
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(PathBuf::from).or_else(|| {
            let candidates = [
                dirs::home_dir().map(|h| h.join(".config/tts-notify/config.yaml")),
                Some(PathBuf::from("/etc/tts-notify/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        // An empty file deserializes to unit, not a mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yml::from_str(contents)?;
        config.expand_paths();
        Ok(config)
    }

    fn expand_paths(&mut self) {
        self.tts.service_dir = expand_home(&self.tts.service_dir);
        self.tts.manager_script = self.tts.manager_script.as_deref().map(expand_home);
        self.log.path = expand_home(&self.log.path);
        self.history.dir = expand_home(&self.history.dir);
    }
}

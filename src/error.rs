//! Error types for tts-notify.
//!
//! None of these ever reach the exit status: the notifier logs them and
//! carries on.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Failures talking to the TTS service or its manager script.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("manager script not found at {}", .0.display())]
    ManagerMissing(PathBuf),

    #[error("manager script timed out after {0:?}")]
    ManagerTimeout(Duration),

    #[error("manager script failed ({status}): {stderr}")]
    ManagerFailed { status: ExitStatus, stderr: String },

    #[error("failed to launch manager script: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Failures loading the YAML config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },
}

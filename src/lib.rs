//! tts-notify: speak Claude Code lifecycle events through a local TTS service.
//!
//! The hook reads the event from stdin, makes sure the TTS service is up when
//! a session starts, and asks it to say a short message. It never fails the
//! calling workflow: problems only show up in the debug log.

pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod logging;
pub mod message;
pub mod notifier;
pub mod project;
pub mod service;

pub use config::Config;
pub use error::{ConfigError, ServiceError};
pub use event::{EventRecord, HookClassifier, HookKind, SessionSource};
pub use notifier::{Notifier, Outcome};
pub use service::{ChatterboxClient, ServiceClient};

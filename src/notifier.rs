//! Spoken notifications for hook events.
//!
//! One run: ensure the TTS service (session start only) → read the event →
//! compose the message → speak it. Every failure is logged and absorbed.

use std::future::Future;
use std::io::Read;
use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{Config, MessageConfig, TtsConfig};
use crate::event::{EventRecord, HookClassifier};
use crate::message;
use crate::project::project_name;
use crate::service::ServiceClient;

/// What happened during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// `None` when the service was not checked (not a session start).
    pub ensured: Option<bool>,
    pub message: String,
    pub delivered: bool,
}

pub struct Notifier<C> {
    tts: TtsConfig,
    message: MessageConfig,
    client: C,
}

impl<C: ServiceClient> Notifier<C> {
    pub fn new(config: &Config, client: C) -> Self {
        Self {
            tts: config.tts.clone(),
            message: config.message.clone(),
            client,
        }
    }

    pub async fn run<R: Read>(
        &self,
        classifier: &HookClassifier,
        input: R,
        project_dir: &Path,
    ) -> Outcome {
        let ensured = if classifier.is_session_start() {
            info!("SessionStart detected, ensuring TTS service is running...");
            Some(self.ensure_service_available().await)
        } else {
            None
        };

        let record = EventRecord::read_from(input);
        let project = project_name(project_dir);
        let message = message::compose(classifier, &record, &project, &self.message.addressee);
        info!("Message: {message}");

        let delivered = self.submit(&message).await;
        if !delivered {
            warn!("TTS service failed - no audio notification available");
        }

        Outcome {
            ensured,
            message,
            delivered,
        }
    }

    /// Start the TTS service unless it already answers its health check.
    pub async fn ensure_service_available(&self) -> bool {
        match self.client.check_health(self.tts.health_timeout()).await {
            Ok(()) => {
                info!("TTS service already running");
                return true;
            }
            Err(e) => info!("TTS service not running ({e}), starting service..."),
        }

        if let Err(e) = self.client.start_service().await {
            warn!("Failed to start TTS service: {e}");
            return false;
        }
        info!("TTS service started successfully");

        // Give it a moment to finish initializing.
        tokio::time::sleep(self.tts.settle()).await;

        match self.client.check_health(self.tts.verify_timeout()).await {
            Ok(()) => {
                info!("TTS service verified as running");
                true
            }
            Err(e) => {
                warn!("TTS service started but not yet responsive: {e}");
                false
            }
        }
    }

    async fn submit(&self, text: &str) -> bool {
        info!("Sending to TTS service: {text}");
        match self.client.speak(text).await {
            Ok(()) => {
                info!("TTS synthesis successful");
                true
            }
            Err(e) => {
                warn!("TTS speak error: {e}");
                false
            }
        }
    }
}

/// Drive `task` on its own tokio task so neither an error nor a panic gets
/// past the caller. Returns whether it finished cleanly.
pub async fn supervise<F>(task: F) -> bool
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!("Error: {e:#}");
            false
        }
        Err(e) => {
            error!("Hook task failed: {e}");
            false
        }
    }
}

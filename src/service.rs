//! The local TTS service: health checks, auto-start and speech requests.
//!
//! `ServiceClient` is the seam the notifier talks through; `ChatterboxClient`
//! is the real implementation (HTTP via reqwest, the manager script via
//! `tokio::process`).

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::process::Command;
use tracing::debug;

use crate::config::TtsConfig;
use crate::error::ServiceError;

/// What the notifier needs from the TTS service.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// `GET /health`, succeeding only on 200.
    async fn check_health(&self, timeout: Duration) -> Result<(), ServiceError>;

    /// Run the manager's `ensure` operation to completion.
    async fn start_service(&self) -> Result<(), ServiceError>;

    /// Synthesize and play `text`.
    async fn speak(&self, text: &str) -> Result<(), ServiceError>;
}

#[derive(Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
    play: bool,
}

pub struct ChatterboxClient {
    base_url: String,
    service_dir: PathBuf,
    manager_script: PathBuf,
    ensure_timeout: Duration,
    speak_timeout: Duration,
    http: Client,
}

impl ChatterboxClient {
    pub fn new(config: &TtsConfig) -> Self {
        // Timeouts differ per call, so they are set on each request.
        let http = Client::builder()
            .user_agent(concat!("tts-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            service_dir: config.service_dir.clone(),
            manager_script: config.manager_script(),
            ensure_timeout: config.ensure_timeout(),
            speak_timeout: config.speak_timeout(),
            http,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn expect_ok(resp: reqwest::Response) -> Result<(), ServiceError> {
    let status = resp.status();
    if status == StatusCode::OK {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

#[async_trait]
impl ServiceClient for ChatterboxClient {
    async fn check_health(&self, timeout: Duration) -> Result<(), ServiceError> {
        let resp = self
            .http
            .get(self.endpoint("health"))
            .timeout(timeout)
            .send()
            .await?;
        expect_ok(resp).await
    }

    async fn start_service(&self) -> Result<(), ServiceError> {
        if !self.manager_script.exists() {
            return Err(ServiceError::ManagerMissing(self.manager_script.clone()));
        }

        debug!(
            "Running {} ensure in {}",
            self.manager_script.display(),
            self.service_dir.display()
        );
        let output = Command::new(&self.manager_script)
            .arg("ensure")
            .current_dir(&self.service_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.ensure_timeout, output)
            .await
            .map_err(|_| ServiceError::ManagerTimeout(self.ensure_timeout))??;

        if output.status.success() {
            Ok(())
        } else {
            Err(ServiceError::ManagerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn speak(&self, text: &str) -> Result<(), ServiceError> {
        let resp = self
            .http
            .post(self.endpoint("speak"))
            .timeout(self.speak_timeout)
            .json(&SpeakRequest { text, play: true })
            .send()
            .await?;
        expect_ok(resp).await
    }
}

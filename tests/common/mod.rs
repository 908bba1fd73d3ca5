//! Shared test fixtures: a fake TTS service and a sandboxed hook environment.

#![allow(dead_code)]

use std::io::Write;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tempfile::TempDir;

/// In-process stand-in for the TTS service's `/health` and `/speak`.
#[derive(Clone)]
pub struct FakeTts {
    pub url: String,
    healthy: Arc<AtomicBool>,
    speak_status: Arc<AtomicU16>,
    spoken: Arc<Mutex<Vec<Value>>>,
}

impl FakeTts {
    /// Bind an ephemeral port and serve on the current runtime.
    pub async fn spawn(healthy: bool, speak_status: u16) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let fake = Self {
            url: format!("http://{addr}"),
            healthy: Arc::new(AtomicBool::new(healthy)),
            speak_status: Arc::new(AtomicU16::new(speak_status)),
            spoken: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/health", get(health))
            .route("/speak", post(speak))
            .with_state(fake.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        fake
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }

    /// Request bodies received by `/speak`.
    pub fn spoken(&self) -> Vec<Value> {
        self.spoken.lock().unwrap().clone()
    }
}

async fn health(State(fake): State<FakeTts>) -> StatusCode {
    if fake.healthy.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn speak(State(fake): State<FakeTts>, Json(body): Json<Value>) -> (StatusCode, String) {
    fake.spoken.lock().unwrap().push(body);
    let status = StatusCode::from_u16(fake.speak_status.load(Ordering::Relaxed))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = if status == StatusCode::OK {
        "{\"status\": \"ok\"}".to_string()
    } else {
        "synth failed".to_string()
    };
    (status, body)
}

/// A URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Write an executable shell script.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// Temporary HOME with a `myapp` project, a service dir and a log file.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("myapp")).unwrap();
        std::fs::create_dir_all(dir.path().join("service")).unwrap();
        Self { dir }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.dir.path().join("myapp")
    }

    pub fn service_dir(&self) -> PathBuf {
        self.dir.path().join("service")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("logs/tts-hooks.log")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.dir.path().join("history")
    }

    /// Config pointing at `url`, with extra `tts:` settings appended.
    pub fn write_config(&self, url: &str, manager_script: &Path, tts: &[(&str, &str)]) -> PathBuf {
        let mut yaml = format!(
            "tts:\n  url: {url}\n  service_dir: {}\n  manager_script: {}\n  settle_ms: 0\n",
            self.service_dir().display(),
            manager_script.display(),
        );
        for (key, value) in tts {
            yaml.push_str(&format!("  {key}: {value}\n"));
        }
        yaml.push_str(&format!(
            "log:\n  path: {}\nhistory:\n  enabled: true\n  dir: {}\n",
            self.log_path().display(),
            self.history_dir().display(),
        ));

        let path = self.dir.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Run the hook binary with `stdin` as event data.
    pub fn run_hook(&self, args: &[&str], hook_type: &str, stdin: &str) -> Output {
        let mut cmd = self.hook_command(args, hook_type);
        cmd.env("CLAUDE_PROJECT_DIR", self.project_dir());
        feed(cmd, stdin)
    }

    /// Like `run_hook`, but with `CLAUDE_PROJECT_DIR` set to `project_env`
    /// and the process started in `cwd`.
    pub fn run_hook_in(
        &self,
        cwd: &Path,
        project_env: &str,
        args: &[&str],
        hook_type: &str,
        stdin: &str,
    ) -> Output {
        let mut cmd = self.hook_command(args, hook_type);
        cmd.env("CLAUDE_PROJECT_DIR", project_env).current_dir(cwd);
        feed(cmd, stdin)
    }

    fn hook_command(&self, args: &[&str], hook_type: &str) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tts-notify"));
        cmd.args(args)
            .env("CLAUDE_HOOK_TYPE", hook_type)
            .env("HOME", self.dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

fn feed(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd.spawn().expect("failed to launch tts-notify");
    let mut child_stdin = child.stdin.take().unwrap();
    child_stdin.write_all(stdin.as_bytes()).unwrap();
    drop(child_stdin);
    child.wait_with_output().unwrap()
}

//! tts-notify: Claude Code hook binary for spoken notifications.
//!
//! Reads event JSON from stdin and speaks a short message through the local
//! TTS service, starting it on SessionStart. Always exits 0.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, warn};

use tts_notify::{history, logging, notifier, project};
use tts_notify::{ChatterboxClient, Config, HookClassifier, Notifier};

#[derive(Parser, Debug, Default)]
#[command(name = "tts-notify", version, about = "Speak Claude Code hook events")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hook event type (overrides CLAUDE_HOOK_TYPE)
    #[arg(long)]
    hook_type: Option<String>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (args, arg_error) = match Args::try_parse() {
        Ok(args) => (args, None),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => (Args::default(), Some(e)),
    };

    let (config, config_error) = match Config::resolve_path(args.config.as_deref()) {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::default(), None),
    };

    if let Err(e) = logging::init(&config.log.path, &config.log.level, args.verbose) {
        eprintln!(
            "tts-notify: cannot create log directory for {}: {e}",
            config.log.path.display()
        );
    }
    install_panic_hook();

    if let Some(e) = arg_error {
        warn!("Ignoring invalid arguments: {}", e.to_string().trim());
    }
    if let Some(e) = config_error {
        warn!("{e}, using defaults");
    }

    // A panic inside the task surfaces as a JoinError instead of unwinding
    // out of main.
    notifier::supervise(run(args, config)).await;
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let t0 = Instant::now();

    let classifier = HookClassifier::from_env(args.hook_type.as_deref());
    info!("Hook event: {}", classifier.raw());
    let project_dir = project::project_dir().context("cannot determine project directory")?;

    let notifier = Notifier::new(&config, ChatterboxClient::new(&config.tts));
    let stdin = io::stdin();
    let outcome = if stdin.is_terminal() {
        notifier.run(&classifier, io::empty(), &project_dir).await
    } else {
        notifier.run(&classifier, stdin, &project_dir).await
    };

    if config.history.enabled {
        let record = history::HookRecord::new(classifier.raw(), &outcome, t0.elapsed());
        history::save_record(&config.history.dir, &record);
    }
    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        error!("Panic: {info}");
        error!("Traceback:\n{backtrace}");
    }));
}

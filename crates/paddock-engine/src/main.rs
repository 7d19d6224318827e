//! Session host binary for the Paddock game.
//!
//! Wires configuration, logging, and one session runner together, then reads
//! commands from stdin line by line. Outcomes and snapshots are written to
//! stdout as JSON; sound cues go to the log.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`paddock-config.yaml`, or the path given as the
//!    first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Start the session and its runner
//! 4. Read commands until `quit` or end of input
//! 5. Shut the runner down and log the final balances

mod command;
mod error;
mod sink;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use paddock_core::config::{AssetsConfig, LoggingConfig};
use paddock_core::{
    GameConfig, HorseLook, ManifestResolver, Session, SessionHandle, scene_assets, spawn_session,
};

use crate::command::{Command, HELP};
use crate::error::EngineError;
use crate::sink::LogSink;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "paddock-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging, or the session fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let config = load_config(&config_path).context("loading configuration")?;
    init_logging(&config.logging)?;

    info!(
        config = %config_path.display(),
        decay_interval_ms = config.session.decay_interval_ms,
        autofeed_interval_ms = config.session.autofeed_interval_ms,
        house_currency = %config.economy.house_currency,
        "paddock-engine starting"
    );

    let resolver = load_manifest(&config.assets)?;
    let look = config.horse.look();

    let session = Session::new(&config).map_err(EngineError::from)?;
    let (handle, task) = spawn_session(session, LogSink);

    read_commands(&handle, &resolver, &look).await?;

    // A failed send means the runner already stopped on its own.
    if handle.shutdown().await.is_err() {
        warn!("Session runner was already stopped");
    }
    drop(handle);
    let finished = task
        .await
        .map_err(paddock_core::RunnerError::from)
        .map_err(EngineError::from)?
        .map_err(EngineError::from)?;

    let ledger = finished.session.ledger();
    info!(
        coins = %ledger.coins(),
        gems = ledger.gems(),
        entries = ledger.len(),
        reconcile = ?finished.session.reconcile(),
        "paddock-engine shutdown complete"
    );
    Ok(())
}

/// Read stdin until `quit` or end of input.
async fn read_commands(
    handle: &SessionHandle,
    resolver: &ManifestResolver,
    look: &HorseLook,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Player(action))) => {
                let outcome = handle.apply(action).await.map_err(EngineError::from)?;
                println!("{}", serde_json::to_string(&outcome)?);
            }
            Ok(Some(Command::Status)) => {
                println!("{}", serde_json::to_string_pretty(&handle.snapshot())?);
            }
            Ok(Some(Command::Scene)) => {
                let scene = scene_assets(&handle.snapshot(), look, resolver);
                println!("{}", serde_json::to_string_pretty(&scene)?);
            }
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::Quit)) => break,
            Err(err) => {
                warn!(input = %line, error = %err, "Ignoring input");
                eprintln!("{err}");
            }
        }
    }
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<GameConfig, EngineError> {
    let config = if path.exists() {
        GameConfig::from_file(path)?
    } else {
        GameConfig::parse("")?
    };
    config.validate()?;
    Ok(config)
}

/// Load the asset manifest, or an empty one when none is configured.
fn load_manifest(assets: &AssetsConfig) -> Result<ManifestResolver, EngineError> {
    let Some(path) = &assets.manifest else {
        return Ok(ManifestResolver::default());
    };
    let json = std::fs::read_to_string(path).map_err(|err| EngineError::Assets {
        message: format!("{path}: {err}"),
    })?;
    let resolver = ManifestResolver::from_json(&json).map_err(|err| EngineError::Assets {
        message: format!("{path}: {err}"),
    })?;
    info!(manifest = %path, "Asset manifest loaded");
    Ok(resolver)
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_missing| EnvFilter::try_new(&logging.level))
        .map_err(|err| EngineError::Logging {
            message: err.to_string(),
        })?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| EngineError::Logging {
        message: err.to_string(),
    })
}

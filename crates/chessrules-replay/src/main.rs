//! Chess Rules Replay - plays a scripted game and prints move statistics.

use anyhow::Context;
use chessrules_replay::config::ReplayScript;
use chessrules_replay::output::{write_step, write_summary, OutputFormat};
use chessrules_replay::replay::Replay;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replays a TOML script of board inputs through the rules engine.
#[derive(Parser)]
#[command(name = "chessrules-replay")]
#[command(about = "Replays a scripted chess game and prints move statistics")]
struct Args {
    /// Path to the replay script
    script: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let script = ReplayScript::load(&args.script)
        .with_context(|| format!("loading {}", args.script.display()))?;
    tracing::info!(
        "Replaying {} events from {:?}",
        script.events.len(),
        args.script
    );

    let mut replay = Replay::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (i, event) in script.events.iter().enumerate() {
        let outcome = replay.step(event);
        write_step(&mut out, args.format, i + 1, event, &outcome)?;
        if let Err(err) = outcome {
            tracing::warn!("Event {} ({}) rejected: {}", i + 1, event, err);
            if script.stop_on_error {
                tracing::info!("Stopping at first rejected event");
                break;
            }
        }
    }

    write_summary(&mut out, args.format, replay.stats())?;
    out.flush()?;
    Ok(())
}

//! Rendering replay steps as text or JSON lines.

use crate::config::ScriptEvent;
use crate::replay::StepOutcome;
use crate::stats::GameStats;
use chessrules_engine::{GameError, GameResult, MoveEvent};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// Output format for replay reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per event.
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON representation of one processed event.
#[derive(Serialize)]
struct StepJson<'a> {
    step: usize,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promotion_pending: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moved: Option<&'a MoveEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<GameResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Writes the report line for event number `step`.
pub fn write_step<W: Write>(
    out: &mut W,
    format: OutputFormat,
    step: usize,
    event: &ScriptEvent,
    outcome: &Result<StepOutcome, GameError>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let described = match outcome {
                Ok(StepOutcome::Selected(sq)) => format!("selected {}", sq),
                Ok(StepOutcome::PromotionPending(sq)) => {
                    format!("pawn on {} awaits promotion", sq)
                }
                Ok(StepOutcome::Moved(event)) => event.to_string(),
                Ok(StepOutcome::Forfeited(result)) => match result.winner() {
                    Some(winner) => format!("{} wins by forfeit", winner),
                    None => "game over".to_string(),
                },
                Ok(StepOutcome::Reset) => "new game".to_string(),
                Err(err) => format!("rejected: {}", err),
            };
            writeln!(out, "{:>3}. {}: {}", step, event, described)
        }
        OutputFormat::Json => {
            let mut json = StepJson {
                step,
                input: event.to_string(),
                selected: None,
                promotion_pending: None,
                moved: None,
                result: None,
                error: None,
            };
            match outcome {
                Ok(StepOutcome::Selected(sq)) => json.selected = Some(sq.to_string()),
                Ok(StepOutcome::PromotionPending(sq)) => {
                    json.promotion_pending = Some(sq.to_string())
                }
                Ok(StepOutcome::Moved(event)) => json.moved = Some(event),
                Ok(StepOutcome::Forfeited(result)) => json.result = Some(*result),
                Ok(StepOutcome::Reset) => {}
                Err(err) => json.error = Some(err.to_string()),
            }
            serde_json::to_writer(&mut *out, &json)?;
            writeln!(out)
        }
    }
}

/// Writes the end-of-replay summary.
pub fn write_summary<W: Write>(
    out: &mut W,
    format: OutputFormat,
    stats: &GameStats,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "\n{}", stats),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "summary": stats }))?;
            writeln!(out)
        }
    }
}

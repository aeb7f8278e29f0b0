//! Replay script loading.
//!
//! A script is a TOML file listing input events in order:
//!
//! ```toml
//! stop_on_error = false
//!
//! [[event]]
//! action = "select"
//! square = "e2"
//! side = "white"
//!
//! [[event]]
//! action = "to"
//! square = "e4"
//! ```

use chessrules_engine::{PieceKind, Side, Square};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a replay script.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the script file from disk.
    #[error("Failed to read script file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the script as valid TOML.
    #[error("Failed to parse script: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The script contains no events.
    #[error("Script has no events")]
    Empty,
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Select the piece of `side` on `square`.
    Select {
        #[serde(deserialize_with = "square_name")]
        square: Square,
        side: Side,
    },
    /// Move the selected piece to `square`.
    To {
        #[serde(deserialize_with = "square_name")]
        square: Square,
    },
    /// A raw board click on `square`.
    Click {
        #[serde(deserialize_with = "square_name")]
        square: Square,
    },
    /// Choose the kind for a pending promotion.
    Promote { kind: PieceKind },
    /// `side` gives up.
    Forfeit { side: Side },
    /// Start over from the standard layout.
    Reset,
}

impl fmt::Display for ScriptEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptEvent::Select { square, side } => write!(f, "select {} ({})", square, side),
            ScriptEvent::To { square } => write!(f, "to {}", square),
            ScriptEvent::Click { square } => write!(f, "click {}", square),
            ScriptEvent::Promote { kind } => write!(f, "promote {}", kind),
            ScriptEvent::Forfeit { side } => write!(f, "forfeit {}", side),
            ScriptEvent::Reset => write!(f, "reset"),
        }
    }
}

/// A complete replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    /// Stop at the first rejected event instead of reporting it and going on.
    #[serde(default)]
    pub stop_on_error: bool,
    /// Events in play order.
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl ReplayScript {
    /// Loads a script from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// [`ConfigError::ParseError`] if it is not a valid script, or
    /// [`ConfigError::Empty`] if it lists no events.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a script from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let script: ReplayScript = toml::from_str(content)?;
        if script.events.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(script)
    }
}

/// Reads a square written by name, such as `"e4"`.
fn square_name<'de, D>(deserializer: D) -> Result<Square, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Square::from_name(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid square '{}'", name)))
}

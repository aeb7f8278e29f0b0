//! Drives a [`Game`] from script events.

use crate::config::ScriptEvent;
use crate::stats::GameStats;
use chessrules_engine::{Game, GameError, GameResult, MoveEvent, MoveOutcome, Square};
use tracing::{debug, info};

/// What a successful event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Selected(Square),
    PromotionPending(Square),
    Moved(MoveEvent),
    Forfeited(GameResult),
    Reset,
}

/// A game plus the statistics of the moves played in it.
#[derive(Debug, Default)]
pub struct Replay {
    game: Game,
    stats: GameStats,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Feeds one event to the game.
    ///
    /// # Errors
    ///
    /// Returns the game's rejection unchanged; the game state is untouched.
    pub fn step(&mut self, event: &ScriptEvent) -> Result<StepOutcome, GameError> {
        let outcome = match *event {
            ScriptEvent::Select { square, side } => {
                self.game.select(square, side)?;
                StepOutcome::Selected(square)
            }
            ScriptEvent::To { square } => self.game.move_to(square)?.into(),
            ScriptEvent::Click { square } => self.game.click(square)?.into(),
            ScriptEvent::Promote { kind } => StepOutcome::Moved(self.game.promote(kind)?),
            ScriptEvent::Forfeit { side } => StepOutcome::Forfeited(self.game.forfeit(side)?),
            ScriptEvent::Reset => {
                self.game.reset();
                self.stats = GameStats::new();
                StepOutcome::Reset
            }
        };

        if let StepOutcome::Moved(event) = outcome {
            debug!(event = %event, "recorded move");
            self.stats.record(&event);
        }
        if let Some(result) = self.game.result() {
            if self.stats.result.is_none() {
                info!(result = ?result, moves = self.stats.total_moves, "game finished");
                self.stats.finish(result);
            }
        }
        Ok(outcome)
    }
}

impl From<MoveOutcome> for StepOutcome {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Selected(sq) => StepOutcome::Selected(sq),
            MoveOutcome::PromotionPending(sq) => StepOutcome::PromotionPending(sq),
            MoveOutcome::Completed(event) => StepOutcome::Moved(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessrules_engine::{PieceKind, Side};

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn clicks(replay: &mut Replay, squares: &[&str]) {
        for name in squares {
            replay
                .step(&ScriptEvent::Click { square: sq(name) })
                .unwrap();
        }
    }

    #[test]
    fn test_fools_mate_by_clicks() {
        let mut replay = Replay::new();
        clicks(
            &mut replay,
            &["f2", "f3", "e7", "e5", "g2", "g4", "d8", "h4"],
        );
        let stats = replay.stats();
        assert_eq!(stats.total_moves, 4);
        assert_eq!(stats.checks, 1);
        assert_eq!(
            stats.result,
            Some(GameResult::Checkmate {
                winner: Side::Black
            })
        );
    }

    #[test]
    fn test_rejected_event_leaves_state() {
        let mut replay = Replay::new();
        let err = replay
            .step(&ScriptEvent::Select {
                square: sq("e7"),
                side: Side::White,
            })
            .unwrap_err();
        assert_eq!(err, GameError::InvalidSelection(sq("e7")));
        assert_eq!(replay.stats().total_moves, 0);
        assert_eq!(replay.game().turn(), Some(Side::White));
    }

    #[test]
    fn test_select_then_to() {
        let mut replay = Replay::new();
        assert_eq!(
            replay
                .step(&ScriptEvent::Select {
                    square: sq("g1"),
                    side: Side::White
                })
                .unwrap(),
            StepOutcome::Selected(sq("g1"))
        );
        let outcome = replay.step(&ScriptEvent::To { square: sq("f3") }).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Moved(MoveEvent {
                kind: PieceKind::Knight,
                ..
            })
        ));
    }

    #[test]
    fn test_forfeit_and_reset() {
        let mut replay = Replay::new();
        clicks(&mut replay, &["e2", "e4"]);
        replay
            .step(&ScriptEvent::Forfeit { side: Side::White })
            .unwrap();
        assert_eq!(
            replay.stats().result,
            Some(GameResult::Forfeit {
                winner: Side::Black
            })
        );
        assert_eq!(
            replay.step(&ScriptEvent::Click { square: sq("e7") }),
            Err(GameError::GameOver)
        );

        assert_eq!(replay.step(&ScriptEvent::Reset), Ok(StepOutcome::Reset));
        assert_eq!(replay.stats(), &GameStats::new());
        assert!(!replay.game().is_over());
    }
}

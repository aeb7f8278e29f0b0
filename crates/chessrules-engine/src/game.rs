//! Turn-by-turn game management.
//!
//! A [`Game`] owns the board and walks it through the selection cycle:
//! pick a piece, pick one of its legal destinations, and if a pawn reached
//! its last rank, pick what it becomes. Every completed move is recorded as a
//! [`MoveEvent`] and followed by a checkmate/stalemate evaluation.

use crate::apply::{apply, end_turn, resolve_promotion, AppliedMove};
use crate::attacks::is_in_check;
use crate::castling::castling_moves;
use crate::legality::{has_legal_move, moves_from};
use crate::{Board, MoveEvent, SquareSet};
use chessrules_core::{Move, Piece, PieceKind, Side, Square};
use thiserror::Error;
use tracing::debug;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "result", rename_all = "snake_case"))]
pub enum GameResult {
    /// The loser is in check with no legal move.
    Checkmate { winner: Side },
    /// The loser gave up.
    Forfeit { winner: Side },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl GameResult {
    /// Returns the winning side, if there is one.
    pub fn winner(&self) -> Option<Side> {
        match *self {
            GameResult::Checkmate { winner } | GameResult::Forfeit { winner } => Some(winner),
            GameResult::Stalemate => None,
        }
    }
}

/// Where the game is in its selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for `side` to pick a piece.
    SelectingPiece { side: Side },
    /// `side` has picked the piece on `square` and must pick a destination.
    PieceSelected { side: Side, square: Square },
    /// `side` moved a pawn to `square` and must pick its new kind.
    PromotionPending { side: Side, square: Square },
    /// No further input is accepted.
    Over(GameResult),
}

/// Error type for game operations.
///
/// A failed operation leaves the game exactly as it was.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no piece of the side to move on {0}")]
    InvalidSelection(Square),
    #[error("the selected piece cannot move to {0}")]
    IllegalDestination(Square),
    #[error("cannot promote to {0}")]
    PromotionChoiceInvalid(PieceKind),
    #[error("no piece is selected")]
    NoSelection,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("the game is over")]
    GameOver,
}

/// Result of a successful selection or destination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A piece on this square is now selected.
    Selected(Square),
    /// A pawn reached this square and waits for [`Game::promote`].
    PromotionPending(Square),
    /// The move was played.
    Completed(MoveEvent),
}

/// A two-player game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: GameState,
    /// Legal moves of the selected piece.
    selection: Vec<Move>,
    /// Pawn move waiting for its promotion choice.
    pending: Option<AppliedMove>,
    history: Vec<MoveEvent>,
    /// Captured pieces, indexed by the side they belonged to.
    captured: [Vec<Piece>; 2],
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting layout, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// Creates a game from an arbitrary board.
    ///
    /// If the side to move has no legal move the game starts over.
    pub fn from_board(board: Board) -> Self {
        let side = board.side_to_move();
        let mut game = Game {
            board,
            state: GameState::SelectingPiece { side },
            selection: Vec::new(),
            pending: None,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
        };
        game.evaluate_turn(side);
        game
    }

    /// Restarts from the standard layout.
    pub fn reset(&mut self) {
        debug!("game reset");
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the side whose input is awaited, or `None` once the game is over.
    pub fn turn(&self) -> Option<Side> {
        match self.state {
            GameState::SelectingPiece { side }
            | GameState::PieceSelected { side, .. }
            | GameState::PromotionPending { side, .. } => Some(side),
            GameState::Over(_) => None,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            GameState::Over(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        is_in_check(&self.board, side)
    }

    /// Returns the selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        match self.state {
            GameState::PieceSelected { square, .. } => Some(square),
            _ => None,
        }
    }

    /// Returns the legal moves of the selected piece, castling included.
    pub fn selected_moves(&self) -> &[Move] {
        &self.selection
    }

    /// Returns the legal destinations of the selected piece.
    pub fn selected_destinations(&self) -> SquareSet {
        self.selection.iter().map(|m| m.to()).collect()
    }

    /// Returns the castling moves open to the side whose turn it is.
    pub fn castling_options(&self) -> Vec<Move> {
        match self.state {
            GameState::SelectingPiece { side } | GameState::PieceSelected { side, .. } => {
                castling_moves(&self.board, side)
            }
            _ => Vec::new(),
        }
    }

    /// Returns the square of the pawn waiting for a promotion choice.
    pub fn pending_promotion(&self) -> Option<Square> {
        match self.state {
            GameState::PromotionPending { square, .. } => Some(square),
            _ => None,
        }
    }

    /// Returns every completed move, oldest first.
    pub fn history(&self) -> &[MoveEvent] {
        &self.history
    }

    /// Returns the pieces of `side` that have been captured, in capture order.
    pub fn captured(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    /// Selects the piece of `side` on `square`, replacing any earlier selection.
    pub fn select(&mut self, square: Square, side: Side) -> Result<(), GameError> {
        let turn = self.accepting_moves()?;
        let piece = self
            .board
            .piece_at(square)
            .filter(|p| p.side == side && side == turn)
            .ok_or(GameError::InvalidSelection(square))?;

        self.selection = moves_from(&self.board, square);
        self.state = GameState::PieceSelected { side, square };
        debug!(
            piece = %piece,
            moves = self.selection.len(),
            "piece selected"
        );
        Ok(())
    }

    /// Moves the selected piece to `square`.
    ///
    /// A friendly piece on `square` becomes the new selection instead.
    pub fn move_to(&mut self, square: Square) -> Result<MoveOutcome, GameError> {
        let side = self.accepting_moves()?;
        if !matches!(self.state, GameState::PieceSelected { .. }) {
            return Err(GameError::NoSelection);
        }

        let Some(mv) = self.selection.iter().copied().find(|m| m.to() == square) else {
            if self.board.piece_at(square).is_some_and(|p| p.side == side) {
                self.select(square, side)?;
                return Ok(MoveOutcome::Selected(square));
            }
            return Err(GameError::IllegalDestination(square));
        };

        let applied = apply(&mut self.board, mv);
        self.selection.clear();
        debug!(side = %side, mv = %mv, "move applied");

        if applied.promotion_pending() {
            self.pending = Some(applied);
            self.state = GameState::PromotionPending { side, square };
            debug!(square = %square, "awaiting promotion choice");
            return Ok(MoveOutcome::PromotionPending(square));
        }

        Ok(MoveOutcome::Completed(self.complete(applied, None)))
    }

    /// Completes a pending promotion with `kind`.
    pub fn promote(&mut self, kind: PieceKind) -> Result<MoveEvent, GameError> {
        let square = match self.state {
            GameState::PromotionPending { square, .. } => square,
            GameState::Over(_) => return Err(GameError::GameOver),
            _ => return Err(GameError::NoPromotionPending),
        };
        if !kind.is_promotion_choice() {
            return Err(GameError::PromotionChoiceInvalid(kind));
        }
        let applied = self.pending.take().ok_or(GameError::NoPromotionPending)?;

        resolve_promotion(&mut self.board, square, kind);
        let applied = AppliedMove {
            mv: applied.mv.with_promotion(kind),
            ..applied
        };
        debug!(square = %square, kind = %kind, "promotion resolved");
        Ok(self.complete(applied, Some(kind)))
    }

    /// Routes a raw board click.
    ///
    /// With a piece selected the click is a destination (or a re-selection);
    /// otherwise it selects a piece of the side to move.
    pub fn click(&mut self, square: Square) -> Result<MoveOutcome, GameError> {
        let side = self.accepting_moves()?;
        match self.state {
            GameState::PieceSelected { .. } => self.move_to(square),
            _ => {
                self.select(square, side)?;
                Ok(MoveOutcome::Selected(square))
            }
        }
    }

    /// Ends the game with `side` giving up.
    pub fn forfeit(&mut self, side: Side) -> Result<GameResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let result = GameResult::Forfeit {
            winner: side.opposite(),
        };
        self.selection.clear();
        self.pending = None;
        self.state = GameState::Over(result);
        debug!(side = %side, "forfeit");
        Ok(result)
    }

    /// Returns the side to move if new moves are accepted.
    fn accepting_moves(&self) -> Result<Side, GameError> {
        match self.state {
            GameState::SelectingPiece { side } | GameState::PieceSelected { side, .. } => Ok(side),
            GameState::PromotionPending { .. } => Err(GameError::PromotionPending),
            GameState::Over(_) => Err(GameError::GameOver),
        }
    }

    /// Records a finished move and hands the turn over.
    fn complete(&mut self, applied: AppliedMove, promoted_to: Option<PieceKind>) -> MoveEvent {
        let mover = applied.piece.side;
        let opponent = mover.opposite();
        if let Some(piece) = applied.captured {
            self.captured[piece.side.index()].push(piece);
        }

        end_turn(&mut self.board);
        let gave_check = is_in_check(&self.board, opponent);
        let event = MoveEvent::new(&applied, promoted_to, gave_check);
        self.history.push(event);
        debug!(event = %event, "move completed");

        self.evaluate_turn(opponent);
        event
    }

    /// Sets up `side`'s turn, or ends the game if it cannot move.
    fn evaluate_turn(&mut self, side: Side) {
        self.state = if has_legal_move(&self.board, side) {
            if is_in_check(&self.board, side) {
                debug!(side = %side, "in check");
            }
            GameState::SelectingPiece { side }
        } else if is_in_check(&self.board, side) {
            GameState::Over(GameResult::Checkmate {
                winner: side.opposite(),
            })
        } else {
            GameState::Over(GameResult::Stalemate)
        };
        if let GameState::Over(result) = self.state {
            debug!(result = ?result, "game over");
        }
    }
}

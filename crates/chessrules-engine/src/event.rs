//! Completed-move records consumed by statistics and history.

use crate::apply::AppliedMove;
use chessrules_core::{PieceKind, Side, Square};
use std::fmt;

/// A completed move, as reported to observers.
///
/// For castling, `kind`, `from` and `to` describe the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEvent {
    pub kind: PieceKind,
    pub side: Side,
    pub from: Square,
    pub to: Square,
    pub was_capture: bool,
    pub was_castle: bool,
    pub was_en_passant: bool,
    pub was_promotion: bool,
    /// Kind of the piece removed from the board, if any.
    pub captured: Option<PieceKind>,
    /// Kind the pawn became, for promotions.
    pub promoted_to: Option<PieceKind>,
    /// Whether the opponent was left in check.
    pub gave_check: bool,
}

impl MoveEvent {
    pub(crate) fn new(applied: &AppliedMove, promoted_to: Option<PieceKind>, gave_check: bool) -> Self {
        let mv = applied.mv;
        MoveEvent {
            kind: applied.piece.kind,
            side: applied.piece.side,
            from: mv.from(),
            to: mv.to(),
            was_capture: mv.is_capture(),
            was_castle: mv.is_castle(),
            was_en_passant: mv.is_en_passant(),
            was_promotion: mv.is_promotion(),
            captured: applied.captured.map(|p| p.kind),
            promoted_to,
            gave_check,
        }
    }
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.was_capture { 'x' } else { '-' };
        write!(f, "{} {} {}{}{}", self.side, self.kind, self.from, sep, self.to)?;
        if self.was_castle {
            write!(f, " (castle)")?;
        }
        if self.was_en_passant {
            write!(f, " e.p.")?;
        }
        if let Some(kind) = self.promoted_to {
            write!(f, "={}", kind)?;
        }
        if self.gave_check {
            write!(f, "+")?;
        }
        Ok(())
    }
}

//! Applying moves to the board.
//!
//! This is the only place the live board is mutated during play.

use crate::Board;
use chessrules_core::{Move, Piece, PieceKind, Square};

/// What [`apply`] did, for event reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The move as applied.
    pub mv: Move,
    /// The moving piece as it stood before the move (the king for castling).
    pub piece: Piece,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
}

impl AppliedMove {
    /// Returns true if a promotion was applied without a chosen kind.
    pub fn promotion_pending(&self) -> bool {
        matches!(self.mv, Move::Promotion { new_kind: None, .. })
    }
}

/// Applies `mv` to `board`.
///
/// The side to move is left alone; see [`end_turn`]. An unresolved
/// [`Move::Promotion`] leaves the pawn on its destination with its old kind
/// until [`resolve_promotion`] is called.
///
/// # Panics
///
/// Panics if there is no piece on the source square, or if the move would
/// capture a king. Both mean the move did not come from the legality filter.
pub fn apply(board: &mut Board, mv: Move) -> AppliedMove {
    let from = mv.from();
    let piece = board
        .piece_at(from)
        .unwrap_or_else(|| panic!("no piece on {} for move {}", from, mv));

    let captured = mv.captured_square().and_then(|sq| {
        if let Some(target) = board.piece_at(sq) {
            assert!(
                target.kind != PieceKind::King,
                "king capture attempted by {}",
                mv
            );
        }
        board.remove_at(sq)
    });

    match mv {
        Move::Castle {
            king_from,
            king_to,
            rook_from,
            rook_to,
        } => {
            board.relocate(king_from, king_to);
            board.relocate(rook_from, rook_to);
        }
        Move::Promotion {
            to,
            new_kind: Some(kind),
            ..
        } => {
            board.relocate(from, to);
            board.set_kind(to, kind);
        }
        Move::Normal { to, .. }
        | Move::Capture { to, .. }
        | Move::EnPassant { to, .. }
        | Move::Promotion { to, .. } => {
            board.relocate(from, to);
        }
    }

    let target = double_push_target(&piece, mv.to());
    board.set_en_passant(piece.side, target);

    AppliedMove {
        mv,
        piece,
        captured,
    }
}

/// Rewrites the pawn on `sq` into `kind`, completing a pending promotion.
///
/// Returns the promoted piece, or `None` if there is no pawn on `sq`.
pub fn resolve_promotion(board: &mut Board, sq: Square, kind: PieceKind) -> Option<Piece> {
    debug_assert!(kind.is_promotion_choice(), "cannot promote to {}", kind);
    match board.piece_at(sq) {
        Some(p) if p.kind == PieceKind::Pawn => board.set_kind(sq, kind),
        _ => None,
    }
}

/// Hands the move to the other side.
pub fn end_turn(board: &mut Board) {
    board.set_side_to_move(board.side_to_move().opposite());
}

/// Returns a copy of `board` with `mv` applied and the turn passed.
///
/// An unresolved promotion keeps the turn with the mover.
pub fn make_move(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    let applied = apply(&mut next, mv);
    if !applied.promotion_pending() {
        end_turn(&mut next);
    }
    next
}

/// The square skipped by a two-square pawn advance, if `piece` made one.
fn double_push_target(piece: &Piece, to: Square) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || to.rank().abs_diff(piece.square.rank()) != 2 {
        return None;
    }
    piece.square.offset(0, piece.side.pawn_direction())
}

//! Pseudo-legal move generation.
//!
//! Everything here is a pure function of the board: destinations are
//! geometrically valid for the piece, but may leave the mover's own king
//! attacked. [`crate::legality`] filters them. Castling is not generated
//! here; see [`crate::castling`].

mod steps;
pub mod perft;

use crate::{Board, SquareSet};
use chessrules_core::{Move, Piece, PieceKind, Side};

pub use steps::{king_steps, knight_steps, pawn_attacks};

/// Orthogonal ray directions as `(file delta, rank delta)`.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions as `(file delta, rank delta)`.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the pseudo-legal destinations of `piece`.
pub fn pseudo_destinations(board: &Board, piece: &Piece) -> SquareSet {
    let own = board.occupied_by(piece.side);
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, piece),
        PieceKind::Knight => knight_steps(piece.square) & !own,
        PieceKind::Bishop => slide(board, piece, &BISHOP_DIRECTIONS),
        PieceKind::Rook => slide(board, piece, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            slide(board, piece, &ROOK_DIRECTIONS) | slide(board, piece, &BISHOP_DIRECTIONS)
        }
        PieceKind::King => king_steps(piece.square) & !own,
    }
}

/// Returns the squares `piece` attacks: where it could capture an enemy piece.
///
/// Identical to [`pseudo_destinations`] except for pawns, which attack their
/// two forward diagonals whether or not anything stands there, and never
/// attack the squares they push to.
pub fn attacked_squares(board: &Board, piece: &Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.square, piece.side),
        _ => pseudo_destinations(board, piece),
    }
}

/// Returns the pseudo-legal moves of `piece`, tagged by kind.
///
/// A pawn reaching its last rank yields a single unresolved
/// [`Move::Promotion`]; the kind is chosen later.
pub fn pseudo_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let destinations = pseudo_destinations(board, piece);
    let mut moves = Vec::with_capacity(destinations.len());
    let ep_target = board.en_passant_target(piece.side.opposite());

    for to in destinations {
        let from = piece.square;
        let captured = board.piece_at(to);
        let m = match (piece.kind, captured) {
            (PieceKind::Pawn, None) if Some(to) == ep_target && to.file() != from.file() => {
                match to.offset(0, -piece.side.pawn_direction()) {
                    Some(captured_pawn_square) => Move::EnPassant {
                        from,
                        to,
                        captured_pawn_square,
                    },
                    None => continue,
                }
            }
            (PieceKind::Pawn, captured) if to.rank() == piece.side.promotion_rank() => {
                Move::Promotion {
                    from,
                    to,
                    new_kind: None,
                    captured,
                }
            }
            (_, Some(captured)) => Move::Capture { from, to, captured },
            (_, None) => Move::Normal { from, to },
        };
        moves.push(m);
    }

    moves
}

fn pawn_destinations(board: &Board, pawn: &Piece) -> SquareSet {
    let occupied = board.occupied_squares();
    let enemies = board.occupied_by(pawn.side.opposite());
    let dir = pawn.side.pawn_direction();
    let mut targets = SquareSet::EMPTY;

    if let Some(one) = pawn.square.offset(0, dir).filter(|sq| !occupied.contains(*sq)) {
        targets.insert(one);
        if !pawn.moved {
            if let Some(two) = one.offset(0, dir).filter(|sq| !occupied.contains(*sq)) {
                targets.insert(two);
            }
        }
    }

    let diagonals = pawn_attacks(pawn.square, pawn.side);
    targets |= diagonals & enemies;
    if let Some(ep) = board.en_passant_target(pawn.side.opposite()) {
        if diagonals.contains(ep) {
            targets.insert(ep);
        }
    }

    targets
}

/// Casts rays one step at a time, stopping before friendly pieces and on
/// enemy pieces.
fn slide(board: &Board, piece: &Piece, directions: &[(i8, i8)]) -> SquareSet {
    let own = board.occupied_by(piece.side);
    let enemies = board.occupied_by(piece.side.opposite());
    let mut targets = SquareSet::EMPTY;

    for &(df, dr) in directions {
        let mut current = piece.square;
        while let Some(next) = current.offset(df, dr) {
            if own.contains(next) {
                break;
            }
            targets.insert(next);
            if enemies.contains(next) {
                break;
            }
            current = next;
        }
    }

    targets
}

/// Returns every pseudo-legal move of `side`, castling excluded.
pub fn all_pseudo_moves(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces_of(side)
        .flat_map(|piece| pseudo_moves(board, &piece))
        .collect()
}

//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Each promotion counts once per possible kind.

use crate::apply::make_move;
use crate::legality::all_legal_moves;
use crate::Board;
use chessrules_core::{Move, PieceKind};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded_moves(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| perft(&make_move(board, m), depth - 1))
        .sum()
}

/// Perft with divide: node count below each root move, sorted by move text.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = expanded_moves(board)
        .into_iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&make_move(board, m), depth - 1)
            } else {
                1
            };
            (m.to_string(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Legal moves of the side to move with every promotion resolved.
fn expanded_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for m in all_legal_moves(board, board.side_to_move()) {
        match m {
            Move::Promotion { new_kind: None, .. } => moves.extend(
                PieceKind::PROMOTION_CHOICES
                    .iter()
                    .map(|&kind| m.with_promotion(kind)),
            ),
            _ => moves.push(m),
        }
    }
    moves
}

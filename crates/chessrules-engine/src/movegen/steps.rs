//! Fixed-offset step tables for knights, kings and pawn attacks.

use crate::SquareSet;
use chessrules_core::{Side, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const KNIGHT_STEPS: [SquareSet; 64] = compute_steps(&KNIGHT_OFFSETS);
const KING_STEPS: [SquareSet; 64] = compute_steps(&KING_OFFSETS);
const PAWN_ATTACKS: [[SquareSet; 64]; 2] = [
    compute_steps(&[(-1, 1), (1, 1)]),
    compute_steps(&[(-1, -1), (1, -1)]),
];

/// Squares a knight on `sq` reaches, ignoring occupancy.
#[inline]
pub fn knight_steps(sq: Square) -> SquareSet {
    KNIGHT_STEPS[sq.index() as usize]
}

/// Squares adjacent to `sq`.
#[inline]
pub fn king_steps(sq: Square) -> SquareSet {
    KING_STEPS[sq.index() as usize]
}

/// The two forward diagonals a pawn of `side` on `sq` attacks.
#[inline]
pub fn pawn_attacks(sq: Square, side: Side) -> SquareSet {
    PAWN_ATTACKS[side.index()][sq.index() as usize]
}

/// Builds, for every square, the set of on-board squares at the given offsets.
const fn compute_steps(offsets: &[(i8, i8)]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut index = 0u8;

    while index < 64 {
        let file = (index % 8) as i8;
        let rank = (index / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            let (df, dr) = offsets[i];
            let (f, r) = (file + df, rank + dr);
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        table[index as usize] = SquareSet::from_bits(bits);
        index += 1;
    }

    table
}

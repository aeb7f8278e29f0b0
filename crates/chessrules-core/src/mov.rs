//! Move representation.

use crate::{Piece, PieceKind, Square};
use std::fmt;

/// A move, produced by move generation and consumed once by the applier.
///
/// Every variant carries enough context for the applier to act without
/// re-inspecting the board: captures carry the captured piece and en passant
/// carries the square of the pawn it removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Move {
    /// A quiet move to an empty square.
    Normal { from: Square, to: Square },
    /// A move onto a square held by an enemy piece.
    Capture {
        from: Square,
        to: Square,
        captured: Piece,
    },
    /// A pawn capture onto the square an enemy pawn skipped over.
    EnPassant {
        from: Square,
        to: Square,
        captured_pawn_square: Square,
    },
    /// King and rook relocated together.
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// A pawn reaching its final rank.
    ///
    /// `new_kind` is `None` while the choice is still outstanding.
    Promotion {
        from: Square,
        to: Square,
        new_kind: Option<PieceKind>,
        captured: Option<Piece>,
    },
}

impl Move {
    /// Returns the source square of the moving piece (the king for castling).
    #[inline]
    pub const fn from(&self) -> Square {
        match *self {
            Move::Normal { from, .. }
            | Move::Capture { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. } => from,
            Move::Castle { king_from, .. } => king_from,
        }
    }

    /// Returns the destination square of the moving piece (the king for castling).
    #[inline]
    pub const fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. }
            | Move::Capture { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Promotion { to, .. } => to,
            Move::Castle { king_to, .. } => king_to,
        }
    }

    /// Returns the square of the piece this move removes, if any.
    pub const fn captured_square(&self) -> Option<Square> {
        match *self {
            Move::Capture { captured, .. } => Some(captured.square),
            Move::Promotion {
                captured: Some(captured),
                ..
            } => Some(captured.square),
            Move::EnPassant {
                captured_pawn_square,
                ..
            } => Some(captured_pawn_square),
            _ => None,
        }
    }

    /// Returns the captured piece for ordinary captures and capturing promotions.
    ///
    /// En passant captures report `None` here; the pawn is identified by
    /// [`Move::captured_square`].
    pub const fn captured_piece(&self) -> Option<Piece> {
        match *self {
            Move::Capture { captured, .. } => Some(captured),
            Move::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    /// Returns true if the move removes an enemy piece.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured_square().is_some()
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    /// Returns a copy of a promotion with the chosen kind filled in.
    ///
    /// Non-promotion moves are returned unchanged.
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        match self {
            Move::Promotion {
                from, to, captured, ..
            } => Move::Promotion {
                from,
                to,
                new_kind: Some(kind),
                captured,
            },
            other => other,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Normal { from, to } => write!(f, "{}-{}", from, to),
            Move::Capture { from, to, .. } | Move::EnPassant { from, to, .. } => {
                write!(f, "{}x{}", from, to)
            }
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => write!(f, "{}-{}/{}-{}", king_from, king_to, rook_from, rook_to),
            Move::Promotion {
                from, to, new_kind, ..
            } => {
                let sep = if self.is_capture() { 'x' } else { '-' };
                match new_kind {
                    Some(kind) => write!(f, "{}{}{}={}", from, sep, to, kind),
                    None => write!(f, "{}{}{}=?", from, sep, to),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn endpoints() {
        let m = Move::Normal {
            from: sq(4, 1),
            to: sq(4, 3),
        };
        assert_eq!(m.from(), sq(4, 1));
        assert_eq!(m.to(), sq(4, 3));

        let castle = Move::Castle {
            king_from: sq(4, 0),
            king_to: sq(6, 0),
            rook_from: sq(7, 0),
            rook_to: sq(5, 0),
        };
        assert_eq!(castle.from(), sq(4, 0));
        assert_eq!(castle.to(), sq(6, 0));
        assert!(castle.is_castle());
        assert!(!castle.is_capture());
    }

    #[test]
    fn captured_square_differs_for_en_passant() {
        let ep = Move::EnPassant {
            from: sq(3, 3),
            to: sq(4, 2),
            captured_pawn_square: sq(4, 3),
        };
        assert!(ep.is_capture());
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured_square(), Some(sq(4, 3)));
        assert_eq!(ep.captured_piece(), None);
    }

    #[test]
    fn capturing_promotion() {
        let rook = Piece::new(PieceKind::Rook, Side::Black, sq(1, 7));
        let promo = Move::Promotion {
            from: sq(0, 6),
            to: sq(1, 7),
            new_kind: None,
            captured: Some(rook),
        };
        assert!(promo.is_promotion());
        assert!(promo.is_capture());
        assert_eq!(promo.captured_piece(), Some(rook));

        let resolved = promo.with_promotion(PieceKind::Knight);
        assert_eq!(
            resolved,
            Move::Promotion {
                from: sq(0, 6),
                to: sq(1, 7),
                new_kind: Some(PieceKind::Knight),
                captured: Some(rook),
            }
        );
    }

    #[test]
    fn with_promotion_ignores_other_moves() {
        let m = Move::Normal {
            from: sq(0, 0),
            to: sq(0, 1),
        };
        assert_eq!(m.with_promotion(PieceKind::Queen), m);
    }

    #[test]
    fn display() {
        let m = Move::Normal {
            from: sq(4, 1),
            to: sq(4, 3),
        };
        assert_eq!(format!("{}", m), "e2-e4");

        let promo = Move::Promotion {
            from: sq(4, 6),
            to: sq(4, 7),
            new_kind: None,
            captured: None,
        };
        assert_eq!(format!("{}", promo), "e7-e8=?");
        assert_eq!(
            format!("{}", promo.with_promotion(PieceKind::Queen)),
            "e7-e8=Queen"
        );
    }
}

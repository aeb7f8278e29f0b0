//! Per-game move statistics aggregated from completed moves.

use chessrules_engine::{GameResult, MoveEvent, PieceKind, Side, Square};
use serde::Serialize;
use std::fmt;

/// Move counts per piece kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PieceCounts {
    pub pawn: u32,
    pub knight: u32,
    pub bishop: u32,
    pub rook: u32,
    pub queen: u32,
    pub king: u32,
}

impl PieceCounts {
    fn bump(&mut self, kind: PieceKind) {
        let slot = match kind {
            PieceKind::Pawn => &mut self.pawn,
            PieceKind::Knight => &mut self.knight,
            PieceKind::Bishop => &mut self.bishop,
            PieceKind::Rook => &mut self.rook,
            PieceKind::Queen => &mut self.queen,
            PieceKind::King => &mut self.king,
        };
        *slot += 1;
    }
}

/// Counts kept separately for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BySide {
    pub white: u32,
    pub black: u32,
}

impl BySide {
    fn bump(&mut self, side: Side) {
        match side {
            Side::White => self.white += 1,
            Side::Black => self.black += 1,
        }
    }
}

/// A capture, numbered by the move that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureRecord {
    pub move_number: u32,
    pub piece: PieceKind,
    pub captured_by: Side,
}

/// A promotion, numbered by the move that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionRecord {
    pub move_number: u32,
    pub side: Side,
    pub square: Square,
    pub kind: PieceKind,
}

/// Summary of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total_moves: u32,
    pub moves: BySide,
    pub piece_moves: PieceCounts,
    pub captures: Vec<CaptureRecord>,
    pub checks: u32,
    pub castles: BySide,
    pub en_passant: u32,
    pub promotions: Vec<PromotionRecord>,
    pub result: Option<GameResult>,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one completed move into the totals.
    pub fn record(&mut self, event: &MoveEvent) {
        self.total_moves += 1;
        self.moves.bump(event.side);
        self.piece_moves.bump(event.kind);

        if let Some(piece) = event.captured {
            self.captures.push(CaptureRecord {
                move_number: self.total_moves,
                piece,
                captured_by: event.side,
            });
        }
        if event.gave_check {
            self.checks += 1;
        }
        if event.was_castle {
            self.castles.bump(event.side);
        }
        if event.was_en_passant {
            self.en_passant += 1;
        }
        if let Some(kind) = event.promoted_to {
            self.promotions.push(PromotionRecord {
                move_number: self.total_moves,
                side: event.side,
                square: event.to,
                kind,
            });
        }
    }

    pub fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
    }

    /// Number of captures made by `side`.
    pub fn captures_by(&self, side: Side) -> usize {
        self.captures
            .iter()
            .filter(|c| c.captured_by == side)
            .count()
    }
}

impl fmt::Display for GameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "moves: {} (white {}, black {})",
            self.total_moves, self.moves.white, self.moves.black
        )?;
        let p = &self.piece_moves;
        writeln!(
            f,
            "by piece: pawn {}, knight {}, bishop {}, rook {}, queen {}, king {}",
            p.pawn, p.knight, p.bishop, p.rook, p.queen, p.king
        )?;
        writeln!(
            f,
            "captures: white {}, black {}",
            self.captures_by(Side::White),
            self.captures_by(Side::Black)
        )?;
        writeln!(f, "checks: {}", self.checks)?;
        writeln!(
            f,
            "castles: white {}, black {}",
            self.castles.white, self.castles.black
        )?;
        writeln!(f, "en passant: {}", self.en_passant)?;
        writeln!(f, "promotions: {}", self.promotions.len())?;
        match self.result {
            Some(GameResult::Checkmate { winner }) => write!(f, "result: checkmate, {} wins", winner),
            Some(GameResult::Forfeit { winner }) => write!(f, "result: forfeit, {} wins", winner),
            Some(GameResult::Stalemate) => write!(f, "result: stalemate"),
            None => write!(f, "result: unfinished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn event(kind: PieceKind, side: Side, from: &str, to: &str) -> MoveEvent {
        MoveEvent {
            kind,
            side,
            from: sq(from),
            to: sq(to),
            was_capture: false,
            was_castle: false,
            was_en_passant: false,
            was_promotion: false,
            captured: None,
            promoted_to: None,
            gave_check: false,
        }
    }

    #[test]
    fn test_counts_moves_by_side_and_kind() {
        let mut stats = GameStats::new();
        stats.record(&event(PieceKind::Pawn, Side::White, "e2", "e4"));
        stats.record(&event(PieceKind::Knight, Side::Black, "g8", "f6"));
        stats.record(&event(PieceKind::Pawn, Side::White, "d2", "d4"));

        assert_eq!(stats.total_moves, 3);
        assert_eq!(stats.moves, BySide { white: 2, black: 1 });
        assert_eq!(stats.piece_moves.pawn, 2);
        assert_eq!(stats.piece_moves.knight, 1);
    }

    #[test]
    fn test_special_moves() {
        let mut stats = GameStats::new();
        stats.record(&MoveEvent {
            was_castle: true,
            ..event(PieceKind::King, Side::Black, "e8", "g8")
        });
        stats.record(&MoveEvent {
            was_capture: true,
            was_en_passant: true,
            captured: Some(PieceKind::Pawn),
            ..event(PieceKind::Pawn, Side::White, "e5", "d6")
        });
        stats.record(&MoveEvent {
            was_promotion: true,
            promoted_to: Some(PieceKind::Queen),
            gave_check: true,
            ..event(PieceKind::Pawn, Side::Black, "b2", "b1")
        });

        assert_eq!(stats.castles, BySide { white: 0, black: 1 });
        assert_eq!(stats.en_passant, 1);
        assert_eq!(stats.checks, 1);
        assert_eq!(stats.captures_by(Side::White), 1);
        assert_eq!(stats.captures[0].move_number, 2);
        assert_eq!(
            stats.promotions,
            vec![PromotionRecord {
                move_number: 3,
                side: Side::Black,
                square: sq("b1"),
                kind: PieceKind::Queen,
            }]
        );
    }

    #[test]
    fn test_summary_text() {
        let mut stats = GameStats::new();
        stats.record(&event(PieceKind::Pawn, Side::White, "e2", "e4"));
        stats.finish(GameResult::Forfeit {
            winner: Side::White,
        });
        let text = stats.to_string();
        assert!(text.starts_with("moves: 1 (white 1, black 0)"));
        assert!(text.ends_with("result: forfeit, White wins"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut stats = GameStats::new();
        stats.finish(GameResult::Stalemate);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_moves"], 0);
        assert_eq!(json["result"]["result"], "stalemate");
    }
}

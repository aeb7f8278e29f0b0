//! Board state: live pieces, side to move and en-passant targets.

use chessrules_core::{Piece, PieceKind, Side, Square};
use std::fmt;
use thiserror::Error;

use crate::SquareSet;

/// Errors raised when assembling a position that breaks a board invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} holds more than one piece")]
    Occupied(Square),

    #[error("{0} has no king")]
    MissingKing(Side),

    #[error("{0} has more than one king")]
    ExtraKing(Side),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("no piece at {0}")]
    NoPieceAt(Square),

    #[error("invalid en passant target {0}")]
    InvalidEnPassant(Square),
}

/// The complete rules state of a game in progress.
///
/// Pieces are kept in one unordered collection per side. The board enforces
/// storage invariants only; rules live in the move generator, legality
/// filter and applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Live pieces, indexed by [`Side::index`].
    pieces: [Vec<Piece>; 2],

    /// The side to move.
    side_to_move: Side,

    /// Square skipped by each side's immediately preceding double push.
    en_passant: [Option<Square>; 2],
}

impl Board {
    /// The piece order of the standard back rank, file a to file h.
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    fn empty() -> Self {
        Board {
            pieces: [Vec::with_capacity(16), Vec::with_capacity(16)],
            side_to_move: Side::White,
            en_passant: [None, None],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for side in Side::BOTH {
            let list = &mut board.pieces[side.index()];
            for (file, kind) in (0u8..).zip(Self::BACK_RANK) {
                if let Some(sq) = Square::new(file, side.back_rank()) {
                    list.push(Piece::new(kind, side, sq));
                }
            }
            for file in 0..8 {
                if let Some(sq) = Square::new(file, side.pawn_rank()) {
                    list.push(Piece::new(PieceKind::Pawn, side, sq));
                }
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces
            .iter()
            .flatten()
            .find(|p| p.square == sq)
            .copied()
    }

    /// Returns the live pieces of one side, in no particular order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces[side.index()].iter().copied()
    }

    /// Returns every live piece.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().flatten().copied()
    }

    /// Returns the squares held by one side.
    pub fn occupied_by(&self, side: Side) -> SquareSet {
        self.pieces[side.index()].iter().map(|p| p.square).collect()
    }

    /// Returns the squares held by either side.
    #[inline]
    pub fn occupied_squares(&self) -> SquareSet {
        self.occupied_by(Side::White) | self.occupied_by(Side::Black)
    }

    /// Returns the square `side`'s last double push skipped, while it is
    /// still capturable.
    #[inline]
    pub fn en_passant_target(&self, side: Side) -> Option<Square> {
        self.en_passant[side.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the square of `side`'s king.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces[side.index()]
            .iter()
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    /// Removes and returns the piece on `sq`.
    pub(crate) fn remove_at(&mut self, sq: Square) -> Option<Piece> {
        for list in &mut self.pieces {
            if let Some(i) = list.iter().position(|p| p.square == sq) {
                return Some(list.swap_remove(i));
            }
        }
        None
    }

    /// Moves the piece on `from` to `to` and marks it as moved.
    ///
    /// The destination must already be empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        debug_assert!(self.piece_at(to).is_none(), "relocating onto {}", to);
        let piece = self.pieces.iter_mut().flatten().find(|p| p.square == from)?;
        piece.square = to;
        piece.moved = true;
        Some(*piece)
    }

    /// Rewrites the kind of the piece on `sq`.
    pub(crate) fn set_kind(&mut self, sq: Square, kind: PieceKind) -> Option<Piece> {
        let piece = self.pieces.iter_mut().flatten().find(|p| p.square == sq)?;
        piece.kind = kind;
        Some(*piece)
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, side: Side, target: Option<Square>) {
        self.en_passant[side.index()] = target;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let symbol = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |p| p.symbol());
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Fluent builder for arbitrary positions.
///
/// The `moved` flag of pawns, kings and rooks is inferred from their square:
/// on a standard home square they count as unmoved, anywhere else as moved.
/// Other kinds never consult the flag and start unmoved. Use
/// [`BoardBuilder::moved`] to override.
///
/// # Example
///
/// ```
/// use chessrules_core::{PieceKind, Side, Square};
/// use chessrules_engine::BoardBuilder;
///
/// let sq = |file, rank| Square::new(file, rank).unwrap();
/// let board = BoardBuilder::new()
///     .piece(PieceKind::King, Side::White, sq(4, 0))
///     .piece(PieceKind::Rook, Side::White, sq(7, 0))
///     .piece(PieceKind::King, Side::Black, sq(4, 7))
///     .build()
///     .unwrap();
/// assert_eq!(board.pieces_of(Side::White).count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    pieces: Vec<Piece>,
    overrides: Vec<(Square, bool)>,
    side_to_move: Side,
    en_passant: [Option<Square>; 2],
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Creates an empty builder with White to move.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            overrides: Vec::new(),
            side_to_move: Side::White,
            en_passant: [None, None],
        }
    }

    /// Creates a builder holding the standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        let board = Board::standard();
        BoardBuilder {
            pieces: board.pieces().collect(),
            ..Self::new()
        }
    }

    /// Places a piece.
    #[must_use]
    pub fn piece(mut self, kind: PieceKind, side: Side, square: Square) -> Self {
        let mut piece = Piece::new(kind, side, square);
        piece.moved = matches!(kind, PieceKind::Pawn | PieceKind::King | PieceKind::Rook)
            && !piece.on_home_square();
        self.pieces.push(piece);
        self
    }

    /// Removes whatever piece was placed on `square`.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|p| p.square != square);
        self
    }

    /// Overrides the inferred `moved` flag of the piece on `square`.
    #[must_use]
    pub fn moved(mut self, square: Square, moved: bool) -> Self {
        self.overrides.push((square, moved));
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Marks `target` as the square `side`'s pawn has just skipped.
    #[must_use]
    pub fn en_passant(mut self, side: Side, target: Square) -> Self {
        self.en_passant[side.index()] = Some(target);
        self
    }

    /// Validates the position and builds the board.
    pub fn build(self) -> Result<Board, BoardError> {
        let mut board = Board::empty();
        let mut occupied = SquareSet::EMPTY;

        for mut piece in self.pieces {
            if occupied.contains(piece.square) {
                return Err(BoardError::Occupied(piece.square));
            }
            if piece.kind == PieceKind::Pawn
                && (piece.square.rank() == 0 || piece.square.rank() == 7)
            {
                return Err(BoardError::PawnOnBackRank(piece.square));
            }
            if let Some(&(_, moved)) = self
                .overrides
                .iter()
                .rev()
                .find(|(sq, _)| *sq == piece.square)
            {
                piece.moved = moved;
            }
            occupied.insert(piece.square);
            board.pieces[piece.side.index()].push(piece);
        }

        if let Some(&(sq, _)) = self
            .overrides
            .iter()
            .find(|(sq, _)| !occupied.contains(*sq))
        {
            return Err(BoardError::NoPieceAt(sq));
        }

        for side in Side::BOTH {
            let kings = board
                .pieces_of(side)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(BoardError::MissingKing(side)),
                1 => {}
                _ => return Err(BoardError::ExtraKing(side)),
            }
        }

        for side in Side::BOTH {
            if let Some(target) = self.en_passant[side.index()] {
                validate_en_passant(&board, side, target)?;
                board.en_passant[side.index()] = Some(target);
            }
        }

        board.side_to_move = self.side_to_move;
        Ok(board)
    }
}

/// The target must be the empty square directly behind one of `side`'s
/// pawns, on the rank a double push skips.
fn validate_en_passant(board: &Board, side: Side, target: Square) -> Result<(), BoardError> {
    let skipped_rank = side.pawn_rank() as i8 + side.pawn_direction();
    let pawn_square = target.offset(0, side.pawn_direction());
    let pawn_ok = pawn_square
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.side == side);

    if target.rank() as i8 != skipped_rank || board.piece_at(target).is_some() || !pawn_ok {
        return Err(BoardError::InvalidEnPassant(target));
    }
    Ok(())
}

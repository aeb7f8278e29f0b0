//! Core value types for the chess rules engine.
//!
//! This crate provides the plain data shared by the engine and its callers:
//! - [`Side`] for the two players
//! - [`Square`] for `(file, rank)` board coordinates
//! - [`PieceKind`] and [`Piece`] for live pieces
//! - [`Move`] for the tagged move variants
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on all of them.

mod mov;
mod piece;
mod side;
mod square;

pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use side::Side;
pub use square::{Square, SquareError};

//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - piece placement, side to move and en passant targets
//! - [`SquareSet`] - 64-bit square sets used for destinations and attacks
//! - Pseudo-legal move generation ([`movegen`]) and attack queries ([`attacks`])
//! - Legal move filtering ([`legality`]) and castling ([`castling`])
//! - Move application ([`apply`])
//! - [`Game`] - the select/move/promote cycle with checkmate and stalemate detection
//!
//! # Architecture
//!
//! Everything except [`apply`] and [`Game`] is a pure function of a borrowed
//! [`Board`]. Legality is decided by playing each candidate on a copy of the
//! board and asking whether the mover's king is attacked afterwards.
//!
//! # Example
//!
//! ```
//! use chessrules_engine::{Game, MoveOutcome, Side, Square};
//!
//! let mut game = Game::new();
//! let e2 = Square::from_name("e2").unwrap();
//! let e4 = Square::from_name("e4").unwrap();
//! game.select(e2, Side::White).unwrap();
//! assert_eq!(game.selected_destinations().len(), 2);
//! let outcome = game.move_to(e4).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Completed(_)));
//! assert_eq!(game.turn(), Some(Side::Black));
//! ```

pub mod apply;
pub mod attacks;
mod board;
pub mod castling;
mod event;
mod game;
pub mod legality;
pub mod movegen;
mod square_set;

pub use board::{Board, BoardBuilder, BoardError};
pub use chessrules_core::{Move, Piece, PieceKind, Side, Square};
pub use event::MoveEvent;
pub use game::{Game, GameError, GameResult, GameState, MoveOutcome};
pub use movegen::perft::{perft, perft_divide};
pub use square_set::SquareSet;

//! Scripted replays of chess games.
//!
//! A replay script ([`config::ReplayScript`]) lists the same inputs a player
//! would give the board: selections, destinations, clicks, promotion choices
//! and forfeits. [`replay::Replay`] feeds them to a
//! [`chessrules_engine::Game`] and folds every completed move into
//! [`stats::GameStats`].

pub mod config;
pub mod output;
pub mod replay;
pub mod stats;

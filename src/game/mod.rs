//! # Chess rules
//! Board state, move generation, game-state classification and notation.

pub mod action;
pub mod bitboard;
pub mod castling_rights;
pub mod colour;
pub mod fen;
mod history;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;
pub mod status;
mod tables;
mod zobrist;

//! # Castellan
//! A chess rules engine and move-search core: board representation, legal move
//! generation, game-state classification, FEN/UCI/SAN notation, and a
//! depth-bounded alpha-beta search.
//!
//! Front ends (an HTTP API, a desktop board) drive the engine through the
//! [`session::Session`] type, which owns one live game and is the sole
//! mutation point.

pub mod game;
pub mod search;
pub mod session;

#[cfg(test)]
mod tests;

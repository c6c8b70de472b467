//! # Game sessions
//!
//! A [`Session`] owns a position, its human-readable move history, and the
//! operations a frontend needs: playing moves by coordinate text, asking the
//! engine to reply, undoing, resetting and querying the game state.

use log::info;
use thiserror::Error;

use crate::{
    game::{
        action::{Move, ParseMoveError, UciMove},
        fen::FenError,
        position::Position,
        square::Square,
        status::{GameStatus, StatusReport},
    },
    search::{self, SearchResult},
};

/// Errors raised when driving a game session.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SessionError {
    #[error("could not parse the move: {0}")]
    InvalidMove(#[from] ParseMoveError),
    #[error("move is not legal in the current position")]
    IllegalMove,
    #[error("the game is over")]
    GameOver,
}

/// Playing strength selector, mapping to a fixed search depth.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}
impl Difficulty {
    /// The search depth this difficulty plays at.
    #[inline]
    pub fn search_depth(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}
impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}
impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            other => Err(format!(
                "unknown difficulty {other:?}, expected easy, medium or hard"
            )),
        }
    }
}

/// A running game of chess.
#[derive(Clone, Debug, Default)]
pub struct Session {
    position: Position,
    san_history: Vec<String>,
}
impl Session {
    /// Starts a session from the standard initial position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an arbitrary FEN position.
    /// # Errors
    /// Returns an error if the FEN string is invalid.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self {
            position: Position::from_fen(fen)?,
            san_history: Vec::new(),
        })
    }

    /// Plays a move given in pure coordinate notation (`e2e4`, `a7a8q`).
    ///
    /// On success, returns the move as understood by the position.
    /// # Errors
    /// Fails if the text cannot be parsed, if the game is already over, or if
    /// the move is not legal. The session is left untouched on failure.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, SessionError> {
        let uci: UciMove = text.parse()?;
        if self.status().is_over() {
            return Err(SessionError::GameOver);
        }
        let mv = self
            .position
            .moves()
            .into_iter()
            .find(|m| m.matches(uci))
            .ok_or(SessionError::IllegalMove)?;
        self.record(mv);
        Ok(mv)
    }

    /// Lets the engine pick and play a move for the side to move.
    /// # Errors
    /// Fails if the game is already over.
    pub fn play_engine_move(&mut self, difficulty: Difficulty) -> Result<Move, SessionError> {
        if self.status().is_over() {
            return Err(SessionError::GameOver);
        }
        let SearchResult { score, best_move } =
            search::search(&mut self.position, difficulty.search_depth());
        // A running game always has a move.
        let mv = best_move.ok_or(SessionError::GameOver)?;
        info!("engine plays {mv} (score {score}, {difficulty})");
        self.record(mv);
        Ok(mv)
    }

    /// Suggests a move for the side to move without playing it.
    pub fn hint(&self, difficulty: Difficulty) -> Option<Move> {
        let mut lookahead = self.position.clone();
        search::search(&mut lookahead, difficulty.search_depth()).best_move
    }

    /// Takes back the last played move. Does nothing on a fresh session.
    pub fn undo(&mut self) {
        if self.san_history.pop().is_some() {
            self.position.unmake()
        }
    }

    /// Abandons the current game and starts over from the initial position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The current position.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The current position as a FEN string.
    pub fn fen(&self) -> String {
        self.position.fen()
    }

    /// The most recently played move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.position.last_move()
    }

    /// The moves played so far, in Standard Algebraic Notation.
    pub fn history(&self) -> &[String] {
        &self.san_history
    }

    /// The full classification of the current position.
    pub fn status(&self) -> GameStatus {
        GameStatus::of(&mut self.position.clone())
    }

    /// A compact status answer for frontends.
    pub fn report(&self) -> StatusReport {
        self.status().into()
    }

    /// The squares the piece on `origin` can legally move to, for move
    /// highlighting. Empty if the square holds no piece of the side to move.
    pub fn legal_destinations(&self, origin: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .position
            .clone()
            .moves()
            .into_iter()
            .filter(|m| m.origin() == origin)
            .map(|m| m.target())
            .collect();
        // The four promotion choices share a destination; generation order
        // keeps equal targets adjacent.
        targets.dedup();
        targets
    }

    fn record(&mut self, mv: Move) {
        self.san_history.push(self.position.san(mv));
        self.position.make_legal(mv);
    }
}

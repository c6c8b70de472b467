//! Classification of positions into ongoing, won and drawn games.

use super::{colour::Colour, position::Position};

/// The result of a game, from white's point of view.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}
impl Outcome {
    /// The colour that won the game, if any.
    #[inline]
    pub fn winner(self) -> Option<Colour> {
        match self {
            Self::WhiteWins => Some(Colour::White),
            Self::BlackWins => Some(Colour::Black),
            _ => None,
        }
    }

    /// Checks if the game has ended.
    #[inline]
    pub fn is_over(self) -> bool {
        self != Self::InProgress
    }
}
impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InProgress => "*",
            Self::WhiteWins => "1-0",
            Self::BlackWins => "0-1",
            Self::Draw => "1/2-1/2",
        })
    }
}

/// The full classification of a position: check state, terminal conditions
/// and game outcome.
///
/// Classification needs the legal move set, which is why [`GameStatus::of`]
/// takes the position mutably. The position is left untouched.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct GameStatus {
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw: bool,
    pub outcome: Outcome,
}
impl GameStatus {
    /// Classifies the given position.
    ///
    /// Checkmate and stalemate take precedence over the move-independent draw
    /// rules: a mating move on the hundredth reversible ply still wins.
    pub fn of(position: &mut Position) -> Self {
        let in_check = position.in_check();
        let no_moves = position.moves().is_empty();
        let checkmate = in_check && no_moves;
        let stalemate = !in_check && no_moves;
        let draw = stalemate || (!checkmate && position.is_draw_by_rule());

        let outcome = if checkmate {
            if position.side_to_move().is_white() {
                Outcome::BlackWins
            } else {
                Outcome::WhiteWins
            }
        } else if draw {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };

        Self {
            in_check,
            checkmate,
            stalemate,
            draw,
            outcome,
        }
    }

    /// Checks if the game has ended.
    #[inline]
    pub fn is_over(self) -> bool {
        self.outcome.is_over()
    }
}

/// A compact answer to "where does the game stand", suitable for frontends.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct StatusReport {
    pub check: bool,
    pub checkmate: bool,
    pub winner: Option<Colour>,
}
impl From<GameStatus> for StatusReport {
    fn from(status: GameStatus) -> Self {
        Self {
            check: status.in_check,
            checkmate: status.checkmate,
            winner: status.outcome.winner(),
        }
    }
}

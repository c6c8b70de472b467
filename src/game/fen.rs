//! # FEN string utilities
//!
//! Forsyth-Edwards Notation is the complete serialization of a board state:
//! six space-separated fields for placement, side to move, castling rights,
//! en passant target, halfmove clock and fullmove number.

use thiserror::Error;

use super::{
    castling_rights::CastlingRights,
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Rank, Square},
};

/// FEN parsing errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("unexpected character at index {index}: {val}")]
    UnexpectedToken { index: usize, val: char },
    #[error("FEN string missing the {0} field")]
    Incomplete(&'static str),
    #[error("found a non-ASCII character")]
    NonAscii,
    #[error("the placement field describes {0} ranks instead of 8")]
    WrongRankCount(usize),
    #[error("rank {0} does not describe exactly 8 files")]
    BadRankWidth(Rank),
    #[error("failed to parse the {0} field")]
    BadField(&'static str),
    #[error("each side must have exactly one king")]
    BadKingCount,
}

/// An owned, decoded FEN record.
///
/// This is the exchange format between text and [`super::position::Position`];
/// it carries no legality information beyond structural validity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub placement: [Option<Piece>; 64],
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove: u16,
}
impl Fen {
    /// Returns the piece kind and colour on a given square if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.placement[square as usize]
    }

    /// Checks that each side has exactly one king.
    pub(crate) fn check_king_count(&self) -> Result<(), FenError> {
        for colour in [Colour::White, Colour::Black] {
            let kings = self
                .placement
                .iter()
                .flatten()
                .filter(|&&(kind, c)| kind == PieceKind::King && c == colour)
                .count();
            if kings != 1 {
                return Err(FenError::BadKingCount);
            }
        }
        Ok(())
    }
}
impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(fen_str: &str) -> Result<Self, Self::Err> {
        if !fen_str.is_ascii() {
            return Err(FenError::NonAscii);
        }

        let mut sections = fen_str.split_ascii_whitespace();

        let pieces_str = sections.next().ok_or(FenError::Incomplete("placement"))?;
        let mut placement = [None; 64];
        let ranks = pieces_str.split('/').collect::<Vec<_>>();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            // FEN writes rank 8 first.
            let rank = unsafe { Rank::from_index_unchecked(7 - i as u8) };
            let mut file = 0u8;
            for (index, c) in rank_str.char_indices() {
                match c {
                    digit @ '1'..='8' => file += digit as u8 - b'0',
                    c => {
                        let kind = PieceKind::from_fen_char(c)
                            .ok_or(FenError::UnexpectedToken { index, val: c })?;
                        let colour = if c.is_ascii_uppercase() {
                            Colour::White
                        } else {
                            Colour::Black
                        };
                        if file >= 8 {
                            return Err(FenError::BadRankWidth(rank));
                        }
                        let square =
                            Square::new(unsafe { super::square::File::from_index_unchecked(file) }, rank);
                        placement[square as usize] = Some((kind, colour));
                        file += 1
                    }
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth(rank));
            }
        }

        let side_to_move = match sections.next().ok_or(FenError::Incomplete("side to move"))? {
            "w" => Colour::White,
            "b" => Colour::Black,
            _ => return Err(FenError::BadField("side to move")),
        };

        let castling_rights = sections
            .next()
            .ok_or(FenError::Incomplete("castling rights"))?
            .parse()
            .map_err(|_| FenError::BadField("castling rights"))?;

        let en_passant = match sections.next().ok_or(FenError::Incomplete("en passant"))? {
            "-" => None,
            s => Some(
                s.parse::<Square>()
                    .map_err(|_| FenError::BadField("en passant"))?,
            ),
        };

        // The clock fields are frequently omitted in test records; default them.
        let halfmove_clock = match sections.next() {
            Some(s) => s.parse().map_err(|_| FenError::BadField("halfmove clock"))?,
            None => 0,
        };
        let fullmove = match sections.next() {
            Some(s) => s
                .parse()
                .map_err(|_| FenError::BadField("fullmove number"))?,
            None => 1,
        };

        Ok(Self {
            placement,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove,
        })
    }
}
impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut skip = 0;
        for (i, square) in Square::squares_fen_iter().enumerate() {
            if let Some((kind, colour)) = self.piece_on(square) {
                if skip != 0 {
                    write!(f, "{skip}")?;
                    skip = 0
                }
                write!(f, "{}", kind.fen_char(colour))?;
            } else {
                skip += 1
            }

            if i % 8 == 7 {
                if skip != 0 {
                    write!(f, "{skip}")?;
                    skip = 0
                }
                if square.rank() != Rank::One {
                    write!(f, "/")?
                }
            }
        }

        write!(
            f,
            " {} {} {} {} {}",
            if self.side_to_move.is_black() { 'b' } else { 'w' },
            self.castling_rights,
            if let Some(ep) = self.en_passant {
                ep.to_string()
            } else {
                String::from("-")
            },
            self.halfmove_clock,
            self.fullmove
        )
    }
}
impl std::fmt::Debug for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// The FEN string of the standard starting position.
pub const INITIAL_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

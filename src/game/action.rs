//! # Moves and their text encodings
//!
//! A [`Move`] is only meaningful for the position it was generated against:
//! the packed flags describe what the move does there, not a globally valid
//! transition.

use thiserror::Error;

use super::{
    colour::Colour,
    piece::PieceKind,
    square::{File, Rank, Square},
};

/// Describes a move using a from-to \<promotion\> approach, with all relevant
/// information packed into 16 bits.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct Move(u16);
impl Move {
    const ORIGIN_MASK: u16 = 0x003F;
    const TARGET_MASK: u16 = Self::ORIGIN_MASK << 6;
    const SPECIAL_0: u16 = 1 << 12;
    const SPECIAL_1: u16 = 1 << 13;
    const CAPTURE: u16 = 1 << 14;
    const PROMOTION: u16 = 1 << 15;
    const PROMOTING_PIECE: u16 = Self::SPECIAL_0 | Self::SPECIAL_1;

    /// Creates a new quiet move.
    #[inline(always)]
    pub const fn new_quiet(origin: Square, target: Square) -> Self {
        Self(origin as u16 | (target as u16) << 6)
    }

    /// Creates a new capture.
    #[inline(always)]
    pub const fn new_capture(origin: Square, target: Square) -> Self {
        Self(origin as u16 | (target as u16) << 6 | Self::CAPTURE)
    }

    /// Creates a new two-square pawn advance.
    #[inline(always)]
    pub const fn new_double_push(origin: Square, target: Square) -> Self {
        Self(origin as u16 | (target as u16) << 6 | Self::SPECIAL_0)
    }

    /// Creates an en passant capture.
    #[inline(always)]
    pub const fn new_en_passant(origin: Square, target: Square) -> Self {
        Self(origin as u16 | (target as u16) << 6 | Self::CAPTURE | Self::SPECIAL_0)
    }

    /// Creates a kingside castle move for the given side.
    #[inline(always)]
    pub const fn new_kingside_castle(side: Colour) -> Self {
        if side.is_black() {
            Self(Square::E8 as u16 | (Square::G8 as u16) << 6 | Self::SPECIAL_1)
        } else {
            Self(Square::E1 as u16 | (Square::G1 as u16) << 6 | Self::SPECIAL_1)
        }
    }

    /// Creates a queenside castle move for the given side.
    #[inline(always)]
    pub const fn new_queenside_castle(side: Colour) -> Self {
        if side.is_black() {
            Self(Square::E8 as u16 | (Square::C8 as u16) << 6 | Self::SPECIAL_0 | Self::SPECIAL_1)
        } else {
            Self(Square::E1 as u16 | (Square::C1 as u16) << 6 | Self::SPECIAL_0 | Self::SPECIAL_1)
        }
    }

    /// Creates a promoting move.
    pub const fn new_promotion(origin: Square, target: Square, promoting_to: PieceKind) -> Self {
        Self(
            origin as u16
                | (target as u16) << 6
                | Self::PROMOTION
                | (promoting_to as u16 - PieceKind::Knight as u16) << 12,
        )
    }

    /// Creates a promoting move with capture.
    pub const fn new_promotion_capture(
        origin: Square,
        target: Square,
        promoting_to: PieceKind,
    ) -> Self {
        Self(Self::new_promotion(origin, target, promoting_to).0 | Self::CAPTURE)
    }

    /// The four promotion choices from a pawn push.
    #[inline(always)]
    pub const fn new_promotions(origin: Square, target: Square) -> [Self; 4] {
        [
            Self::new_promotion(origin, target, PieceKind::Knight),
            Self::new_promotion(origin, target, PieceKind::Bishop),
            Self::new_promotion(origin, target, PieceKind::Rook),
            Self::new_promotion(origin, target, PieceKind::Queen),
        ]
    }

    /// The four promotion choices from a pawn capture.
    #[inline(always)]
    pub const fn new_promotion_captures(origin: Square, target: Square) -> [Self; 4] {
        [
            Self::new_promotion_capture(origin, target, PieceKind::Knight),
            Self::new_promotion_capture(origin, target, PieceKind::Bishop),
            Self::new_promotion_capture(origin, target, PieceKind::Rook),
            Self::new_promotion_capture(origin, target, PieceKind::Queen),
        ]
    }

    /// Returns the square the move originates from.
    #[inline(always)]
    pub const fn origin(self) -> Square {
        unsafe { Square::from_index_unchecked((self.0 & Self::ORIGIN_MASK) as u8) }
    }
    /// Returns the square the move targets.
    #[inline(always)]
    pub const fn target(self) -> Square {
        unsafe { Square::from_index_unchecked(((self.0 & Self::TARGET_MASK) >> 6) as u8) }
    }

    /// Checks if this move is a capture.
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        self.0 & Self::CAPTURE != 0
    }

    /// Checks if this move is a promotion, and returns the promotion target if so.
    #[inline(always)]
    pub const fn promotion_target(self) -> Option<PieceKind> {
        if self.0 & Self::PROMOTION != 0 {
            PieceKind::from_index(((self.0 & Self::PROMOTING_PIECE) >> 12) as u8 + 1)
        } else {
            None
        }
    }

    /// Checks if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(self) -> bool {
        self.0 & (Self::PROMOTION | Self::CAPTURE | Self::PROMOTING_PIECE)
            == Self::CAPTURE | Self::SPECIAL_0
    }

    /// Checks if this move is a two-square pawn advance.
    #[inline(always)]
    pub const fn is_double_push(self) -> bool {
        self.0 >> 12 == Self::SPECIAL_0 >> 12
    }

    /// Checks if this move encodes a kingside castle.
    pub const fn is_kingside_castle(self) -> bool {
        self.0 >> 12 == Self::SPECIAL_1 >> 12
    }

    /// Checks if this move encodes a queenside castle.
    pub const fn is_queenside_castle(self) -> bool {
        self.0 >> 12 == (Self::SPECIAL_0 | Self::SPECIAL_1) >> 12
    }

    /// Checks if this move matches a pure-coordinate description.
    pub fn matches(self, uci: UciMove) -> bool {
        self.origin() == uci.from
            && self.target() == uci.to
            && self.promotion_target() == uci.promoting_to
    }
}
/// Moves display as UCI text.
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin(), self.target())?;
        if let Some(kind) = self.promotion_target() {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}

/// Error raised when parsing malformed UCI move text.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("malformed UCI move text")]
pub struct ParseMoveError;

/// Pure coordinate notation move, as used by the UCI wire format.
///
/// These can be matched against a position's legal moves to convert them into
/// usable [`Move`] values.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promoting_to: Option<PieceKind>,
}
impl std::fmt::Display for UciMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promoting_to {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}
impl std::str::FromStr for UciMove {
    type Err = ParseMoveError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(ParseMoveError);
        }
        let from = s[0..2].parse().map_err(|_| ParseMoveError)?;
        let to = s[2..4].parse().map_err(|_| ParseMoveError)?;
        let promoting_to = match &s[4..] {
            "" => None,
            "n" => Some(PieceKind::Knight),
            "b" => Some(PieceKind::Bishop),
            "r" => Some(PieceKind::Rook),
            "q" => Some(PieceKind::Queen),
            _ => return Err(ParseMoveError),
        };

        Ok(Self {
            from,
            to,
            promoting_to,
        })
    }
}

/// Standard Algebraic Notation encoded move, for human-readable move history.
pub enum SanMove {
    PawnMove {
        origin_file: File,
        is_capture: bool,
        target: Square,
        promoting_to: Option<PieceKind>,
    },
    PieceMove {
        moving_piece: PieceKind,
        origin_file: Option<File>,
        origin_rank: Option<Rank>,
        is_capture: bool,
        target: Square,
    },
    KingsideCastle,
    QueensideCastle,
}
impl std::fmt::Display for SanMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::PawnMove {
                origin_file,
                is_capture,
                target,
                promoting_to,
            } => {
                if is_capture {
                    write!(f, "{origin_file}x")?
                }
                write!(f, "{target}")?;
                if let Some(kind) = promoting_to {
                    write!(f, "={}", kind.to_string().to_uppercase())?
                }
                Ok(())
            }
            Self::PieceMove {
                moving_piece,
                origin_file,
                origin_rank,
                is_capture,
                target,
            } => {
                write!(f, "{}", moving_piece.to_string().to_uppercase())?;
                if let Some(file) = origin_file {
                    write!(f, "{file}")?
                }
                if let Some(rank) = origin_rank {
                    write!(f, "{rank}")?
                }
                if is_capture {
                    write!(f, "x")?
                }
                write!(f, "{target}")
            }
            Self::KingsideCastle => write!(f, "O-O"),
            Self::QueensideCastle => write!(f, "O-O-O"),
        }
    }
}

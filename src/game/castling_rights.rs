//! # Representation of castling rights

use std::str::FromStr;

use super::{colour::Colour, zobrist};

/// The four independent castling rights, packed in a byte.
///
/// A right is cleared permanently once the relevant king or rook moves or the
/// rook is captured.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any side.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Checks if no one can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::KINGSIDE_BLACK != 0
        } else {
            self.0 & Self::KINGSIDE_WHITE != 0
        }
    }
    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::QUEENSIDE_BLACK != 0
        } else {
            self.0 & Self::QUEENSIDE_WHITE != 0
        }
    }

    /// Allows kingside castling for a given side.
    #[inline(always)]
    pub fn allow_kingside_castle(&mut self, colour: Colour) {
        self.0 |= if colour.is_black() {
            Self::KINGSIDE_BLACK
        } else {
            Self::KINGSIDE_WHITE
        }
    }
    /// Allows queenside castling for a given side.
    #[inline(always)]
    pub fn allow_queenside_castle(&mut self, colour: Colour) {
        self.0 |= if colour.is_black() {
            Self::QUEENSIDE_BLACK
        } else {
            Self::QUEENSIDE_WHITE
        }
    }

    /// Disallows kingside castling for a given side.
    #[inline(always)]
    pub fn disallow_kingside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::KINGSIDE_BLACK
        } else {
            !Self::KINGSIDE_WHITE
        }
    }
    /// Disallows queenside castling for a given side.
    #[inline(always)]
    pub fn disallow_queenside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::QUEENSIDE_BLACK
        } else {
            !Self::QUEENSIDE_WHITE
        }
    }
    /// Disallows castling entirely for a given side.
    pub fn disallow(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !(Self::QUEENSIDE_BLACK | Self::KINGSIDE_BLACK)
        } else {
            !(Self::QUEENSIDE_WHITE | Self::KINGSIDE_WHITE)
        }
    }

    /// Returns the Zobrist hash of these castling rights.
    #[inline(always)]
    pub fn zobrist_hash(self) -> u64 {
        let mut hash = 0;
        for i in 0..4 {
            if self.0 & (1 << i) != 0 {
                hash ^= zobrist::castling_right_hash(i)
            }
        }
        hash
    }
}
impl FromStr for CastlingRights {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::none());
        }
        let mut rights = Self::none();
        for c in s.chars() {
            match c {
                'k' => rights.allow_kingside_castle(Colour::Black),
                'q' => rights.allow_queenside_castle(Colour::Black),
                'K' => rights.allow_kingside_castle(Colour::White),
                'Q' => rights.allow_queenside_castle(Colour::White),
                _ => return Err(()),
            }
        }
        Ok(rights)
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fen_round_trip() {
        for s in ["KQkq", "-", "Kq", "k"] {
            let rights: CastlingRights = s.parse().unwrap();
            assert_eq!(rights.to_string(), s);
        }
        assert!("KZ".parse::<CastlingRights>().is_err());
    }

    #[test]
    fn rights_are_cleared_independently() {
        let mut rights = CastlingRights::full();
        rights.disallow_kingside_castle(Colour::White);
        assert!(!rights.kingside_castle_allowed(Colour::White));
        assert!(rights.queenside_castle_allowed(Colour::White));
        assert!(rights.kingside_castle_allowed(Colour::Black));
        rights.disallow(Colour::Black);
        assert!(!rights.kingside_castle_allowed(Colour::Black));
        assert!(!rights.queenside_castle_allowed(Colour::Black));
        assert!(rights.queenside_castle_allowed(Colour::White));
    }
}

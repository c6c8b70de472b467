//! Enumerations of chessboard accessing constants, such as files, ranks and squares.
use super::bitboard::Bitboard;
use super::colour::Colour;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    /// A file from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(unsafe { Self::from_index_unchecked(index) })
        } else {
            None
        }
    }

    /// A file from a given index.
    /// # Safety
    /// If the index is more than 7, results in undefined behavior.
    #[inline]
    pub unsafe fn from_index_unchecked(index: u8) -> Self {
        std::mem::transmute(index)
    }
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}
impl std::str::FromStr for File {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'a'..=b'h'] => Ok(unsafe { Self::from_index_unchecked(c - b'a') }),
            _ => Err(()),
        }
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    /// A rank from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(unsafe { Self::from_index_unchecked(index) })
        } else {
            None
        }
    }

    /// A rank from a given index.
    /// # Safety
    /// If the index is more than 7, results in undefined behavior.
    #[inline]
    pub unsafe fn from_index_unchecked(index: u8) -> Self {
        std::mem::transmute(index)
    }

    /// The rank pawns of the given colour start on.
    #[inline]
    pub const fn pawn_rank(colour: Colour) -> Self {
        if colour.is_black() {
            Self::Seven
        } else {
            Self::Two
        }
    }

    /// The rank pawns of the given colour promote on.
    #[inline]
    pub const fn promotion_rank(colour: Colour) -> Self {
        if colour.is_black() {
            Self::One
        } else {
            Self::Eight
        }
    }

    /// The rank an en passant capture by the given colour lands on.
    #[inline]
    pub const fn en_passant_rank(colour: Colour) -> Self {
        if colour.is_black() {
            Self::Three
        } else {
            Self::Six
        }
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}
impl std::str::FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'1'..=b'8'] => Ok(unsafe { Self::from_index_unchecked(c - b'1') }),
            _ => Err(()),
        }
    }
}

/// General square indexing for 8x8 boards, ordered A1..H8 rank by rank.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}
impl Square {
    /// Instantiates a new square based on file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { std::mem::transmute((rank as u8) << 3 | (file as u8)) }
    }

    /// Instantiates a new square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(unsafe { Self::from_index_unchecked(index) })
        } else {
            None
        }
    }

    /// Instantiates a new square from its index.
    /// # Safety
    /// If the index is more than 63, causes undefined behavior.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        std::mem::transmute(index)
    }

    /// Returns the rank of the square.
    #[inline]
    pub const fn rank(self) -> Rank {
        unsafe { std::mem::transmute((self as u8) >> 3) }
    }
    /// Returns the file of the square.
    #[inline]
    pub const fn file(self) -> File {
        unsafe { std::mem::transmute((self as u8) & 7) }
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go off the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let file = self.file() as i8 + delta.file_offset();
        let rank = self.rank() as i8 + delta.rank_offset();
        if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
            Some(unsafe { Self::from_index_unchecked((rank << 3 | file) as u8) })
        } else {
            None
        }
    }

    /// An iterator over all squares, ordered from A1 to H8.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        (0..64).map(|i| unsafe { Square::from_index_unchecked(i) })
    }

    /// An iterator over all squares, ordered in big-endian rank/little-endian
    /// file (the order FEN placement fields are written in).
    pub fn squares_fen_iter() -> impl Iterator<Item = Self> {
        (0..8).rev().flat_map(|rank| {
            (0..8).map(move |file| unsafe {
                let rank = Rank::from_index_unchecked(rank);
                let file = File::from_index_unchecked(file);
                Square::new(file, rank)
            })
        })
    }

    /// Returns a bitboard containing only this square.
    #[inline]
    pub(crate) const fn bitboard(self) -> Bitboard {
        Bitboard(1 << (self as u8))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
impl std::str::FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() != 2 {
            return Err(());
        }
        Ok(Self::new(s[0..1].parse()?, s[1..2].parse()?))
    }
}

/// Deltas represent directions in which pieces can move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Delta {
    North,
    South,
    East,
    West,

    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,

    KnightNorthEast,
    KnightNorthWest,
    KnightSouthEast,
    KnightSouthWest,
    KnightEastNorth,
    KnightWestNorth,
    KnightEastSouth,
    KnightWestSouth,
}
impl Delta {
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::KnightNorthEast,
        Self::KnightNorthWest,
        Self::KnightSouthEast,
        Self::KnightSouthWest,
        Self::KnightEastNorth,
        Self::KnightWestNorth,
        Self::KnightEastSouth,
        Self::KnightWestSouth,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];
    pub const BISHOP_DELTAS: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];
    pub const ROOK_DELTAS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The direction pawns of a given colour advance in.
    #[inline]
    pub const fn pawn_push(colour: Colour) -> Self {
        if colour.is_black() {
            Self::South
        } else {
            Self::North
        }
    }

    /// The two directions pawns of a given colour capture in.
    #[inline]
    pub const fn pawn_captures(colour: Colour) -> [Self; 2] {
        if colour.is_black() {
            [Self::SouthWest, Self::SouthEast]
        } else {
            [Self::NorthWest, Self::NorthEast]
        }
    }

    #[inline]
    const fn file_offset(self) -> i8 {
        match self {
            Self::North | Self::South => 0,
            Self::East | Self::NorthEast | Self::SouthEast => 1,
            Self::West | Self::NorthWest | Self::SouthWest => -1,
            Self::KnightNorthEast | Self::KnightSouthEast => 1,
            Self::KnightNorthWest | Self::KnightSouthWest => -1,
            Self::KnightEastNorth | Self::KnightEastSouth => 2,
            Self::KnightWestNorth | Self::KnightWestSouth => -2,
        }
    }

    #[inline]
    const fn rank_offset(self) -> i8 {
        match self {
            Self::East | Self::West => 0,
            Self::North | Self::NorthEast | Self::NorthWest => 1,
            Self::South | Self::SouthEast | Self::SouthWest => -1,
            Self::KnightNorthEast | Self::KnightNorthWest => 2,
            Self::KnightSouthEast | Self::KnightSouthWest => -2,
            Self::KnightEastNorth | Self::KnightWestNorth => 1,
            Self::KnightEastSouth | Self::KnightWestSouth => -1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn square_coordinates() {
        assert_eq!(Square::new(File::E, Rank::Four), Square::E4);
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::Four);
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        assert_eq!(Square::H8.to_string(), "h8");
        assert!("e9".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
    }

    #[test]
    fn translations_stay_on_board() {
        assert_eq!(Square::E4.translate(Delta::North), Some(Square::E5));
        assert_eq!(Square::A1.translate(Delta::West), None);
        assert_eq!(Square::A1.translate(Delta::SouthEast), None);
        assert_eq!(Square::H8.translate(Delta::KnightEastNorth), None);
        assert_eq!(
            Square::G1.translate(Delta::KnightWestNorth),
            Some(Square::E2)
        );
    }
}

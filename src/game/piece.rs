//! Piece types encoding.

use super::colour::Colour;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

/// Complete set of information for identifying a piece.
pub type Piece = (PieceKind, Colour);

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King.
/// Usually paired with the colour of the piece in the tuple type [`Piece`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// A piece kind from its index.
    ///
    /// Fails if the index is more than 5.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => Self::Pawn,
            1 => Self::Knight,
            2 => Self::Bishop,
            3 => Self::Rook,
            4 => Self::Queen,
            5 => Self::King,
            _ => return None,
        })
    }

    /// The piece kind denoted by a FEN letter, ignoring case.
    pub fn from_fen_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_lowercase() {
            'p' => Self::Pawn,
            'n' => Self::Knight,
            'b' => Self::Bishop,
            'r' => Self::Rook,
            'q' => Self::Queen,
            'k' => Self::King,
            _ => return None,
        })
    }

    /// The FEN letter for a piece of this kind and colour (uppercase for white).
    pub fn fen_char(self, colour: Colour) -> char {
        let c = match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        };
        if colour.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Iterator over all piece kinds except the king.
    pub fn iter_all_but_king() -> impl Iterator<Item = Self> {
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ]
        .into_iter()
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen_char(Colour::Black))
    }
}

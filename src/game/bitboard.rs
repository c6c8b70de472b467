//! Bitboards are an efficient way to represent sets of up to 64 squares,
//! and are used extensively in the board representation.

use std::iter::FusedIterator;

use super::square::Square;

/// Bitboards are data structures used to efficiently represent sets of squares.
///
/// They are augmented u64 values.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub(crate) u64);
impl Bitboard {
    /// The set of dark squares.
    pub(crate) const DARK_SQUARES: Self = Self(0xAA55_AA55_AA55_AA55);

    /// Returns an empty bitboard.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Checks if a bitboard is empty.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks if a bitboard has one or more bits set.
    #[inline(always)]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Checks if a given square is set on the bitboard.
    #[inline(always)]
    pub const fn is_set(self, square: Square) -> bool {
        self.intersects(square.bitboard())
    }

    /// Checks if two bitboards share at least one set square.
    #[inline(always)]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Checks if a bitboard has only one bit set.
    #[inline(always)]
    pub const fn is_single_populated(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Returns the cardinality of the bitboard (i.e. how many squares are set).
    #[inline(always)]
    pub const fn cardinality(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Returns the LS1B of the bitboard as a square.
    ///
    /// If the bitboard is empty, returns `None`.
    #[inline(always)]
    pub const fn lowest_set_square(self) -> Option<Square> {
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    /// Pops the LS1B of the bitboard and returns it as a square.
    ///
    /// If the bitboard is empty, returns `None`.
    #[inline(always)]
    pub fn pop_lowest_set_square(&mut self) -> Option<Square> {
        let square = self.lowest_set_square();
        self.0 &= self.0.wrapping_sub(1);
        square
    }
}
impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in Square::squares_fen_iter().enumerate() {
            if i % 8 == 0 && i != 0 {
                writeln!(f)?
            }
            write!(f, "{} ", if self.is_set(square) { 'x' } else { '.' })?
        }
        Ok(())
    }
}
impl From<u64> for Bitboard {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
impl From<Bitboard> for u64 {
    fn from(value: Bitboard) -> Self {
        value.0
    }
}
impl std::ops::BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
impl std::ops::BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
impl std::ops::BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl std::ops::BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}
impl std::ops::BitXor for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}
impl std::ops::BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}
impl std::ops::Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}
/// Iterating a bitboard yields its set squares in ascending order.
impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lowest_set_square()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cardinality = self.cardinality() as usize;
        (cardinality, Some(cardinality))
    }
}
impl ExactSizeIterator for Bitboard {}
impl FusedIterator for Bitboard {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iteration_is_ascending() {
        let bb = Square::A1.bitboard() | Square::E4.bitboard() | Square::H8.bitboard();
        assert_eq!(
            bb.collect::<Vec<_>>(),
            vec![Square::A1, Square::E4, Square::H8]
        );
    }

    #[test]
    fn cardinality_and_membership() {
        let mut bb = Bitboard::empty();
        assert!(bb.is_empty());
        bb |= Square::C3.bitboard();
        bb |= Square::C3.bitboard();
        assert_eq!(bb.cardinality(), 1);
        assert!(bb.is_set(Square::C3));
        assert!(!bb.is_set(Square::C4));
        assert!(bb.is_single_populated());
    }

    #[test]
    fn dark_squares_mask() {
        assert_eq!(Bitboard::DARK_SQUARES.cardinality(), 32);
        assert!(Bitboard::DARK_SQUARES.is_set(Square::A1));
        assert!(!Bitboard::DARK_SQUARES.is_set(Square::H1));
    }
}

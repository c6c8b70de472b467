//! Precomputed attack tables for leapers and ray walks for sliders.

use std::sync::LazyLock;

use super::{
    bitboard::Bitboard,
    colour::Colour,
    square::{Delta, Square},
};

fn leaper_table(deltas: &[Delta]) -> [Bitboard; 64] {
    let mut table = [Bitboard::empty(); 64];
    for square in Square::squares_iter() {
        for &delta in deltas {
            if let Some(target) = square.translate(delta) {
                table[square as usize] |= target.bitboard()
            }
        }
    }
    table
}

static KNIGHT_ATTACKS: LazyLock<[Bitboard; 64]> =
    LazyLock::new(|| leaper_table(&Delta::KNIGHT_DELTAS));
static KING_ATTACKS: LazyLock<[Bitboard; 64]> =
    LazyLock::new(|| leaper_table(&Delta::QUEEN_DELTAS));
static WHITE_PAWN_ATTACKS: LazyLock<[Bitboard; 64]> =
    LazyLock::new(|| leaper_table(&Delta::pawn_captures(Colour::White)));
static BLACK_PAWN_ATTACKS: LazyLock<[Bitboard; 64]> =
    LazyLock::new(|| leaper_table(&Delta::pawn_captures(Colour::Black)));

/// The set of squares a knight on `square` attacks.
#[inline]
pub fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// The set of squares a king on `square` attacks.
#[inline]
pub fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

/// The set of squares a pawn of the given colour on `square` attacks.
#[inline]
pub fn pawn_attacks(square: Square, colour: Colour) -> Bitboard {
    if colour.is_black() {
        BLACK_PAWN_ATTACKS[square as usize]
    } else {
        WHITE_PAWN_ATTACKS[square as usize]
    }
}

/// Walks rays in the given directions until hitting a blocker, which is
/// included in the attack set.
fn slider_attacks(square: Square, occupancy: Bitboard, deltas: &[Delta]) -> Bitboard {
    let mut attacks = Bitboard::empty();
    for &delta in deltas {
        let mut current = square;
        while let Some(next) = current.translate(delta) {
            attacks |= next.bitboard();
            if occupancy.is_set(next) {
                break;
            }
            current = next
        }
    }
    attacks
}

/// The set of squares a bishop on `square` attacks, given board occupancy.
#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(square, occupancy, &Delta::BISHOP_DELTAS)
}

/// The set of squares a rook on `square` attacks, given board occupancy.
#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(square, occupancy, &Delta::ROOK_DELTAS)
}

/// The set of squares a queen on `square` attacks, given board occupancy.
#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

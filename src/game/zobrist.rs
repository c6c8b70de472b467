//! # Zobrist hashing keys and utilities
//!
//! The hash covers piece placement, side to move, castling rights and the
//! en passant file, which is exactly the equality the threefold repetition
//! rule is defined over.

use std::sync::LazyLock;

use rand::{thread_rng, Rng};

use super::{
    colour::{Colour, NUM_COLOURS},
    piece::{PieceKind, NUM_PIECES},
    square::{File, Square},
};

// One key per (colour, piece, square), one for the side to move, four for
// castling rights and eight for the en passant file.
const PIECE_KEYS: usize = NUM_COLOURS * NUM_PIECES * 64;
const SIDE_TO_MOVE_OFFSET: usize = PIECE_KEYS;
const CASTLING_RIGHTS_OFFSET: usize = SIDE_TO_MOVE_OFFSET + 1;
const EN_PASSANT_OFFSET: usize = CASTLING_RIGHTS_OFFSET + 4;

static ZOBRIST_KEYS: LazyLock<[u64; EN_PASSANT_OFFSET + 8]> = LazyLock::new(|| {
    let mut keys = [0; EN_PASSANT_OFFSET + 8];
    for key in &mut keys {
        *key = thread_rng().gen()
    }
    keys
});

#[inline(always)]
pub fn piece_hash(kind: PieceKind, colour: Colour, square: Square) -> u64 {
    ZOBRIST_KEYS[(colour as usize * NUM_PIECES + kind as usize) * 64 + square as usize]
}

#[inline(always)]
pub fn side_to_move_hash() -> u64 {
    ZOBRIST_KEYS[SIDE_TO_MOVE_OFFSET]
}

/// One key per castling right, indexed 0..4 in the order of the bits of
/// [`super::castling_rights::CastlingRights`].
#[inline(always)]
pub fn castling_right_hash(right_index: usize) -> u64 {
    ZOBRIST_KEYS[CASTLING_RIGHTS_OFFSET + right_index]
}

#[inline(always)]
pub fn en_passant_file_hash(file: File) -> u64 {
    ZOBRIST_KEYS[EN_PASSANT_OFFSET + file as usize]
}

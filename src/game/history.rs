use super::{
    action::Move, castling_rights::CastlingRights, piece::PieceKind, square::File,
};

/// Records the information that is lost when making a move, so that
/// [`super::position::Position::unmake`] can restore the exact prior state.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct HistoryEntry {
    pub played: Move,
    pub captured: Option<PieceKind>,
    pub castling_rights: CastlingRights,
    pub halfmove_clock: u16,
    pub fullmove: u16,
    pub en_passant_file: Option<File>,
    pub hash: u64,
}

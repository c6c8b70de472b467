//! Main API to represent and interact with a chess position.
//!
//! This includes making, unmaking and generating moves, defining positions
//! from FEN strings, and the pure queries (attacks, check, draw rules) that
//! the classifier and search build on.

use thiserror::Error;

use super::{
    action::{Move, SanMove},
    bitboard::Bitboard,
    castling_rights::CastlingRights,
    colour::{Colour, NUM_COLOURS},
    fen::{Fen, FenError, INITIAL_POSITION_FEN},
    history::HistoryEntry,
    piece::{Piece, PieceKind, NUM_PIECES},
    square::{Delta, File, Rank, Square},
    tables::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks},
    zobrist,
};

/// Legal move storage. 256 exceeds the move count of any reachable position.
pub type MoveList = heapless::Vec<Move, 256>;

/// Error returned when trying to apply a move that is not legal in the
/// current position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("move is not legal in this position")]
pub struct IllegalMoveError;

/// Represents a valid chess position and defines an API to interact with said
/// position (making, unmaking and generating moves, etc).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    // 8x8 array to find which piece kind sits on which square.
    pieces: [Option<PieceKind>; 64],
    // Bitboards indexed by piece kind.
    piece_bitboards: [Bitboard; NUM_PIECES],
    // Occupancy, by colour and overall.
    colour_bitboards: [Bitboard; NUM_COLOURS],
    occupancy: Bitboard,

    // Metadata
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant_file: Option<File>,
    halfmove_clock: u16,
    fullmove: u16,
    hash: u64,
    history: Vec<HistoryEntry>,
}
impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}
impl Position {
    /// The initial position of chess.
    pub fn initial() -> Self {
        match Self::from_fen(INITIAL_POSITION_FEN) {
            Ok(position) => position,
            // The initial position FEN is a crate constant.
            Err(_) => unreachable!(),
        }
    }

    /// Creates a position from a FEN string.
    /// # Errors
    /// This function returns an error if the FEN string passed is invalid or
    /// badly formatted, or if either side does not have exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen: Fen = fen.parse()?;
        fen.check_king_count()?;

        let mut position = Self {
            pieces: [None; 64],
            piece_bitboards: [Bitboard::empty(); NUM_PIECES],
            colour_bitboards: [Bitboard::empty(); NUM_COLOURS],
            occupancy: Bitboard::empty(),

            side_to_move: fen.side_to_move,
            castling_rights: fen.castling_rights,
            en_passant_file: fen.en_passant.map(|square| square.file()),
            halfmove_clock: fen.halfmove_clock,
            fullmove: fen.fullmove,
            hash: 0,
            history: Vec::new(),
        };
        for square in Square::squares_iter() {
            if let Some((kind, colour)) = fen.piece_on(square) {
                position.put_piece(kind, colour, square)
            }
        }
        position.rehash();

        Ok(position)
    }

    /// Returns a FEN string describing the position.
    pub fn fen(&self) -> String {
        let mut placement = [None; 64];
        for square in Square::squares_iter() {
            placement[square as usize] = self.piece_on(square);
        }
        Fen {
            placement,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant_target(),
            halfmove_clock: self.halfmove_clock,
            fullmove: self.fullmove,
        }
        .to_string()
    }

    /// Returns the piece kind and colour sitting on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces[square as usize].map(|kind| {
            (
                kind,
                if self.colour_bitboards[Colour::Black as usize].is_set(square) {
                    Colour::Black
                } else {
                    Colour::White
                },
            )
        })
    }

    /// Returns the current side to move.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the current castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The en passant target square, if the last move was a two-square pawn
    /// advance.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_file
            .map(|file| Square::new(file, Rank::en_passant_rank(self.side_to_move)))
    }

    /// Number of plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// The fullmove number, starting at 1 and incremented after black's move.
    #[inline]
    pub fn fullmove(&self) -> u16 {
        self.fullmove
    }

    /// Number of moves played since this position was created.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The most recently played move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.played)
    }

    /// The Zobrist hash of the position (placement, side to move, castling
    /// rights and en passant file).
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The set of squares occupied by pieces of the given kind.
    #[inline]
    pub fn piece_bitboard(&self, kind: PieceKind) -> Bitboard {
        self.piece_bitboards[kind as usize]
    }

    /// The set of squares occupied by pieces of the given colour.
    #[inline]
    pub fn colour_bitboard(&self, colour: Colour) -> Bitboard {
        self.colour_bitboards[colour as usize]
    }

    /// The square the king of the given colour sits on.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Square {
        (self.piece_bitboards[PieceKind::King as usize] & self.colour_bitboards[colour as usize])
            .lowest_set_square()
            .expect("each side has exactly one king")
    }

    /// Checks if the given square is attacked by any piece of the given colour.
    pub fn is_attacked(&self, square: Square, by: Colour) -> bool {
        let them = self.colour_bitboards[by as usize];

        // Leapers: a pawn of colour `by` attacks `square` exactly when a pawn
        // of the opposite colour on `square` would attack its square.
        if (pawn_attacks(square, by.inverse()) & self.piece_bitboards[PieceKind::Pawn as usize]
            & them)
            .is_not_empty()
        {
            return true;
        }
        if (knight_attacks(square) & self.piece_bitboards[PieceKind::Knight as usize] & them)
            .is_not_empty()
        {
            return true;
        }
        if (king_attacks(square) & self.piece_bitboards[PieceKind::King as usize] & them)
            .is_not_empty()
        {
            return true;
        }

        // Sliders.
        let queens = self.piece_bitboards[PieceKind::Queen as usize];
        let diagonals = (self.piece_bitboards[PieceKind::Bishop as usize] | queens) & them;
        if (bishop_attacks(square, self.occupancy) & diagonals).is_not_empty() {
            return true;
        }
        let orthogonals = (self.piece_bitboards[PieceKind::Rook as usize] | queens) & them;
        (rook_attacks(square, self.occupancy) & orthogonals).is_not_empty()
    }

    /// Checks if the side to move's king is attacked.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_attacked(
            self.king_square(self.side_to_move),
            self.side_to_move.inverse(),
        )
    }

    /// Generates the set of fully legal moves for the side to move, in a
    /// stable order (ascending origin square, then target square).
    ///
    /// An empty result is not an error; it signals checkmate or stalemate.
    pub fn moves(&mut self) -> MoveList {
        let us = self.side_to_move;
        let mut legal = MoveList::new();
        for mv in self.pseudo_legal_moves() {
            self.make_legal(mv);
            let safe = !self.is_attacked(self.king_square(us), us.inverse());
            self.unmake();
            if safe {
                let _ = legal.push(mv);
            }
        }
        legal
    }

    /// Generates moves obeying piece movement patterns, without checking
    /// whether they leave the mover's own king attacked.
    fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move;
        let own = self.colour_bitboards[us as usize];
        let them = self.colour_bitboards[us.inverse() as usize];
        let push = Delta::pawn_push(us);
        let promotion_rank = Rank::promotion_rank(us);
        let ep_target = self.en_passant_target();

        for origin in own {
            let Some(kind) = self.pieces[origin as usize] else {
                continue;
            };
            match kind {
                PieceKind::Pawn => {
                    if let Some(target) = origin.translate(push) {
                        if !self.occupancy.is_set(target) {
                            if target.rank() == promotion_rank {
                                for mv in Move::new_promotions(origin, target) {
                                    let _ = moves.push(mv);
                                }
                            } else {
                                let _ = moves.push(Move::new_quiet(origin, target));
                                if origin.rank() == Rank::pawn_rank(us) {
                                    if let Some(double) = target.translate(push) {
                                        if !self.occupancy.is_set(double) {
                                            let _ =
                                                moves.push(Move::new_double_push(origin, double));
                                        }
                                    }
                                }
                            }
                        }
                    }
                    for delta in Delta::pawn_captures(us) {
                        let Some(target) = origin.translate(delta) else {
                            continue;
                        };
                        if them.is_set(target) {
                            if target.rank() == promotion_rank {
                                for mv in Move::new_promotion_captures(origin, target) {
                                    let _ = moves.push(mv);
                                }
                            } else {
                                let _ = moves.push(Move::new_capture(origin, target));
                            }
                        } else if Some(target) == ep_target {
                            let _ = moves.push(Move::new_en_passant(origin, target));
                        }
                    }
                }
                PieceKind::Knight => {
                    self.push_attacks(origin, knight_attacks(origin), own, them, &mut moves)
                }
                PieceKind::Bishop => self.push_attacks(
                    origin,
                    bishop_attacks(origin, self.occupancy),
                    own,
                    them,
                    &mut moves,
                ),
                PieceKind::Rook => self.push_attacks(
                    origin,
                    rook_attacks(origin, self.occupancy),
                    own,
                    them,
                    &mut moves,
                ),
                PieceKind::Queen => self.push_attacks(
                    origin,
                    queen_attacks(origin, self.occupancy),
                    own,
                    them,
                    &mut moves,
                ),
                PieceKind::King => {
                    self.push_attacks(origin, king_attacks(origin), own, them, &mut moves);
                    self.push_castles(origin, &mut moves);
                }
            }
        }
        moves
    }

    fn push_attacks(
        &self,
        origin: Square,
        attacks: Bitboard,
        own: Bitboard,
        them: Bitboard,
        moves: &mut MoveList,
    ) {
        for target in attacks & !own {
            let _ = moves.push(if them.is_set(target) {
                Move::new_capture(origin, target)
            } else {
                Move::new_quiet(origin, target)
            });
        }
    }

    /// Castling is generated fully legally: the right must be held, king and
    /// rook must be on their original squares, the squares between them empty,
    /// and the king may not castle out of, through or into check.
    fn push_castles(&self, origin: Square, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them = us.inverse();
        let own = self.colour_bitboards[us as usize];
        let back_rank = if us.is_black() { Rank::Eight } else { Rank::One };
        let home = Square::new(File::E, back_rank);
        if origin != home {
            return;
        }

        let rook_on = |file: File| {
            let square = Square::new(file, back_rank);
            self.pieces[square as usize] == Some(PieceKind::Rook) && own.is_set(square)
        };
        let empty = |file: File| !self.occupancy.is_set(Square::new(file, back_rank));
        let safe = |file: File| !self.is_attacked(Square::new(file, back_rank), them);

        if self.castling_rights.kingside_castle_allowed(us)
            && rook_on(File::H)
            && empty(File::F)
            && empty(File::G)
            && safe(File::E)
            && safe(File::F)
            && safe(File::G)
        {
            let _ = moves.push(Move::new_kingside_castle(us));
        }
        if self.castling_rights.queenside_castle_allowed(us)
            && rook_on(File::A)
            && empty(File::B)
            && empty(File::C)
            && empty(File::D)
            && safe(File::E)
            && safe(File::D)
            && safe(File::C)
        {
            let _ = moves.push(Move::new_queenside_castle(us));
        }
    }

    /// Makes a move on the board, modifying the position.
    /// # Errors
    /// This function returns an error if the move is not legal. The position
    /// is left untouched in that case.
    pub fn make(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        if let Some(&legal) = self.moves().iter().find(|m| {
            m.origin() == mv.origin()
                && m.target() == mv.target()
                && m.promotion_target() == mv.promotion_target()
        }) {
            self.make_legal(legal);
            Ok(())
        } else {
            Err(IllegalMoveError)
        }
    }

    /// Makes a move on the board assuming it was generated for this position.
    ///
    /// Legality is the move generator's job; handing this function a move that
    /// does not reference a piece of the side to move is a programming error
    /// and trips an assertion in debug builds.
    pub fn make_legal(&mut self, mv: Move) {
        let origin = mv.origin();
        let target = mv.target();
        let us = self.side_to_move;
        let them = us.inverse();

        let moving_kind = match self.pieces[origin as usize] {
            Some(kind) if self.colour_bitboards[us as usize].is_set(origin) => kind,
            _ => {
                debug_assert!(
                    false,
                    "malformed move {mv}: origin empty or holding an enemy piece"
                );
                return;
            }
        };

        let capture_square = if mv.is_en_passant() {
            // The captured pawn sits one rank behind the target square.
            match target.translate(Delta::pawn_push(them)) {
                Some(square) => square,
                None => {
                    debug_assert!(false, "malformed en passant move {mv}");
                    return;
                }
            }
        } else {
            target
        };
        let captured = if mv.is_capture() {
            self.pieces[capture_square as usize]
        } else {
            None
        };
        debug_assert!(
            captured.is_some() == mv.is_capture(),
            "move {mv} capture flag disagrees with the board"
        );

        self.history.push(HistoryEntry {
            played: mv,
            captured,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            fullmove: self.fullmove,
            en_passant_file: self.en_passant_file,
            hash: self.hash,
        });

        if let Some(file) = self.en_passant_file.take() {
            self.hash ^= zobrist::en_passant_file_hash(file)
        }

        // Touching a king or rook home square clears the relevant rights,
        // whether by moving the piece or capturing the rook.
        self.hash ^= self.castling_rights.zobrist_hash();
        for square in [origin, target] {
            match square {
                Square::E1 => self.castling_rights.disallow(Colour::White),
                Square::A1 => self.castling_rights.disallow_queenside_castle(Colour::White),
                Square::H1 => self.castling_rights.disallow_kingside_castle(Colour::White),
                Square::E8 => self.castling_rights.disallow(Colour::Black),
                Square::A8 => self.castling_rights.disallow_queenside_castle(Colour::Black),
                Square::H8 => self.castling_rights.disallow_kingside_castle(Colour::Black),
                _ => {}
            }
        }
        self.hash ^= self.castling_rights.zobrist_hash();

        if let Some(captured_kind) = captured {
            self.remove_piece(captured_kind, them, capture_square)
        }
        self.remove_piece(moving_kind, us, origin);
        self.put_piece(mv.promotion_target().unwrap_or(moving_kind), us, target);

        if mv.is_kingside_castle() {
            let (rook_origin, rook_target) = if us.is_black() {
                (Square::H8, Square::F8)
            } else {
                (Square::H1, Square::F1)
            };
            self.remove_piece(PieceKind::Rook, us, rook_origin);
            self.put_piece(PieceKind::Rook, us, rook_target);
        } else if mv.is_queenside_castle() {
            let (rook_origin, rook_target) = if us.is_black() {
                (Square::A8, Square::D8)
            } else {
                (Square::A1, Square::D1)
            };
            self.remove_piece(PieceKind::Rook, us, rook_origin);
            self.put_piece(PieceKind::Rook, us, rook_target);
        }

        if mv.is_double_push() {
            self.en_passant_file = Some(origin.file());
            self.hash ^= zobrist::en_passant_file_hash(origin.file());
        }

        if moving_kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock += 1
        }
        if us.is_black() {
            self.fullmove += 1
        }
        self.side_to_move.invert();
        self.hash ^= zobrist::side_to_move_hash();
    }

    /// Undoes the effects of the last move played, restoring the position as
    /// it was prior to the move.
    ///
    /// If no moves were played prior to calling this function, nothing happens.
    pub fn unmake(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };
        let mv = entry.played;
        let origin = mv.origin();
        let target = mv.target();
        self.side_to_move.invert();
        let us = self.side_to_move;
        let them = us.inverse();

        // Walk the moving piece back, demoting promoted pawns.
        let Some(arrived) = self.pieces[target as usize] else {
            debug_assert!(false, "unmake: no piece on {target}");
            return;
        };
        self.remove_piece(arrived, us, target);
        self.put_piece(
            if mv.promotion_target().is_some() {
                PieceKind::Pawn
            } else {
                arrived
            },
            us,
            origin,
        );

        if mv.is_kingside_castle() {
            let (rook_origin, rook_target) = if us.is_black() {
                (Square::H8, Square::F8)
            } else {
                (Square::H1, Square::F1)
            };
            self.remove_piece(PieceKind::Rook, us, rook_target);
            self.put_piece(PieceKind::Rook, us, rook_origin);
        } else if mv.is_queenside_castle() {
            let (rook_origin, rook_target) = if us.is_black() {
                (Square::A8, Square::D8)
            } else {
                (Square::A1, Square::D1)
            };
            self.remove_piece(PieceKind::Rook, us, rook_target);
            self.put_piece(PieceKind::Rook, us, rook_origin);
        }

        if let Some(captured) = entry.captured {
            let capture_square = if mv.is_en_passant() {
                target.translate(Delta::pawn_push(them))
            } else {
                Some(target)
            };
            if let Some(capture_square) = capture_square {
                self.put_piece(captured, them, capture_square)
            } else {
                debug_assert!(false, "unmake: malformed en passant move {mv}")
            }
        }

        self.castling_rights = entry.castling_rights;
        self.halfmove_clock = entry.halfmove_clock;
        self.fullmove = entry.fullmove;
        self.en_passant_file = entry.en_passant_file;
        self.hash = entry.hash;
    }

    /// Checks the fifty-move rule: 100 plies without a pawn move or capture.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Checks if the current position occurred at least three times over the
    /// played history, comparing placement, side to move, castling rights and
    /// en passant file through the Zobrist hash.
    pub fn is_repetition_draw(&self) -> bool {
        let mut seen = 1;
        for entry in self
            .history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
        {
            if entry.hash == self.hash {
                seen += 1;
                if seen == 3 {
                    return true;
                }
            }
        }
        false
    }

    /// Checks if neither side retains enough material to deliver checkmate:
    /// bare kings, a single minor piece, or bishops all bound to one square
    /// colour.
    pub fn has_insufficient_material(&self) -> bool {
        let heavy = self.piece_bitboards[PieceKind::Pawn as usize]
            | self.piece_bitboards[PieceKind::Rook as usize]
            | self.piece_bitboards[PieceKind::Queen as usize];
        if heavy.is_not_empty() {
            return false;
        }

        let knights = self.piece_bitboards[PieceKind::Knight as usize];
        let bishops = self.piece_bitboards[PieceKind::Bishop as usize];
        if (knights | bishops).cardinality() <= 1 {
            return true;
        }
        if knights.is_not_empty() {
            return false;
        }
        let dark_bishops = bishops & Bitboard::DARK_SQUARES;
        dark_bishops.is_empty() || dark_bishops == bishops
    }

    /// Checks the draw conditions that do not depend on the legal move set
    /// (fifty-move rule, threefold repetition, insufficient material).
    #[inline]
    pub fn is_draw_by_rule(&self) -> bool {
        self.is_fifty_move_draw() || self.is_repetition_draw() || self.has_insufficient_material()
    }

    /// Formats a legal move in Standard Algebraic Notation, with minimal
    /// disambiguation and check/checkmate decorations.
    pub fn san(&self, mv: Move) -> String {
        let origin = mv.origin();
        let target = mv.target();

        let body = if mv.is_kingside_castle() {
            SanMove::KingsideCastle
        } else if mv.is_queenside_castle() {
            SanMove::QueensideCastle
        } else {
            match self.pieces[origin as usize] {
                Some(PieceKind::Pawn) | None => SanMove::PawnMove {
                    origin_file: origin.file(),
                    is_capture: mv.is_capture(),
                    target,
                    promoting_to: mv.promotion_target(),
                },
                Some(kind) => {
                    // Disambiguate only when another piece of the same kind
                    // can reach the same target.
                    let mut lookahead = self.clone();
                    let rivals = lookahead
                        .moves()
                        .iter()
                        .filter(|m| {
                            m.target() == target
                                && m.origin() != origin
                                && self.pieces[m.origin() as usize] == Some(kind)
                        })
                        .map(|m| m.origin())
                        .collect::<Vec<_>>();
                    let (origin_file, origin_rank) = if rivals.is_empty() {
                        (None, None)
                    } else if rivals.iter().all(|r| r.file() != origin.file()) {
                        (Some(origin.file()), None)
                    } else if rivals.iter().all(|r| r.rank() != origin.rank()) {
                        (None, Some(origin.rank()))
                    } else {
                        (Some(origin.file()), Some(origin.rank()))
                    };
                    SanMove::PieceMove {
                        moving_piece: kind,
                        origin_file,
                        origin_rank,
                        is_capture: mv.is_capture(),
                        target,
                    }
                }
            }
        };

        let mut lookahead = self.clone();
        lookahead.make_legal(mv);
        let suffix = if lookahead.in_check() {
            if lookahead.moves().is_empty() {
                "#"
            } else {
                "+"
            }
        } else {
            ""
        };
        format!("{body}{suffix}")
    }

    #[inline]
    fn put_piece(&mut self, kind: PieceKind, colour: Colour, on: Square) {
        let bb = on.bitboard();
        self.piece_bitboards[kind as usize] |= bb;
        self.colour_bitboards[colour as usize] |= bb;
        self.occupancy |= bb;
        self.pieces[on as usize] = Some(kind);
        self.hash ^= zobrist::piece_hash(kind, colour, on);
    }

    #[inline]
    fn remove_piece(&mut self, kind: PieceKind, colour: Colour, on: Square) {
        let bb = on.bitboard();
        self.piece_bitboards[kind as usize] ^= bb;
        self.colour_bitboards[colour as usize] ^= bb;
        self.occupancy ^= bb;
        self.pieces[on as usize] = None;
        self.hash ^= zobrist::piece_hash(kind, colour, on);
    }

    fn rehash(&mut self) {
        let mut hash = 0;
        for square in Square::squares_iter() {
            if let Some((kind, colour)) = self.piece_on(square) {
                hash ^= zobrist::piece_hash(kind, colour, square)
            }
        }
        if self.side_to_move.is_black() {
            hash ^= zobrist::side_to_move_hash()
        }
        hash ^= self.castling_rights.zobrist_hash();
        if let Some(file) = self.en_passant_file {
            hash ^= zobrist::en_passant_file_hash(file)
        }
        self.hash = hash;
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in Square::squares_fen_iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "{} ", square.rank())?
            }
            match self.piece_on(square) {
                Some((kind, colour)) => write!(f, "{} ", kind.fen_char(colour))?,
                None => write!(f, ". ")?,
            }
            if i % 8 == 7 {
                writeln!(f)?
            }
        }
        write!(f, "  a b c d e f g h  {} to move", self.side_to_move)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn initial_position_has_twenty_moves() {
        assert_eq!(Position::initial().moves().len(), 20);
    }

    #[test]
    fn fen_round_trip() {
        for fen in [
            INITIAL_POSITION_FEN,
            KIWIPETE,
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 4 31",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().fen(), fen);
        }
    }

    #[test]
    fn make_unmake_restores_every_field() {
        for fen in [
            INITIAL_POSITION_FEN,
            KIWIPETE,
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            let reference = position.clone();
            for mv in position.moves() {
                position.make_legal(mv);
                position.unmake();
                assert_eq!(position, reference, "round trip failed for {mv}");
            }
        }
    }

    #[test]
    fn legal_moves_never_leave_own_king_attacked() {
        for fen in [
            KIWIPETE,
            // Pinned knight and rook.
            "4k3/4r3/8/b7/8/2N5/4R3/4K3 w - - 0 1",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            let us = position.side_to_move();
            for mv in position.moves() {
                position.make_legal(mv);
                assert!(
                    !position.is_attacked(position.king_square(us), us.inverse()),
                    "{mv} leaves the king attacked"
                );
                position.unmake();
            }
        }
    }

    #[test]
    fn pinned_pieces_cannot_move_off_their_ray() {
        // The c3 knight is pinned by the a5 bishop, the e2 rook by the e7 rook.
        let mut position = Position::from_fen("4k3/4r3/8/b7/8/2N5/4R3/4K3 w - - 0 1").unwrap();
        let moves = position.moves();
        assert!(moves.iter().all(|m| m.origin() != Square::C3));
        // The pinned rook can still slide along the e-file.
        assert!(moves
            .iter()
            .filter(|m| m.origin() == Square::E2)
            .all(|m| m.target().file() == File::E));
    }

    #[test]
    fn en_passant_capture_removes_the_pawn() {
        let mut position =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let ep = position
            .moves()
            .into_iter()
            .find(|m| m.is_en_passant())
            .expect("en passant should be available");
        assert_eq!(ep.origin(), Square::E5);
        assert_eq!(ep.target(), Square::F6);
        position.make_legal(ep);
        assert_eq!(position.piece_on(Square::F5), None);
        assert_eq!(
            position.piece_on(Square::F6),
            Some((PieceKind::Pawn, Colour::White))
        );
    }

    #[test]
    fn en_passant_discovering_a_rook_check_is_illegal() {
        // Capturing en passant would remove both pawns from the fifth rank,
        // exposing the white king to the h5 rook.
        let mut position = Position::from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
        assert!(position.moves().iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn castling_moves_both_pieces_and_clears_rights() {
        let mut position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let castle = Move::new_kingside_castle(Colour::White);
        assert!(position.moves().contains(&castle));
        position.make_legal(castle);
        assert_eq!(
            position.piece_on(Square::G1),
            Some((PieceKind::King, Colour::White))
        );
        assert_eq!(
            position.piece_on(Square::F1),
            Some((PieceKind::Rook, Colour::White))
        );
        assert!(!position.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(!position.castling_rights().queenside_castle_allowed(Colour::White));
        assert!(position.castling_rights().kingside_castle_allowed(Colour::Black));
    }

    #[test]
    fn castling_is_blocked_through_attacked_squares() {
        // The black rook on f8 attacks f1, which the king would pass through.
        let mut position =
            Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!position
            .moves()
            .contains(&Move::new_kingside_castle(Colour::White)));
    }

    #[test]
    fn capturing_a_rook_clears_the_right() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.make(Move::new_capture(Square::A1, Square::A8)).unwrap();
        assert!(!position.castling_rights().queenside_castle_allowed(Colour::Black));
        assert!(position.castling_rights().kingside_castle_allowed(Colour::Black));
    }

    #[test]
    fn promotions_offer_four_choices() {
        let mut position = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promotions = position
            .moves()
            .into_iter()
            .filter(|m| m.origin() == Square::B7)
            .collect::<Vec<_>>();
        assert_eq!(promotions.len(), 4);
        assert!(promotions.iter().all(|m| m.promotion_target().is_some()));

        let queen = Move::new_promotion(Square::B7, Square::B8, PieceKind::Queen);
        position.make_legal(queen);
        assert_eq!(
            position.piece_on(Square::B8),
            Some((PieceKind::Queen, Colour::White))
        );
        position.unmake();
        assert_eq!(
            position.piece_on(Square::B7),
            Some((PieceKind::Pawn, Colour::White))
        );
    }

    #[test]
    fn make_rejects_illegal_moves_without_mutating() {
        let mut position = Position::initial();
        let reference = position.clone();
        assert_eq!(
            position.make(Move::new_quiet(Square::E2, Square::E5)),
            Err(IllegalMoveError)
        );
        assert_eq!(
            position.make(Move::new_quiet(Square::E7, Square::E5)),
            Err(IllegalMoveError)
        );
        assert_eq!(position, reference);
    }

    #[test]
    fn repetition_is_detected_at_the_third_occurrence() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
        let shuffle = [
            Move::new_quiet(Square::H1, Square::H2),
            Move::new_quiet(Square::E8, Square::D8),
            Move::new_quiet(Square::H2, Square::H1),
            Move::new_quiet(Square::D8, Square::E8),
        ];
        // Second occurrence of the starting placement.
        for mv in shuffle {
            assert!(!position.is_repetition_draw());
            position.make_legal(mv);
        }
        // Third occurrence.
        for mv in shuffle {
            assert!(!position.is_repetition_draw());
            position.make_legal(mv);
        }
        assert!(position.is_repetition_draw());
    }

    #[test]
    fn insufficient_material_cases() {
        for (fen, insufficient) in [
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/2B5/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/2N5/4K3 b - - 0 1", true),
            // b2 and d2 share a square colour; such bishops cannot force mate.
            ("4k3/8/8/8/8/8/1B1B4/4K3 w - - 0 1", true),
            // b2 and c2 do not, and an opposite-coloured pair can.
            ("4k3/8/8/8/8/8/1BB5/4K3 w - - 0 1", false),
            ("2b1k3/8/8/8/8/8/2B5/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/2P5/4K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/2N1N3/4K3 w - - 0 1", false),
        ] {
            assert_eq!(
                Position::from_fen(fen).unwrap().has_insufficient_material(),
                insufficient,
                "{fen}"
            );
        }
    }

    #[test]
    fn san_formatting() {
        let position = Position::initial();
        assert_eq!(position.san(Move::new_quiet(Square::G1, Square::F3)), "Nf3");

        // Two knights able to reach the same square need a file disambiguator.
        let position = Position::from_fen("4k3/8/8/8/8/8/8/N1N1K3 w - - 0 1").unwrap();
        assert_eq!(position.san(Move::new_quiet(Square::A1, Square::B3)), "Nab3");

        let position = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            position.san(Move::new_promotion(Square::B7, Square::B8, PieceKind::Queen)),
            "b8=Q+"
        );

        // Ladder mate: the a7 rook seals the seventh rank.
        let position = Position::from_fen("4k3/RR6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(position.san(Move::new_quiet(Square::B7, Square::B8)), "Rb8#");
    }
}

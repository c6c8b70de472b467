//! # Move search
//!
//! Depth-limited minimax with alpha-beta pruning over a material evaluation.
//! White maximizes and black minimizes, so scores are always from white's
//! point of view.

use log::debug;

use crate::game::{
    action::Move,
    colour::Colour,
    piece::PieceKind,
    position::{MoveList, Position},
};

/// Scores are expressed in hundredths of a pawn.
pub type CentiPawns = i32;

/// Score for delivering checkmate. Mates found earlier in the tree score
/// closer to this bound, so the search prefers the shortest mate.
pub const MATE: CentiPawns = 100_000;

const PIECE_VALUES: [CentiPawns; 5] = [100, 300, 300, 500, 900];

/// The result of a search: the score of the position and the move achieving
/// it. The move is `None` exactly when the game is over.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SearchResult {
    pub score: CentiPawns,
    pub best_move: Option<Move>,
}

/// Sums up material on the board, white-positive. Kings cancel out and are
/// left uncounted.
pub fn evaluate(position: &Position) -> CentiPawns {
    let white = position.colour_bitboard(Colour::White);
    PieceKind::iter_all_but_king()
        .map(|kind| {
            let value = PIECE_VALUES[kind as usize];
            let bitboard = position.piece_bitboard(kind);
            let white_count = (bitboard & white).cardinality() as CentiPawns;
            let total_count = bitboard.cardinality() as CentiPawns;
            value * (2 * white_count - total_count)
        })
        .sum()
}

/// Searches the position to the given depth and returns the score along with
/// the best move found.
///
/// Terminal positions (and a zero depth) return a static score with no move.
/// Ties between equally scored moves break towards the move generator's
/// stable ordering, making results reproducible.
pub fn search(position: &mut Position, depth: u8) -> SearchResult {
    let result = alpha_beta(position, depth, -MATE, MATE, 0);
    debug!(
        "search depth {depth}: score {} best {}",
        result.score,
        result
            .best_move
            .map_or_else(|| String::from("(none)"), |mv| mv.to_string())
    );
    result
}

fn alpha_beta(
    position: &mut Position,
    depth: u8,
    mut alpha: CentiPawns,
    mut beta: CentiPawns,
    ply: u8,
) -> SearchResult {
    let moves = position.moves();
    if moves.is_empty() {
        // Checkmate or stalemate. Mates further from the root score lower,
        // so the side to move prefers quick mates and late losses.
        let score = if position.in_check() {
            let mate = MATE - ply as CentiPawns;
            if position.side_to_move().is_white() {
                -mate
            } else {
                mate
            }
        } else {
            0
        };
        return SearchResult {
            score,
            best_move: None,
        };
    }
    if position.is_draw_by_rule() {
        return SearchResult {
            score: 0,
            best_move: None,
        };
    }
    if depth == 0 {
        return SearchResult {
            score: evaluate(position),
            best_move: None,
        };
    }

    let moves = ordered(moves);
    let maximizing = position.side_to_move().is_white();
    let mut best_score = if maximizing { -MATE - 1 } else { MATE + 1 };
    let mut best_move = None;

    for &mv in &moves {
        position.make_legal(mv);
        let score = alpha_beta(position, depth - 1, alpha, beta, ply + 1).score;
        position.unmake();

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score)
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(best_score)
        }
        if beta <= alpha {
            break;
        }
    }

    SearchResult {
        score: best_score,
        best_move,
    }
}

/// Orders captures before quiet moves. The sort is stable, preserving the
/// generator's square ordering within each class.
fn ordered(mut moves: MoveList) -> MoveList {
    moves.sort_by_key(|mv| !mv.is_capture());
    moves
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::square::Square;

    #[test]
    fn material_count() {
        assert_eq!(evaluate(&Position::initial()), 0);
        let position = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&position), 900);
        let position = Position::from_fen("r3k3/8/8/8/8/8/8/1N2K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&position), -200);
    }

    #[test]
    fn hanging_queen_is_taken() {
        // Only the capture recovers material; everything else stays -800.
        let mut position = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let result = search(&mut position, 1);
        assert_eq!(result.best_move, Some(Move::new_capture(Square::E4, Square::D5)));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn black_minimizes() {
        let mut position = Position::from_fen("4k3/8/8/8/4p3/3Q4/8/4K3 b - - 0 1").unwrap();
        let result = search(&mut position, 1);
        assert_eq!(result.best_move, Some(Move::new_capture(Square::E4, Square::D3)));
        assert_eq!(result.score, -100);
    }

    #[test]
    fn mate_in_one_is_found() {
        // Both rook lifts mate; the stable order picks the a-rook first.
        let mut position = Position::from_fen("4k3/RR6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let result = search(&mut position, 2);
        assert_eq!(result.best_move, Some(Move::new_quiet(Square::A7, Square::A8)));
        assert_eq!(result.score, MATE - 1);
    }

    #[test]
    fn shorter_mates_score_higher() {
        // The a2 queen guards a8 and hangs to Rxa2, but mate in one must
        // still beat winning material.
        let mut position = Position::from_fen("4k3/RR6/8/8/8/8/q7/2K5 w - - 0 1").unwrap();
        let result = search(&mut position, 3);
        assert_eq!(result.best_move, Some(Move::new_quiet(Square::B7, Square::B8)));
        assert_eq!(result.score, MATE - 1);
    }

    #[test]
    fn terminal_positions_return_no_move() {
        // Checkmated side to move.
        let mut position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let result = search(&mut position, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE);

        // Stalemate.
        let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = search(&mut position, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let result = search(&mut position, 0);
        assert_eq!(result.score, 900);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn search_leaves_the_position_untouched() {
        let mut position = Position::initial();
        let reference = position.clone();
        search(&mut position, 3);
        assert_eq!(position, reference);
    }

    // Plain minimax without pruning, as a cross-check oracle.
    fn minimax(position: &mut Position, depth: u8, ply: u8) -> CentiPawns {
        let moves = position.moves();
        if moves.is_empty() {
            return if position.in_check() {
                let mate = MATE - ply as CentiPawns;
                if position.side_to_move().is_white() {
                    -mate
                } else {
                    mate
                }
            } else {
                0
            };
        }
        if position.is_draw_by_rule() {
            return 0;
        }
        if depth == 0 {
            return evaluate(position);
        }

        let maximizing = position.side_to_move().is_white();
        let mut best = if maximizing { -MATE - 1 } else { MATE + 1 };
        for mv in moves {
            position.make_legal(mv);
            let score = minimax(position, depth - 1, ply + 1);
            position.unmake();
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    #[test]
    fn pruning_does_not_change_scores() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
            "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            for depth in 0..=3 {
                assert_eq!(
                    search(&mut position, depth).score,
                    minimax(&mut position, depth, 0),
                    "{fen} at depth {depth}"
                );
            }
        }
    }

    #[test]
    fn pruning_matches_minimax_on_random_walks() {
        use rand::{rngs::SmallRng, Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut position = Position::initial();
        for _ in 0..40 {
            let moves = position.moves();
            if moves.is_empty() {
                break;
            }
            position.make_legal(moves[rng.gen_range(0..moves.len())]);
            for depth in 1..=2 {
                assert_eq!(
                    search(&mut position, depth).score,
                    minimax(&mut position, depth, 0),
                    "{} at depth {depth}",
                    position.fen()
                );
            }
        }
    }

    #[test]
    fn engine_move_is_deterministic() {
        let mut position = Position::initial();
        let first = search(&mut position, 2);
        let second = search(&mut position, 2);
        assert_eq!(first, second);
    }
}

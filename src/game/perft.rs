//! # Perft testing/benchmarking
//!
//! Walks the move generation tree to a fixed depth and counts leaf nodes,
//! which catches generator bugs by comparison against known reference counts.

use std::time::Instant;

use super::position::Position;

/// Configuration of a perft run.
pub struct PerftConfig {
    pub depth: u8,
    pub iterative: bool,
    pub bulk_counting: bool,
    pub divide: bool,
    pub bench: bool,
}
impl PerftConfig {
    /// Runs a perft test on the given position, printing node counts.
    pub fn go(&self, position: &mut Position) {
        if self.iterative && self.divide {
            println!("====== DEPTH 1 ======")
        }

        for depth in (if self.iterative { 1 } else { self.depth })..=self.depth {
            let start = Instant::now();
            let nodes: u64 = position
                .moves()
                .iter()
                .map(|&mv| {
                    position.make_legal(mv);
                    let mv_nodes = perft(position, depth - 1, self.bulk_counting);
                    position.unmake();
                    if self.divide {
                        println!("{mv}: {mv_nodes} nodes");
                    }
                    mv_nodes
                })
                .sum();
            let elapsed = start.elapsed().as_secs_f64();
            println!("depth {depth}: {nodes} nodes");
            if self.bench {
                println!(
                    "\ttook {} ({})",
                    human_readable_time(elapsed),
                    human_readable_nps(nodes as f64 / elapsed)
                );
            }

            if self.iterative && self.divide && depth != self.depth {
                println!("\n====== DEPTH {} ======", depth + 1)
            }
        }
    }
}

/// Traverses all nodes accessible from a given position, returning the number
/// of leaf nodes at the given depth.
pub fn perft(position: &mut Position, depth_left: u8, bulk_counting: bool) -> u64 {
    if depth_left == 0 {
        1
    } else if depth_left == 1 && bulk_counting {
        position.moves().len() as u64
    } else {
        position
            .moves()
            .iter()
            .map(|&mv| {
                position.make_legal(mv);
                let mv_nodes = perft(position, depth_left - 1, bulk_counting);
                position.unmake();
                mv_nodes
            })
            .sum()
    }
}

fn human_readable_time(secs: f64) -> String {
    if secs < 1. {
        format!("{:.3}ms", secs * 1_000.)
    } else {
        format!("{secs:.3}s")
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_matching(position: &mut Position, expected: &[u64]) {
        for (depth, expected) in expected.iter().enumerate() {
            let actual = perft(position, depth as u8 + 1, true);
            assert_eq!(
                actual,
                *expected,
                "expected {expected} at depth {} for {}, but got {actual}",
                depth + 1,
                position.fen(),
            );
        }
    }

    #[test]
    fn initial_position_perft() {
        check_matching(&mut Position::initial(), &[20, 400, 8902, 197281])
    }

    #[test]
    fn kiwipete_perft() {
        check_matching(
            &mut Position::from_fen(
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            )
            .unwrap(),
            &[48, 2039, 97862],
        )
    }

    #[test]
    fn endgame_perft() {
        check_matching(
            &mut Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - ").unwrap(),
            &[14, 191, 2812, 43238],
        )
    }

    #[test]
    fn mirrored_perft() {
        // Promotion-heavy position and its colour-flipped mirror must agree.
        let expected = [6, 264, 9467];
        check_matching(
            &mut Position::from_fen(
                "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            )
            .unwrap(),
            &expected,
        );
        check_matching(
            &mut Position::from_fen(
                "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            )
            .unwrap(),
            &expected,
        )
    }

    #[test]
    #[ignore]
    fn initial_position_perft_deep() {
        check_matching(
            &mut Position::initial(),
            &[20, 400, 8902, 197281, 4865609, 119060324],
        )
    }

    #[test]
    #[ignore]
    fn kiwipete_perft_deep() {
        check_matching(
            &mut Position::from_fen(
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            )
            .unwrap(),
            &[48, 2039, 97862, 4085603],
        )
    }

    #[test]
    #[ignore]
    fn underpromotion_perft_deep() {
        check_matching(
            &mut Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8")
                .unwrap(),
            &[44, 1486, 62379, 2103487],
        )
    }
}

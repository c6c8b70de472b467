//! Cross-module scenario tests driving full games through the public API.

use crate::{
    game::{
        colour::Colour,
        position::Position,
        status::{GameStatus, Outcome},
    },
    session::{Difficulty, Session, SessionError},
};

#[test]
fn scholars_mate_from_start_to_finish() {
    let mut session = Session::new();
    for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
        session.play_uci(mv).unwrap();
    }
    assert_eq!(
        session.history(),
        ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]
    );

    let report = session.report();
    assert!(report.check && report.checkmate);
    assert_eq!(report.winner, Some(Colour::White));
    assert_eq!(session.status().outcome, Outcome::WhiteWins);
    assert_eq!(session.play_uci("e8f7"), Err(SessionError::GameOver));
}

#[test]
fn walking_down_a_line_and_back_restores_the_position() {
    let mut position =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let reference = position.clone();

    let mut played = 0;
    for _ in 0..6 {
        let moves = position.moves();
        let Some(&mv) = moves.first() else { break };
        position.make_legal(mv);
        played += 1;
    }
    for _ in 0..played {
        position.unmake();
    }
    assert_eq!(position, reference);
}

#[test]
fn knight_shuffle_reaches_threefold_repetition() {
    let mut session = Session::new();
    for mv in [
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ] {
        assert!(!session.status().draw);
        session.play_uci(mv).unwrap();
    }
    let status = session.status();
    assert!(status.draw && !status.stalemate);
    assert_eq!(status.outcome, Outcome::Draw);
    assert_eq!(session.play_uci("e2e4"), Err(SessionError::GameOver));
}

#[test]
fn double_push_exposes_the_en_passant_target() {
    let mut session = Session::new();
    session.play_uci("e2e4").unwrap();
    assert_eq!(
        session.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    // The window closes after one ply.
    session.play_uci("g8f6").unwrap();
    assert!(!session.fen().contains("e3"));
}

#[test]
fn engine_escapes_check_or_gets_mated() {
    // Black is in check and every legal reply must resolve it.
    let mut session = Session::from_fen("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    assert!(session.report().check && !session.report().checkmate);
    session.play_engine_move(Difficulty::Easy).unwrap();
    assert!(!session.report().check);
}

#[test]
fn classification_survives_a_session_round_trip() {
    // Reloading the session's FEN classifies identically.
    let mut session = Session::new();
    for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        session.play_uci(mv).unwrap();
    }
    let status = session.status();
    assert!(status.checkmate);
    assert_eq!(status.outcome, Outcome::BlackWins);

    let mut reloaded = Position::from_fen(&session.fen()).unwrap();
    assert_eq!(GameStatus::of(&mut reloaded), status);
}

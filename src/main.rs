use std::io::BufRead;

use clap::{Parser, Subcommand};

#[cfg(feature = "perft")]
use castellan::game::perft::PerftConfig;
use castellan::{
    game::position::Position,
    search,
    session::{Difficulty, Session},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game against the engine on the terminal (DEFAULT)
    Play {
        /// Engine strength: easy, medium or hard
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Starting position as a FEN string
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Scores a position and prints the engine's preferred move
    Analyse {
        /// Search depth in plies
        #[arg(short, long, default_value_t = 3)]
        depth: u8,
        /// Position to analyse as a FEN string
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Starting position as a FEN string
        #[arg(short, long)]
        position: Option<String>,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Counts legal moves at horizon nodes instead of playing each of them
        #[arg(short)]
        bulk: bool,
    },
}

fn parse_position(fen: Option<String>) -> Position {
    match fen {
        Some(fen) => match Position::from_fen(&fen) {
            Ok(position) => position,
            Err(e) => {
                eprintln!("invalid position: {e}");
                std::process::exit(1)
            }
        },
        None => Position::initial(),
    }
}

pub fn main() {
    env_logger::init();
    let args = Arguments::parse();

    match args.command.unwrap_or(Command::Play {
        difficulty: Difficulty::Medium,
        position: None,
    }) {
        Command::Play {
            difficulty,
            position,
        } => play(difficulty, position),
        Command::Analyse { depth, position } => {
            let mut position = parse_position(position);
            let result = search::search(&mut position, depth);
            match result.best_move {
                Some(mv) => println!("{} {}", result.score, mv),
                None => println!("{} (game over)", result.score),
            }
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            position,
            depth,
            divide,
            iterative,
            bench,
            bulk,
        } => {
            let mut position = parse_position(position);
            PerftConfig {
                depth,
                divide,
                iterative,
                bench,
                bulk_counting: bulk,
            }
            .go(&mut position)
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("castellan has not been compiled with feature `perft`");
        }
    }
}

fn play(difficulty: Difficulty, fen: Option<String>) {
    let mut session = match fen {
        Some(fen) => match Session::from_fen(&fen) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("invalid position: {e}");
                std::process::exit(1)
            }
        },
        None => Session::new(),
    };

    println!("{}", session.position());
    println!("enter moves as coordinates (e2e4, a7a8q), or: hint, undo, reset, fen, history, quit");

    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "board" => println!("{}", session.position()),
            "fen" => println!("{}", session.fen()),
            "history" => println!("{}", session.history().join(" ")),
            "hint" => match session.hint(difficulty) {
                Some(mv) => println!("try {mv}"),
                None => println!("the game is over"),
            },
            "undo" => {
                // Takes back the engine's reply along with the player's move.
                session.undo();
                session.undo();
                println!("{}", session.position());
            }
            "reset" => {
                session.reset();
                println!("{}", session.position());
            }
            input => match session.play_uci(input) {
                Ok(_) => {
                    if announce_end(&session) {
                        continue;
                    }
                    match session.play_engine_move(difficulty) {
                        Ok(mv) => {
                            println!("{}", session.position());
                            if let Some(san) = session.history().last() {
                                println!("engine plays {mv} ({san})");
                            }
                            announce_end(&session);
                        }
                        Err(e) => println!("{e}"),
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }
}

/// Prints the game result if the game has ended, returning whether it did.
fn announce_end(session: &Session) -> bool {
    let status = session.status();
    if status.checkmate {
        println!("checkmate, {}", status.outcome);
    } else if status.stalemate {
        println!("stalemate, {}", status.outcome);
    } else if status.draw {
        println!("draw, {}", status.outcome);
    } else {
        if status.in_check {
            println!("check!");
        }
        return false;
    }
    true
}

//! Headless Polyominohs runner (default binary).
//!
//! Plays a session with a random move policy, or a fixed `--actions` script repeated for
//! every piece, and prints the final board, either as text or as a JSON snapshot. With `--catalog` it prints the generated pieces of the
//! order instead. Logs go to stderr; set `RUST_LOG` to see generation and game events.

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use polyominohs::core::{Session, SimpleRng};
use polyominohs::types::{order_name, GameAction};

/// Falling-block puzzle with every polyomino of a chosen order.
#[derive(Debug, Parser)]
#[command(name = "polyominohs", version, about)]
struct Args {
    /// Piece order: cells per piece, 1-6
    #[arg(short, long, default_value_t = 4)]
    order: usize,

    /// Starting level, 1-9; sets the gravity interval
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Seed for piece generation, piece choice and the move policy
    #[arg(short, long, default_value_t = 1)]
    seed: u32,

    /// Stop after this many pieces even if the game is still running
    #[arg(short, long, default_value_t = 200)]
    pieces: u32,

    /// Comma-separated actions applied to every piece instead of random moves,
    /// e.g. `rotate,moveLeft,moveLeft,softDrop`; the piece is hard dropped afterwards
    #[arg(short, long, value_delimiter = ',', value_parser = parse_action)]
    actions: Vec<GameAction>,

    /// Print the final state as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print the generated pieces and exit
    #[arg(long)]
    catalog: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::seeded(args.order, args.level, args.seed)
        .with_context(|| format!("cannot set up order {} at level {}", args.order, args.level))?;

    if args.catalog {
        print_catalog(&session);
        return Ok(());
    }

    session.start();
    // Separate stream for the move policy
    let mut policy = SimpleRng::new(args.seed.wrapping_add(1));
    while !session.is_game_over() && session.pieces() <= args.pieces {
        if args.actions.is_empty() {
            play_piece(&mut session, &mut policy);
        } else {
            play_script(&mut session, &args.actions);
        }
    }

    info!(
        score = session.score(),
        lines = session.lines(),
        pieces = session.pieces(),
        game_over = session.is_game_over(),
        "session finished"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        println!("{}", json);
    } else {
        print!("{}", session.complete_grid());
        if let Some(active) = session.snapshot().active {
            println!(
                "active piece at ({}, {}) facing {}",
                active.x,
                active.y,
                active.rotation.as_str()
            );
        }
        println!(
            "score {}  lines {}  pieces {}{}",
            session.score(),
            session.lines(),
            session.pieces(),
            if session.is_game_over() { "  game over" } else { "" }
        );
    }
    Ok(())
}

/// Rotate and shift the falling piece at random, let it fall a little, then drop it
fn play_piece(session: &mut Session, policy: &mut SimpleRng) {
    let width = session.field().get_size().0 as i32;
    let turns = policy.gen_range(0..4);
    let shift = policy.gen_range(-width / 2..=width / 2);
    let falls = policy.gen_range(0..3);
    debug!(turns, shift, falls, "policy move");

    for _ in 0..turns {
        session.apply(GameAction::Rotate);
    }
    let step = if shift < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    for _ in 0..shift.abs() {
        if !session.apply(step).moved {
            break;
        }
    }
    for _ in 0..falls {
        session.apply(GameAction::SoftDrop);
    }
    session.apply(GameAction::HardDrop);
}

/// Accepts the camelCase action names, case-insensitively
fn parse_action(name: &str) -> Result<GameAction, String> {
    GameAction::from_str(name.trim()).ok_or_else(|| {
        format!(
            "unknown action '{}', expected one of moveLeft, moveRight, softDrop, hardDrop, rotate, gravity",
            name
        )
    })
}

/// Apply `script` to the falling piece, then drop it if the script left it in the air
fn play_script(session: &mut Session, script: &[GameAction]) {
    for &action in script {
        let outcome = session.apply(action);
        debug!(action = action.as_str(), moved = outcome.moved, "scripted action");
        if outcome.settled || outcome.game_over {
            return;
        }
    }
    session.apply(GameAction::HardDrop);
}

fn print_catalog(session: &Session) {
    let name = order_name(session.order()).unwrap_or("polyomino");
    let count = session.catalog().count();
    println!("{} {}s", count, name);
    for (index, (shape, colour)) in session.catalog().enumerate() {
        let (r, g, b) = colour.rgb();
        println!();
        println!("#{} rgb({}, {}, {})", index + 1, r, g, b);
        print!("{}", shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_option_parses_list() {
        let args =
            Args::try_parse_from(["polyominohs", "--actions", "rotate,MoveLeft, hardDrop"]).unwrap();
        assert_eq!(
            args.actions,
            vec![GameAction::Rotate, GameAction::MoveLeft, GameAction::HardDrop]
        );
        assert!(Args::try_parse_from(["polyominohs", "--actions", "hold"]).is_err());
        assert!(Args::try_parse_from(["polyominohs"]).unwrap().actions.is_empty());
    }

    #[test]
    fn test_script_settles_every_piece() {
        let mut session = Session::seeded(4, 1, 3).unwrap();
        session.start();
        play_script(&mut session, &[GameAction::Rotate, GameAction::MoveLeft]);
        assert_eq!(session.pieces(), 2);
        assert_eq!(session.field().grid().filled_count(), 4);

        // A script that settles on its own is not dropped again
        play_script(&mut session, &[GameAction::HardDrop, GameAction::HardDrop]);
        assert_eq!(session.pieces(), 3);
    }
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the polyomino generator, the piece rotation model, the
//! playfield and a headless game session. It has no dependencies on UI or I/O, and
//! every random choice goes through an injected [`rand::Rng`], so:
//!
//! - **Deterministic**: the same seed produces the same catalog and the same game
//! - **Testable**: rules are exercised directly, without a terminal or timer
//! - **Portable**: runs in a terminal front end, a GUI, or headless
//!
//! # Module Structure
//!
//! - [`generator`]: one-sided polyominoes of order 1-6 by the growth method
//! - [`shape`]: square boolean cell grids and their rotations
//! - [`omino`]: a falling piece with precomputed rotations around a pivot cell
//! - [`grid`]: settled cells with line clearing
//! - [`field`]: a grid plus the falling piece, with collision checks
//! - [`colour`]: evenly spaced piece colours
//! - [`session`]: next-piece choice, scoring and game over
//! - [`scoring`]: points for line clears and drops
//! - [`snapshot`]: serializable view of a session
//! - [`rng`]: small deterministic random source
//!
//! # Game Rules
//!
//! - **Pieces**: every one-sided polyomino of the chosen order, each with its own colour
//! - **Spawn**: top centre of the field in a random rotation; if that rotation does not
//!   fit the others are tried, and a piece that fits nowhere ends the game
//! - **Rotation**: clockwise only, around a pivot cell that stays in place; no wall kicks
//! - **Line Clear**: every full row disappears and the rows above fall down
//! - **Scoring**: 50 per line, doubled when a piece clears as many lines as it has cells,
//!   plus 1 per soft drop step and 20 per hard drop
//!
//! # Example
//!
//! ```
//! use polyominohs_core::Session;
//! use polyominohs_types::GameAction;
//!
//! // Create and start a tetromino game at level 1
//! let mut session = Session::seeded(4, 1, 12345).unwrap();
//! session.start();
//!
//! // Apply game actions
//! session.apply(GameAction::MoveRight);
//! session.apply(GameAction::Rotate);
//! let outcome = session.apply(GameAction::HardDrop);
//!
//! assert!(outcome.settled);
//! assert!(session.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Nothing here keeps time. Drivers call [`Session::apply`] with
//! [`GameAction::Gravity`](types::GameAction::Gravity) every
//! [`Session::drop_interval_ms`] milliseconds.

pub mod colour;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod omino;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use polyominohs_types as types;

// Re-export commonly used types for convenience
pub use colour::{generate_colours, hsv_to_rgb};
pub use error::{EngineError, ErrorKind, Result};
pub use field::Field;
pub use generator::{normalise, Generator};
pub use grid::Grid;
pub use omino::Omino;
pub use rng::SimpleRng;
pub use scoring::{calculate_line_score, calculate_score, ScoreResult};
pub use session::{Session, StepOutcome};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, SessionSnapshot};

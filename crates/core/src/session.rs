//! Session module - a headless game on one field
//!
//! A session generates the piece catalog for its order once, then feeds random
//! pieces into a [`Field`] sized for that order. It keeps score the classic
//! Polyominohs way:
//!
//! - Each settled piece clears what it can; lines score [`LINE_SCORE`] each and
//!   double when a piece clears as many lines as it has cells
//! - Soft drop steps and hard drops collect accel points, paid out when the piece
//!   settles
//! - A piece that cannot spawn in any rotation ends the game
//!
//! There is no clock: the caller decides when gravity happens, using
//! [`Session::drop_interval_ms`] if it wants real time.
//!
//! [`LINE_SCORE`]: crate::types::LINE_SCORE

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::{EngineError, Result};
use crate::field::Field;
use crate::generator::Generator;
use crate::grid::Grid;
use crate::omino::Omino;
use crate::rng::SimpleRng;
use crate::scoring::calculate_score;
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{
    board_size_for_order, drop_interval_ms, Colour, Direction, GameAction, HARD_DROP_POINTS,
    MAX_LEVEL, MIN_LEVEL, SOFT_DROP_POINTS,
};

/// What a single action did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The piece changed position or rotation
    pub moved: bool,
    /// The piece was written into the grid
    pub settled: bool,
    pub lines_cleared: usize,
    /// Points added to the score by this action
    pub points: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    order: usize,
    level: u32,
    shapes: Vec<Shape>,
    colours: Vec<Colour>,
    field: Field<SimpleRng>,
    next: Omino,
    rng: R,
    score: u32,
    lines: u32,
    accel_points: u32,
    pieces: u32,
    started: bool,
    game_over: bool,
}

impl Session<SimpleRng> {
    /// Session driven by a [`SimpleRng`] with the given seed
    pub fn seeded(order: usize, level: u32, seed: u32) -> Result<Self> {
        Self::new(order, level, SimpleRng::new(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Generate the catalog for `order` and prepare an empty field.
    ///
    /// Fails for orders without a known count and for levels outside 1-9.
    #[instrument(skip(rng))]
    pub fn new(order: usize, level: u32, mut rng: R) -> Result<Self> {
        if drop_interval_ms(level).is_none() {
            return Err(EngineError::UnsupportedLevel {
                level,
                min: MIN_LEVEL,
                max: MAX_LEVEL,
            });
        }

        let shapes = Generator::new(&mut rng).generate(order)?;
        let colours = crate::colour::generate_colours(shapes.len())?;
        let (width, height) = board_size_for_order(order);
        let field = Field::with_rng(order, width, height, SimpleRng::new(rng.gen()));
        let next = pick_piece(&shapes, &colours, &mut rng);

        debug!(order, level, width, height, shapes = shapes.len(), "session ready");
        Ok(Self {
            order,
            level,
            shapes,
            colours,
            field,
            next,
            rng,
            score: 0,
            lines: 0,
            accel_points: 0,
            pieces: 0,
            started: false,
            game_over: false,
        })
    }

    /// Spawn the first piece; later calls do nothing
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned so far
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Accel points collected by the falling piece
    pub fn accel_points(&self) -> u32 {
        self.accel_points
    }

    /// Gravity interval for the session's level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level).unwrap_or_default()
    }

    pub fn field(&self) -> &Field<SimpleRng> {
        &self.field
    }

    pub fn next_omino(&self) -> &Omino {
        &self.next
    }

    /// Every piece shape of the order with its colour
    pub fn catalog(&self) -> impl Iterator<Item = (&Shape, Colour)> + '_ {
        self.shapes.iter().zip(self.colours.iter().copied())
    }

    /// Settled cells with the falling piece drawn in
    pub fn complete_grid(&self) -> Grid {
        self.field.get_complete_grid()
    }

    /// Apply one action to the falling piece.
    ///
    /// Does nothing before `start` and after game over.
    pub fn apply(&mut self, action: GameAction) -> StepOutcome {
        if self.game_over || self.field.get_omino().is_none() {
            return StepOutcome {
                game_over: self.game_over,
                ..StepOutcome::default()
            };
        }

        let moved = match action {
            GameAction::MoveLeft => self.field.move_omino(Direction::Left),
            GameAction::MoveRight => self.field.move_omino(Direction::Right),
            GameAction::Rotate => self.field.rotate_omino(),
            GameAction::Gravity => self.field.move_omino(Direction::Down),
            GameAction::SoftDrop => {
                let moved = self.field.move_omino(Direction::Down);
                if moved {
                    self.accel_points += SOFT_DROP_POINTS;
                }
                moved
            }
            GameAction::HardDrop => {
                let mut moved = false;
                while self.field.move_omino(Direction::Down) {
                    moved = true;
                }
                self.accel_points += HARD_DROP_POINTS;
                moved
            }
        };

        if self.field.get_omino().is_some() {
            return StepOutcome {
                moved,
                ..StepOutcome::default()
            };
        }

        let mut outcome = self.finish_piece();
        outcome.moved = moved;
        outcome
    }

    /// Score the piece that just settled and bring in the next one
    fn finish_piece(&mut self) -> StepOutcome {
        let lines_cleared = self.field.check();
        let result = calculate_score(lines_cleared, self.order, self.accel_points);
        self.score = self.score.saturating_add(result.total);
        self.lines = self.lines.saturating_add(lines_cleared as u32);
        self.accel_points = 0;

        if lines_cleared > 0 {
            debug!(
                lines = lines_cleared,
                points = result.total,
                full_order = result.full_order_bonus,
                "lines cleared"
            );
        }

        let spawned = self.spawn_next();
        StepOutcome {
            moved: false,
            settled: true,
            lines_cleared,
            points: result.total,
            game_over: !spawned,
        }
    }

    fn spawn_next(&mut self) -> bool {
        let upcoming = pick_piece(&self.shapes, &self.colours, &mut self.rng);
        let piece = std::mem::replace(&mut self.next, upcoming);
        if self.field.add_omino(piece) {
            self.pieces += 1;
            true
        } else {
            self.game_over = true;
            info!(score = self.score, lines = self.lines, pieces = self.pieces, "game over");
            false
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (width, height) = self.field.get_size();
        SessionSnapshot {
            order: self.order,
            level: self.level,
            width,
            height,
            board: self.field.get_complete_grid().to_rows(),
            active: self.field.get_omino().and_then(ActiveSnapshot::from_omino),
            next: self.next.shape().to_rows(),
            next_colour: self.next.colour(),
            score: self.score,
            lines: self.lines,
            pieces: self.pieces,
            game_over: self.game_over,
        }
    }
}

/// Uniform choice over the catalog; colour follows the shape index
fn pick_piece<R: Rng>(shapes: &[Shape], colours: &[Colour], rng: &mut R) -> Omino {
    let index = rng.gen_range(0..shapes.len());
    Omino::with_random_rotation(shapes[index].clone(), colours[index], rng)
}

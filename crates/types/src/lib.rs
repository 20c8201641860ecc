//! Core types module - shared data structures and constants
//!
//! This module defines the plain data types exchanged between the engine and whatever
//! drives it. All types are pure data with no behaviour beyond arithmetic and
//! conversions, so they are usable from the core logic, a renderer, or a test harness.
//!
//! # Board Dimensions
//!
//! The playfield size is chosen by the caller from the polyomino order:
//!
//! | Order | Width | Height |
//! |-------|-------|--------|
//! | 1-4 | 10 | 20 |
//! | 5-6 | 15 | 30 |
//!
//! # Polyomino Counts
//!
//! Number of one-sided polyominoes per order (rotations identified, reflections not):
//!
//! | Order | Name | Count |
//! |-------|------|-------|
//! | 1 | monomino | 1 |
//! | 2 | domino | 1 |
//! | 3 | tromino | 2 |
//! | 4 | tetromino | 7 |
//! | 5 | pentomino | 18 |
//! | 6 | hexomino | 60 |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 500ms |
//! | 2 | 400ms |
//! | 3 | 300ms |
//! | 4 | 250ms |
//! | 5 | 200ms |
//! | 6 | 150ms |
//! | 7 | 100ms |
//! | 8 | 50ms |
//! | 9 | 25ms |
//!
//! # Examples
//!
//! ```
//! use polyominohs_types::{board_size_for_order, known_count, Point, Rotation};
//!
//! assert_eq!(known_count(4), Some(7));
//! assert_eq!(known_count(7), None);
//! assert_eq!(board_size_for_order(5), (15, 30));
//!
//! let rotated = Rotation::North.rotate_cw();
//! assert_eq!(rotated, Rotation::East);
//!
//! assert_eq!(Point::new(1, 2) + Point::new(3, -1), Point::new(4, 1));
//! ```

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Known one-sided polyomino counts, indexed by `order - 1`
pub const KNOWN_COUNTS: [usize; 6] = [1, 1, 2, 7, 18, 60];

/// Largest order with a known count
pub const MAX_ORDER: usize = KNOWN_COUNTS.len();

/// Field size (width, height) used for orders 1-4
pub const SMALL_BOARD: (usize, usize) = (10, 20);

/// Field size (width, height) used for orders 5 and up
pub const LARGE_BOARD: (usize, usize) = (15, 30);

/// Upper bound on growth attempts before generation gives up
pub const MAX_GENERATION_ATTEMPTS: usize = 1_000_000;

/// Saturation used for generated piece colours
pub const COLOUR_SATURATION: f64 = 1.0;

/// Value (brightness) used for generated piece colours
pub const COLOUR_VALUE: f64 = 0.78;

/// Drop interval in milliseconds, indexed by `level - 1`
pub const DROP_INTERVALS: [u32; 9] = [500, 400, 300, 250, 200, 150, 100, 50, 25];

/// Lowest selectable level
pub const MIN_LEVEL: u32 = 1;

/// Highest selectable level
pub const MAX_LEVEL: u32 = DROP_INTERVALS.len() as u32;

/// Points awarded per cleared line
pub const LINE_SCORE: u32 = 50;

/// Multiplier applied when the number of cleared lines equals the order
pub const FULL_ORDER_MULTIPLIER: u32 = 2;

/// Accel points awarded for a hard drop
pub const HARD_DROP_POINTS: u32 = 20;

/// Accel points awarded for each successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Number of one-sided polyominoes of the given order, if known
pub fn known_count(order: usize) -> Option<usize> {
    order
        .checked_sub(1)
        .and_then(|idx| KNOWN_COUNTS.get(idx))
        .copied()
}

/// Conventional field dimensions (width, height) for an order
pub fn board_size_for_order(order: usize) -> (usize, usize) {
    if order < 5 {
        SMALL_BOARD
    } else {
        LARGE_BOARD
    }
}

/// Drop interval for a level, `None` outside `MIN_LEVEL..=MAX_LEVEL`
///
/// # Examples
///
/// ```
/// use polyominohs_types::drop_interval_ms;
///
/// assert_eq!(drop_interval_ms(1), Some(500));
/// assert_eq!(drop_interval_ms(9), Some(25));
/// assert_eq!(drop_interval_ms(0), None);
/// ```
pub fn drop_interval_ms(level: u32) -> Option<u32> {
    level
        .checked_sub(1)
        .and_then(|idx| DROP_INTERVALS.get(idx as usize))
        .copied()
}

/// Human name of an order ("tetromino" for 4)
pub fn order_name(order: usize) -> Option<&'static str> {
    match order {
        1 => Some("monomino"),
        2 => Some("domino"),
        3 => Some("tromino"),
        4 => Some("tetromino"),
        5 => Some("pentomino"),
        6 => Some("hexomino"),
        _ => None,
    }
}

/// A 2D integer point, used both as a grid position and as a displacement.
///
/// `x` grows to the right, `y` grows downwards; (0, 0) is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rotation states of a piece, each a quarter turn clockwise from the previous
///
/// - **North**: state 0, the shape as generated
/// - **East**: state 1, 90° clockwise
/// - **South**: state 2, 180°
/// - **West**: state 3, 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotation states in clockwise order
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use polyominohs_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state as an index 0-3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation state from an index, `None` outside 0-3
    ///
    /// # Examples
    ///
    /// ```
    /// use polyominohs_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(2), Some(Rotation::South));
    /// assert_eq!(Rotation::from_index(4), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Directions a falling piece can be moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement for this direction
    pub fn delta(&self) -> Point {
        match self {
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }
}

/// Commands a driver can apply to a running session
///
/// `Gravity` is the timed fall; `SoftDrop` is the same move requested by the player
/// and earns accel points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (earns a point if it moved)
    SoftDrop,
    /// Drop piece until it settles
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Timer-driven fall by one cell
    Gravity,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polyominohs_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "gravity" => Some(GameAction::Gravity),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Gravity => "gravity",
        }
    }
}

/// An RGB colour with components in 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components as an `(r, g, b)` triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(Colour)`: Cell filled with the colour of the piece that settled there
pub type Cell = Option<Colour>;

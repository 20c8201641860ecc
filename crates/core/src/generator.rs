//! Generator module - one-sided polyominoes by the growth method
//!
//! A shape is grown cell by cell inside an order×order grid. Starting from a seed
//! cell near the bottom-left corner, the empty neighbours of every newly filled cell
//! are numbered with increasing ranks (up, right, down, left) and the next cell is
//! picked at random among the frontier cells ranked above the previous pick. Each
//! grown shape is reduced to its canonical rotation and kept unless some rotation of
//! it is already known. This repeats until the known number of shapes for the order
//! has been found.
//!
//! Generation is exact for orders 1-6; other orders have no known count and are
//! rejected rather than searched.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument, trace, warn};

use crate::colour;
use crate::error::{EngineError, Result};
use crate::rng::SimpleRng;
use crate::shape::Shape;
use crate::types::{known_count, Colour, MAX_GENERATION_ATTEMPTS};

/// Reduce a shape to its canonical rotation, pushed into the bottom-left corner.
///
/// The canonical rotation is the one with the most filled cells on the bottom row,
/// then the most filled cells in the left column, then the smallest rotation count.
/// Normalising a canonical shape returns it unchanged.
pub fn normalise(shape: &Shape) -> Shape {
    let mut best_rotation = 0;
    let mut best_score = (0, 0);
    let mut current = shape.clone();

    for rotation in 0..4 {
        let (moved, _, _) = current.moved_to_corner();
        let score = (moved.bottom_row_count(), moved.left_column_count());
        // Strictly greater keeps the smallest index on ties
        if rotation == 0 || score > best_score {
            best_rotation = rotation;
            best_score = score;
        }
        current = moved.rotated_cw();
    }

    let mut normalised = shape.clone();
    for _ in 0..best_rotation {
        normalised = normalised.rotated_cw();
    }
    normalised.moved_to_corner().0
}

/// True if `b` turns into `a` by quarter turns. Both must sit in the corner.
///
/// Some hexominoes tie on every score in two different rotations, so `normalise`
/// can give two forms of one piece depending on how it was grown.
fn same_piece(a: &Shape, b: &Shape) -> bool {
    let mut turned = b.clone();
    for _ in 0..4 {
        if turned == *a {
            return true;
        }
        turned = turned.rotated_cw().moved_to_corner().0;
    }
    false
}

/// Seed cell `(row, col)` of a growth attempt; larger orders start one row higher so
/// cross-like shapes can grow downwards as well
fn seed_cell(order: usize) -> (usize, usize) {
    if order > 4 {
        (order - 2, 0)
    } else {
        (order - 1, 0)
    }
}

/// Number the empty, in-bounds, unnumbered neighbours of `cell`, continuing from
/// `max_rank`. Already numbered cells keep their rank.
fn number_neighbours(
    shape: &Shape,
    cell: (usize, usize),
    frontier: &mut BTreeMap<usize, (usize, usize)>,
    max_rank: &mut usize,
) {
    let order = shape.order();
    let (row, col) = cell;
    let mut neighbours: ArrayVec<(usize, usize), 4> = ArrayVec::new();
    if row > 0 {
        neighbours.push((row - 1, col));
    }
    if col + 1 < order {
        neighbours.push((row, col + 1));
    }
    if row + 1 < order {
        neighbours.push((row + 1, col));
    }
    if col > 0 {
        neighbours.push((row, col - 1));
    }

    for neighbour in neighbours {
        let known = frontier.values().any(|&c| c == neighbour);
        if !shape.get(neighbour.0, neighbour.1) && !known {
            *max_rank += 1;
            frontier.insert(*max_rank, neighbour);
        }
    }
}

/// Every frontier rank above the previous pick
fn eligible_ranks(frontier: &BTreeMap<usize, (usize, usize)>, pick: usize) -> Vec<usize> {
    frontier.range(pick + 1..).map(|(&rank, _)| rank).collect()
}

/// Polyomino generator with an injected random source
#[derive(Debug, Clone)]
pub struct Generator<R = SimpleRng> {
    rng: R,
    max_attempts: usize,
}

impl Generator<SimpleRng> {
    /// Generator driven by a [`SimpleRng`] with the given seed
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl Default for Generator<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Replace the cap on growth attempts per `generate` call
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Return every one-sided polyomino of the given order in canonical form,
    /// in the order they were first found.
    #[instrument(skip(self))]
    pub fn generate(&mut self, order: usize) -> Result<Vec<Shape>> {
        let target = known_count(order).ok_or(EngineError::UnsupportedOrder { order })?;

        if order == 1 {
            let mut single = Shape::empty(1);
            single.set(0, 0, true);
            return Ok(vec![single]);
        }

        let mut shapes: Vec<Shape> = Vec::with_capacity(target);
        let mut attempts = 0usize;

        while shapes.len() < target {
            if attempts >= self.max_attempts {
                warn!(attempts, found = shapes.len(), target, "generation gave up");
                return Err(EngineError::GenerationExhausted {
                    order,
                    attempts,
                    found: shapes.len(),
                    target,
                });
            }
            attempts += 1;

            let Some(grown) = self.grow(order) else {
                trace!(attempts, "growth attempt ran out of frontier");
                continue;
            };
            let canonical = normalise(&grown);
            if !shapes.iter().any(|known| same_piece(known, &canonical)) {
                debug!(found = shapes.len() + 1, target, attempts, "new polyomino");
                shapes.push(canonical);
            }
        }

        debug!(order, attempts, count = shapes.len(), "generation complete");
        Ok(shapes)
    }

    /// See [`colour::generate_colours`]
    pub fn generate_colours(&self, n: usize) -> Result<Vec<Colour>> {
        colour::generate_colours(n)
    }

    /// One growth attempt. `None` when no frontier cell ranks above the last pick
    /// before the shape is complete.
    fn grow(&mut self, order: usize) -> Option<Shape> {
        let mut shape = Shape::empty(order);
        let (mut row, mut col) = seed_cell(order);
        shape.set(row, col, true);

        let mut frontier: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
        let mut max_rank = 0usize;
        let mut pick = 0usize;

        for _ in 1..order {
            number_neighbours(&shape, (row, col), &mut frontier, &mut max_rank);
            pick = *eligible_ranks(&frontier, pick).choose(&mut self.rng)?;
            (row, col) = frontier.remove(&pick)?;
            shape.set(row, col, true);
        }

        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_cell_moves_up_for_large_orders() {
        assert_eq!(seed_cell(2), (1, 0));
        assert_eq!(seed_cell(4), (3, 0));
        assert_eq!(seed_cell(5), (3, 0));
        assert_eq!(seed_cell(6), (4, 0));
    }

    #[test]
    fn test_number_neighbours_clockwise_from_top() {
        let mut shape = Shape::empty(3);
        shape.set(1, 1, true);
        let mut frontier = BTreeMap::new();
        let mut max_rank = 0;
        number_neighbours(&shape, (1, 1), &mut frontier, &mut max_rank);

        assert_eq!(max_rank, 4);
        assert_eq!(frontier[&1], (0, 1));
        assert_eq!(frontier[&2], (1, 2));
        assert_eq!(frontier[&3], (2, 1));
        assert_eq!(frontier[&4], (1, 0));
    }

    #[test]
    fn test_number_neighbours_keeps_existing_ranks() {
        let mut shape = Shape::empty(3);
        shape.set(2, 0, true);
        let mut frontier = BTreeMap::new();
        let mut max_rank = 0;
        number_neighbours(&shape, (2, 0), &mut frontier, &mut max_rank);
        // (1, 0) -> 1, (2, 1) -> 2
        assert_eq!(max_rank, 2);

        frontier.remove(&2);
        shape.set(2, 1, true);
        number_neighbours(&shape, (2, 1), &mut frontier, &mut max_rank);

        // (1, 1) -> 3, (2, 2) -> 4; (1, 0) keeps rank 1, (2, 0) is filled
        assert_eq!(frontier[&1], (1, 0));
        assert_eq!(frontier[&3], (1, 1));
        assert_eq!(frontier[&4], (2, 2));
        assert_eq!(frontier.len(), 3);
    }

    #[test]
    fn test_eligible_ranks_keeps_whole_frontier() {
        let frontier: BTreeMap<usize, (usize, usize)> =
            (1..=100).map(|rank| (rank, (rank / 10, rank % 10))).collect();
        let ranks = eligible_ranks(&frontier, 0);
        assert_eq!(ranks.len(), 100);
        assert_eq!(ranks.last(), Some(&100));

        let ranks = eligible_ranks(&frontier, 90);
        assert_eq!(ranks, (91..=100).collect::<Vec<_>>());
        assert!(eligible_ranks(&frontier, 100).is_empty());
    }

    #[test]
    fn test_normalise_prefers_full_bottom_row() {
        // Vertical I tromino becomes horizontal
        let vertical = Shape::parse(&["#..", "#..", "#.."]).unwrap();
        let expected = Shape::parse(&["...", "...", "###"]).unwrap();
        assert_eq!(normalise(&vertical), expected);
    }

    #[test]
    fn test_normalise_breaks_ties_on_left_column() {
        // Both L-tromino rotations with two bottom cells; the one with two left cells wins
        let shape = Shape::parse(&["...", ".#.", "##."]).unwrap();
        let expected = Shape::parse(&["...", "#..", "##."]).unwrap();
        assert_eq!(normalise(&shape), expected);
    }

    #[test]
    fn test_normalise_is_idempotent() {
        let shape = Shape::parse(&["....", ".#..", ".##.", "..#."]).unwrap();
        let once = normalise(&shape);
        assert_eq!(normalise(&once), once);
    }

    #[test]
    fn test_tied_hexomino_has_two_forms() {
        let a = Shape::parse(&["......", "......", ".#....", ".##...", "##....", ".#...."]).unwrap();
        let b = Shape::parse(&["......", "......", "......", ".#....", "####..", "..#..."]).unwrap();
        assert_eq!(normalise(&a), a);
        assert_eq!(normalise(&b), b);
        assert_ne!(a, b);
        assert!(same_piece(&a, &b));
        assert!(same_piece(&b, &a));
    }

    #[test]
    fn test_same_piece_rejects_mirror_image() {
        let s = Shape::parse(&["....", "....", ".##.", "##.."]).unwrap();
        let z = Shape::parse(&["....", "....", "##..", ".##."]).unwrap();
        assert!(!same_piece(&s, &z));
        assert!(same_piece(&s, &s));
    }

    #[test]
    fn test_grow_fills_order_cells() {
        let mut generator = Generator::seeded(5);
        for _ in 0..50 {
            if let Some(shape) = generator.grow(5) {
                assert_eq!(shape.filled_count(), 5);
                assert!(shape.is_connected());
            }
        }
    }

    #[test]
    fn test_unknown_order_rejected() {
        let mut generator = Generator::seeded(1);
        assert_eq!(
            generator.generate(7),
            Err(EngineError::UnsupportedOrder { order: 7 })
        );
        assert_eq!(
            generator.generate(0),
            Err(EngineError::UnsupportedOrder { order: 0 })
        );
    }

    #[test]
    fn test_attempt_cap_surfaces_error() {
        let mut generator = Generator::seeded(1).with_max_attempts(1);
        match generator.generate(6) {
            Err(EngineError::GenerationExhausted {
                order,
                attempts,
                target,
                ..
            }) => {
                assert_eq!(order, 6);
                assert_eq!(attempts, 1);
                assert_eq!(target, 60);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}

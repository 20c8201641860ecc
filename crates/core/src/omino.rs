//! Omino module - a single falling polyomino and its rotation model
//!
//! Rotation works by rotating the whole order×order box and pushing the result back
//! into the bottom-left corner. That alone would make pieces jump around, so each
//! piece picks a pivot cell and records, per rotation state, where that cell ends up
//! relative to rotation 0. Moving the piece by the difference of two offsets keeps
//! the pivot cell fixed on the playfield while the piece turns.
//!
//! Shapes that look the same after a quarter turn (the square tetromino, for one)
//! have no pivot: all four states share one shape and rotating never moves them.

use rand::Rng;

use crate::error::{EngineError, Result};
use crate::shape::Shape;
use crate::types::{Colour, Point, Rotation};

/// Find the cell held still while the shape rotates.
///
/// Returns `None` for shapes that are unchanged by a quarter turn.
fn find_pivot(shape: &Shape) -> Option<Point> {
    let n = shape.order();
    if n == 1 {
        return Some(Point::ZERO);
    }

    // Work in the bottom-left aligned frame, then translate back.
    let (aligned, rows, cols) = shape.moved_to_corner();
    if aligned.rotated_cw().moved_to_corner().0 == aligned {
        return None;
    }

    let width = aligned.width();
    let height = aligned.height();

    // Row at the vertical centre, used to inspect the horizontal candidates
    let centre_row = n - (height + 1) / 2;
    let col = if width % 2 == 1 {
        (width - 1) / 2
    } else {
        let (left, right) = (width / 2 - 1, width / 2);
        if !aligned.get(centre_row, left) && aligned.get(centre_row, right) {
            right
        } else {
            left
        }
    };

    let row = if height % 2 == 1 {
        n - (height + 1) / 2
    } else {
        let (lower, upper) = (n - height / 2, n - height / 2 - 1);
        if !aligned.get(lower, col) && aligned.get(upper, col) {
            upper
        } else {
            lower
        }
    };

    Some(Point::new(
        col as i32 + cols as i32,
        row as i32 - rows as i32,
    ))
}

/// Shapes and offsets for rotations 0-3 around `pivot`
fn rotation_family(shape: Shape, pivot: Point) -> ([Shape; 4], [Point; 4]) {
    let n = shape.order() as i32;
    let mut shapes = [shape.clone(), shape.clone(), shape.clone(), shape];
    let mut offsets = [Point::ZERO; 4];
    let mut previous = pivot;

    for i in 1..4 {
        let (next, rows, cols) = shapes[i - 1].rotated_cw().moved_to_corner();
        // Quarter turn sends (x, y) to (n - 1 - y, x), then the corner push shifts it.
        let moved = Point::new(n - 1 - previous.y - cols as i32, previous.x + rows as i32);
        shapes[i] = next;
        offsets[i] = moved - pivot;
        previous = moved;
    }

    (shapes, offsets)
}

/// A polyomino piece with its four precomputed rotation states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omino {
    shapes: [Shape; 4],
    offsets: [Point; 4],
    pivot: Option<Point>,
    colour: Colour,
    rotation: Rotation,
    /// Top-left of the shape box in playfield coordinates, unset until placed
    location: Option<Point>,
}

impl Omino {
    /// Create a piece in the given rotation state; the shape becomes rotation 0
    pub fn new(shape: Shape, colour: Colour, rotation: Rotation) -> Self {
        let pivot = find_pivot(&shape);
        let (shapes, offsets) = match pivot {
            Some(p) => rotation_family(shape, p),
            None => (
                [shape.clone(), shape.clone(), shape.clone(), shape],
                [Point::ZERO; 4],
            ),
        };

        Self {
            shapes,
            offsets,
            pivot,
            colour,
            rotation,
            location: None,
        }
    }

    /// Create a piece in a uniformly random rotation state
    pub fn with_random_rotation<R: Rng>(shape: Shape, colour: Colour, rng: &mut R) -> Self {
        let rotation = Rotation::ALL[rng.gen_range(0..4)];
        Self::new(shape, colour, rotation)
    }

    pub fn order(&self) -> usize {
        self.shapes[0].order()
    }

    /// Shape in the current rotation
    pub fn shape(&self) -> &Shape {
        self.shape_at(self.rotation)
    }

    pub fn shape_at(&self, rotation: Rotation) -> &Shape {
        &self.shapes[rotation.index()]
    }

    /// Shape by raw rotation index
    pub fn shape_at_index(&self, index: usize) -> Result<&Shape> {
        self.shapes
            .get(index)
            .ok_or(EngineError::RotationOutOfRange { index })
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn location(&self) -> Option<Point> {
        self.location
    }

    /// Pivot cell in rotation 0, `None` for rotation-invariant shapes
    pub fn pivot(&self) -> Option<Point> {
        self.pivot
    }

    pub fn is_rotation_invariant(&self) -> bool {
        self.pivot.is_none()
    }

    /// Where the pivot cell sits in `rotation`, relative to rotation 0
    pub fn offset(&self, rotation: Rotation) -> Point {
        self.offsets[rotation.index()]
    }

    /// Offset by raw rotation index
    pub fn offset_at_index(&self, index: usize) -> Result<Point> {
        self.offsets
            .get(index)
            .copied()
            .ok_or(EngineError::RotationOutOfRange { index })
    }

    /// Number of columns used by the current rotation
    pub fn width(&self) -> usize {
        self.shape().width()
    }

    pub fn move_to(&mut self, location: Point) {
        self.location = Some(location);
    }

    /// Set location and rotation together, with no pivot compensation
    pub fn place(&mut self, location: Point, rotation: Rotation) {
        self.location = Some(location);
        self.rotation = rotation;
    }

    /// Location after turning from the current rotation to `target` so that the
    /// pivot cell stays put. Unplaced pieces stay unplaced.
    pub fn location_after_rotation(&self, target: Rotation) -> Option<Point> {
        let location = self.location?;
        if self.pivot.is_none() {
            return Some(location);
        }
        Some(location + self.offset(self.rotation) - self.offset(target))
    }

    /// Rotate a quarter turn clockwise
    pub fn rotate(&mut self) {
        self.rotate_to(self.rotation.rotate_cw());
    }

    /// Rotate to `target`, shifting the location so the pivot cell does not move
    pub fn rotate_to(&mut self, target: Rotation) {
        self.location = self.location_after_rotation(target);
        self.rotation = target;
    }

    /// Playfield positions covered by this piece at `location` in `rotation`
    pub fn footprint(&self, location: Point, rotation: Rotation) -> impl Iterator<Item = Point> + '_ {
        self.shape_at(rotation)
            .filled_cells()
            .map(move |(row, col)| location + Point::new(col as i32, row as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Colour = Colour::new(200, 0, 0);

    fn t_tetromino() -> Shape {
        Shape::parse(&["....", "....", ".#..", "###."]).unwrap()
    }

    #[test]
    fn test_monomino_pivots_at_origin() {
        let shape = Shape::parse(&["#"]).unwrap();
        assert_eq!(find_pivot(&shape), Some(Point::ZERO));
    }

    #[test]
    fn test_square_is_rotation_invariant() {
        let square = Shape::parse(&["....", "....", "##..", "##.."]).unwrap();
        assert_eq!(find_pivot(&square), None);
    }

    #[test]
    fn test_square_away_from_corner_is_rotation_invariant() {
        let square = Shape::parse(&["....", ".##.", ".##.", "...."]).unwrap();
        assert_eq!(find_pivot(&square), None);

        let mut omino = Omino::new(square.clone(), RED, Rotation::North);
        assert!(omino.is_rotation_invariant());
        omino.move_to(Point::new(1, 1));
        omino.rotate();
        assert_eq!(omino.location(), Some(Point::new(1, 1)));
        assert_eq!(*omino.shape_at(Rotation::West), square);
    }

    #[test]
    fn test_t_pivot_is_bar_centre() {
        assert_eq!(find_pivot(&t_tetromino()), Some(Point::new(1, 3)));
    }

    #[test]
    fn test_even_width_prefers_filled_column() {
        // S tetromino: width 3 takes the middle column, lower cell (3, 1) is filled
        let s = Shape::parse(&["....", "....", ".##.", "##.."]).unwrap();
        assert_eq!(find_pivot(&s), Some(Point::new(1, 3)));

        // L tromino: width 2, both centre-row cells filled, so the left one stays
        let l = Shape::parse(&["...", "#..", "##."]).unwrap();
        assert_eq!(find_pivot(&l), Some(Point::new(0, 2)));
    }

    #[test]
    fn test_even_height_prefers_filled_row() {
        // Width and height both even
        let shape = Shape::parse(&["...", ".#.", "##."]).unwrap();
        // centre row 2: (2,0) filled, (2,1) filled -> left column 0
        // column 0: lower (2,0) filled -> lower row
        assert_eq!(find_pivot(&shape), Some(Point::new(0, 2)));

        let shape = Shape::parse(&["...", "##.", ".#."]).unwrap();
        // centre row 2: (2,0) empty, (2,1) filled -> right column 1
        // column 1: lower (2,1) filled -> lower row
        assert_eq!(find_pivot(&shape), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_rotation_family_tracks_pivot() {
        let omino = Omino::new(t_tetromino(), RED, Rotation::North);
        assert_eq!(omino.offset(Rotation::North), Point::ZERO);
        // East: vertical bar in column 0, rows 1-3, nub at (2, 1); pivot at (0, 2)
        assert_eq!(
            *omino.shape_at(Rotation::East),
            Shape::parse(&["....", "#...", "##..", "#..."]).unwrap()
        );
        assert_eq!(omino.offset(Rotation::East), Point::new(0, 2) - Point::new(1, 3));

        for rotation in Rotation::ALL {
            let pivot = omino.pivot().unwrap() + omino.offset(rotation);
            let shape = omino.shape_at(rotation);
            assert!(
                shape.get(pivot.y as usize, pivot.x as usize),
                "pivot should stay on a filled cell in {:?}",
                rotation
            );
        }
    }

    #[test]
    fn test_rotation_keeps_pivot_in_place() {
        let mut omino = Omino::new(t_tetromino(), RED, Rotation::North);
        omino.move_to(Point::new(3, 5));
        let anchor = |o: &Omino| o.location().unwrap() + o.pivot().unwrap() + o.offset(o.rotation());

        let before = anchor(&omino);
        for _ in 0..4 {
            omino.rotate();
            assert_eq!(anchor(&omino), before);
        }
        assert_eq!(omino.location(), Some(Point::new(3, 5)));
        assert_eq!(omino.rotation(), Rotation::North);
    }

    #[test]
    fn test_monomino_rotation_does_not_move() {
        let mono = Shape::parse(&["#"]).unwrap();
        let mut omino = Omino::new(mono, RED, Rotation::South);
        omino.move_to(Point::new(4, 4));
        omino.rotate();
        assert_eq!(omino.rotation(), Rotation::West);
        assert_eq!(omino.location(), Some(Point::new(4, 4)));

        let domino = Shape::parse(&["..", "##"]).unwrap();
        assert!(!Omino::new(domino, RED, Rotation::North).is_rotation_invariant());
    }

    #[test]
    fn test_index_accessors_reject_out_of_range() {
        let omino = Omino::new(t_tetromino(), RED, Rotation::North);
        assert!(omino.shape_at_index(3).is_ok());
        assert_eq!(
            omino.shape_at_index(4),
            Err(EngineError::RotationOutOfRange { index: 4 })
        );
        assert_eq!(
            omino.offset_at_index(9),
            Err(EngineError::RotationOutOfRange { index: 9 })
        );
    }

    #[test]
    fn test_footprint_translates_cells() {
        let omino = Omino::new(t_tetromino(), RED, Rotation::North);
        let cells: Vec<Point> = omino.footprint(Point::new(2, -2), Rotation::North).collect();
        assert_eq!(
            cells,
            vec![
                Point::new(3, 0),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 1)
            ]
        );
    }
}

//! Shape module - square boolean grids holding one polyomino
//!
//! A shape of order N is an N×N grid indexed `(row, col)` with row 0 at the top.
//! Uses a flat row-major `Vec<bool>` like the playfield grid.
//!
//! Two primitives are shared by the generator and the piece model:
//! [`Shape::rotated_cw`] turns the grid a quarter clockwise, and
//! [`Shape::moved_to_corner`] pushes the filled cells into the bottom-left corner.

use std::fmt;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    order: usize,
    /// Flat array of cells, row-major order (row * order + col)
    cells: Vec<bool>,
}

impl Shape {
    /// Create an empty order×order shape
    pub fn empty(order: usize) -> Self {
        Self {
            order,
            cells: vec![false; order * order],
        }
    }

    /// Build a shape from rows of booleans; rows must form a non-empty square
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let order = rows.len();
        if order == 0 {
            return Err(EngineError::EmptyShape);
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != order) {
            return Err(EngineError::NotSquare {
                rows: order,
                cols: bad.len(),
            });
        }
        Ok(Self {
            order,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Build a shape from text rows where `#` marks a filled cell
    ///
    /// ```
    /// use polyominohs_core::Shape;
    ///
    /// let shape = Shape::parse(&["..", "##"]).unwrap();
    /// assert_eq!(shape.filled_count(), 2);
    /// assert!(shape.get(1, 0));
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.order + col
    }

    /// Cell at (row, col); out of range reads as empty
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.order && col < self.order && self.cells[self.index(row, col)]
    }

    /// Set cell at (row, col)
    /// Returns false if out of range
    pub fn set(&mut self, row: usize, col: usize, filled: bool) -> bool {
        if row >= self.order || col >= self.order {
            return false;
        }
        let idx = self.index(row, col);
        self.cells[idx] = filled;
        true
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates `(row, col)` of every filled cell, top to bottom, left to right
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let order = self.order;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(idx, _)| (idx / order, idx % order))
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.order;
        &self.cells[start..start + self.order]
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.order).map(|r| self.row(r).to_vec()).collect()
    }

    /// Filled cells in the bottom row
    pub fn bottom_row_count(&self) -> usize {
        match self.order {
            0 => 0,
            n => self.row(n - 1).iter().filter(|&&c| c).count(),
        }
    }

    /// Filled cells in the left column
    pub fn left_column_count(&self) -> usize {
        (0..self.order).filter(|&r| self.get(r, 0)).count()
    }

    /// Number of columns holding at least one filled cell
    pub fn width(&self) -> usize {
        (0..self.order)
            .filter(|&c| (0..self.order).any(|r| self.get(r, c)))
            .count()
    }

    /// Number of rows holding at least one filled cell
    pub fn height(&self) -> usize {
        (0..self.order)
            .filter(|&r| self.row(r).iter().any(|&c| c))
            .count()
    }

    /// Number of entirely empty rows before the first filled one
    pub fn leading_empty_rows(&self) -> usize {
        (0..self.order)
            .take_while(|&r| !self.row(r).iter().any(|&c| c))
            .count()
    }

    /// Copy rotated 90° clockwise: cell (row, col) moves to (col, order - 1 - row)
    pub fn rotated_cw(&self) -> Shape {
        let n = self.order;
        let mut rotated = Shape::empty(n);
        for (row, col) in self.filled_cells() {
            rotated.set(col, n - 1 - row, true);
        }
        rotated
    }

    /// Copy pushed into the bottom-left corner, with the rows moved down and the
    /// columns moved left as `(shape, rows, cols)`
    pub fn moved_to_corner(&self) -> (Shape, usize, usize) {
        let n = self.order;
        let lowest = self.filled_cells().map(|(r, _)| r).max();
        let leftmost = self.filled_cells().map(|(_, c)| c).min();
        let (Some(lowest), Some(leftmost)) = (lowest, leftmost) else {
            return (self.clone(), 0, 0);
        };

        let rows = n - 1 - lowest;
        let cols = leftmost;
        let mut moved = Shape::empty(n);
        for (row, col) in self.filled_cells() {
            moved.set(row + rows, col - cols, true);
        }
        (moved, rows, cols)
    }

    /// True if every filled cell is reachable from every other through edge neighbours
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.filled_cells().next() else {
            return false;
        };
        let n = self.order;
        let mut seen = vec![false; n * n];
        let mut stack = vec![start];
        seen[self.index(start.0, start.1)] = true;
        let mut reached = 0;

        while let Some((row, col)) = stack.pop() {
            reached += 1;
            let neighbours = [
                (row.wrapping_sub(1), col),
                (row, col + 1),
                (row + 1, col),
                (row, col.wrapping_sub(1)),
            ];
            for (r, c) in neighbours {
                if self.get(r, c) && !seen[self.index(r, c)] {
                    seen[self.index(r, c)] = true;
                    stack.push((r, c));
                }
            }
        }

        reached == self.filled_count()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.order {
            let line: String = self
                .row(r)
                .iter()
                .map(|&c| if c { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_cw_l_shape() {
        let shape = Shape::parse(&["#..", "#..", "##."]).unwrap();
        let rotated = shape.rotated_cw();
        assert_eq!(rotated, Shape::parse(&["###", "#..", "..."]).unwrap());
    }

    #[test]
    fn test_four_rotations_identity() {
        let shape = Shape::parse(&["...", ".#.", "###"]).unwrap();
        let mut r = shape.clone();
        for _ in 0..4 {
            r = r.rotated_cw();
        }
        assert_eq!(r, shape);
    }

    #[test]
    fn test_moved_to_corner_counts_shifts() {
        let shape = Shape::parse(&["..#.", "..##", "....", "...."]).unwrap();
        let (moved, rows, cols) = shape.moved_to_corner();
        assert_eq!(rows, 2);
        assert_eq!(cols, 2);
        assert_eq!(moved, Shape::parse(&["....", "....", "#...", "##.."]).unwrap());
    }

    #[test]
    fn test_moved_to_corner_already_there() {
        let shape = Shape::parse(&["..", "##"]).unwrap();
        let (moved, rows, cols) = shape.moved_to_corner();
        assert_eq!((rows, cols), (0, 0));
        assert_eq!(moved, shape);
    }

    #[test]
    fn test_moved_to_corner_empty_shape() {
        let shape = Shape::empty(3);
        let (moved, rows, cols) = shape.moved_to_corner();
        assert_eq!(moved, shape);
        assert_eq!((rows, cols), (0, 0));
    }

    #[test]
    fn test_extents() {
        let shape = Shape::parse(&["....", ".#..", ".###", "...."]).unwrap();
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 2);
        assert_eq!(shape.leading_empty_rows(), 1);
        assert_eq!(shape.bottom_row_count(), 0);
        assert_eq!(shape.left_column_count(), 0);
    }

    #[test]
    fn test_connectivity() {
        assert!(Shape::parse(&["#.", "##"]).unwrap().is_connected());
        assert!(!Shape::parse(&["#.", ".#"]).unwrap().is_connected());
        assert!(!Shape::empty(2).is_connected());
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert_eq!(Shape::from_rows(&[]), Err(EngineError::EmptyShape));
        assert_eq!(
            Shape::from_rows(&[vec![true, false], vec![true]]),
            Err(EngineError::NotSquare { rows: 2, cols: 1 })
        );
    }

    #[test]
    fn test_display() {
        let shape = Shape::parse(&["#.", "##"]).unwrap();
        assert_eq!(shape.to_string(), "#.\n##\n");
    }
}

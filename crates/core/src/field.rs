//! Field module - the playfield and its falling piece
//!
//! The field owns the settled [`Grid`] and at most one active [`Omino`]. Every
//! mutation of the active piece is checked for collision first, so the piece never
//! overlaps settled cells or leaves the field.
//!
//! Active slot lifecycle:
//!
//! - **Empty**: no piece; `add_omino` fills the slot
//! - **Active**: the piece moves and rotates
//! - **Settled**: a blocked downward move writes the piece into the grid and empties
//!   the slot again
//!
//! A blocked spawn also empties the slot; callers treat that as the board being full.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::grid::Grid;
use crate::omino::Omino;
use crate::rng::SimpleRng;
use crate::types::{Direction, Point, Rotation};

/// True if `omino` at `location` in `rotation` would leave the grid or overlap a
/// settled cell
fn collides(grid: &Grid, omino: &Omino, location: Point, rotation: Rotation) -> bool {
    omino
        .footprint(location, rotation)
        .any(|p| !grid.is_valid(p.x, p.y))
}

#[derive(Debug, Clone)]
pub struct Field<R = SimpleRng> {
    order: usize,
    grid: Grid,
    omino: Option<Omino>,
    rng: R,
}

impl Field<SimpleRng> {
    /// Create an empty width×height field for pieces of the given order
    pub fn new(order: usize, width: usize, height: usize) -> Self {
        Self::with_rng(order, width, height, SimpleRng::default())
    }
}

impl<R: Rng> Field<R> {
    pub fn with_rng(order: usize, width: usize, height: usize, rng: R) -> Self {
        Self::with_grid(order, Grid::new(width, height), rng)
    }

    /// Create a field whose settled cells start out as `grid`
    pub fn with_grid(order: usize, grid: Grid, rng: R) -> Self {
        Self {
            order,
            grid,
            omino: None,
            rng,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// (width, height) of the field
    pub fn get_size(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// Settled cells, without the active piece
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The falling piece, if any
    pub fn get_omino(&self) -> Option<&Omino> {
        self.omino.as_ref()
    }

    /// Collision test for the active piece at `location` in `rotation`.
    /// With no active piece nothing can collide.
    pub fn collides_at(&self, location: Point, rotation: Rotation) -> bool {
        self.omino
            .as_ref()
            .is_some_and(|omino| collides(&self.grid, omino, location, rotation))
    }

    /// Drop `omino` in at the top centre of the field, replacing any active piece.
    ///
    /// If it does not fit in its current rotation the other three are tried in
    /// random order. Returns false, leaving the slot empty, if none fits.
    pub fn add_omino(&mut self, mut omino: Omino) -> bool {
        let x = (self.grid.width() / 2) as i32 - omino.width().div_ceil(2) as i32;
        // Put the top of the piece at the top of the field
        let y = -(omino.shape().leading_empty_rows() as i32);
        let location = Point::new(x, y);

        let current = omino.rotation();
        let chosen = if !collides(&self.grid, &omino, location, current) {
            Some(current)
        } else {
            let mut others: ArrayVec<Rotation, 3> = Rotation::ALL
                .iter()
                .copied()
                .filter(|&r| r != current)
                .collect();
            others.shuffle(&mut self.rng);
            others
                .into_iter()
                .find(|&r| !collides(&self.grid, &omino, location, r))
        };

        match chosen {
            Some(rotation) => {
                omino.place(location, rotation);
                trace!(?location, ?rotation, "spawned omino");
                self.omino = Some(omino);
                true
            }
            None => {
                debug!(?location, "spawn blocked in every rotation");
                self.omino = None;
                false
            }
        }
    }

    /// Move the active piece one cell. A blocked move down settles the piece into
    /// the grid; both that and a blocked sideways move return false.
    pub fn move_omino(&mut self, direction: Direction) -> bool {
        let Some(omino) = self.omino.as_ref() else {
            return false;
        };
        let Some(location) = omino.location() else {
            return false;
        };

        let candidate = location + direction.delta();
        if !collides(&self.grid, omino, candidate, omino.rotation()) {
            if let Some(omino) = self.omino.as_mut() {
                omino.move_to(candidate);
            }
            return true;
        }

        if direction == Direction::Down {
            self.settle();
        }
        false
    }

    /// Rotate the active piece a quarter turn clockwise around its pivot, if the
    /// turned piece fits
    pub fn rotate_omino(&mut self) -> bool {
        let Some(omino) = self.omino.as_ref() else {
            return false;
        };
        let target = omino.rotation().rotate_cw();
        let Some(location) = omino.location_after_rotation(target) else {
            return false;
        };
        if collides(&self.grid, omino, location, target) {
            return false;
        }

        if let Some(omino) = self.omino.as_mut() {
            omino.place(location, target);
        }
        true
    }

    /// Write the active piece into the grid and empty the slot
    fn settle(&mut self) {
        let Some(omino) = self.omino.take() else {
            return;
        };
        let Some(location) = omino.location() else {
            return;
        };
        let cells = omino
            .footprint(location, omino.rotation())
            .map(|p| (p.x, p.y));
        self.grid.fill(cells, omino.colour());
        debug!(?location, rotation = ?omino.rotation(), "omino settled");
    }

    /// Clear full rows and return how many there were
    pub fn check(&mut self) -> usize {
        let cleared = self.grid.clear_full_rows();
        if !cleared.is_empty() {
            debug!(rows = ?cleared, "cleared lines");
        }
        cleared.len()
    }

    /// Copy of the settled grid with the active piece drawn in
    pub fn get_complete_grid(&self) -> Grid {
        let mut complete = self.grid.clone();
        if let Some(omino) = &self.omino {
            if let Some(location) = omino.location() {
                let cells = omino
                    .footprint(location, omino.rotation())
                    .map(|p| (p.x, p.y));
                complete.fill(cells, omino.colour());
            }
        }
        complete
    }
}

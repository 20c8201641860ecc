//! Snapshot module - serializable view of a session
//!
//! Snapshots own deep copies of every row, so they stay valid after the session
//! moves on and can be handed to a renderer or written out as JSON.

use serde::{Deserialize, Serialize};

use crate::omino::Omino;
use crate::types::{Cell, Colour, Point, Rotation};

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub colour: Colour,
    /// Pivot in rotation 0, absent for rotation-invariant pieces
    pub pivot: Option<Point>,
}

impl ActiveSnapshot {
    /// `None` for a piece that has not been placed on a field
    pub fn from_omino(omino: &Omino) -> Option<Self> {
        let location = omino.location()?;
        Some(Self {
            rotation: omino.rotation(),
            x: location.x,
            y: location.y,
            colour: omino.colour(),
            pivot: omino.pivot(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub order: usize,
    pub level: u32,
    pub width: usize,
    pub height: usize,
    /// Settled cells with the active piece drawn in, top row first
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    /// Shape of the upcoming piece in its spawn rotation
    pub next: Vec<Vec<bool>>,
    pub next_colour: Colour,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Number of filled cells on the board, active piece included
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

//! Cell coordinates and inclusive boxes for the layered grid (no grid dependency).
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A cell position. Signed so that geometry near the grid edge can step outside it;
/// the grid is responsible for rejecting such cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct CellCoord {
    pub column: i32,
    pub row: i32,
    pub layer: i32,
}

impl CellCoord {
    pub const ORIGIN: CellCoord = CellCoord {
        column: 0,
        row: 0,
        layer: 0,
    };

    #[inline]
    pub const fn new(column: i32, row: i32, layer: i32) -> Self {
        Self { column, row, layer }
    }

    /// Same column/row on another layer.
    #[inline]
    pub const fn on_layer(self, layer: i32) -> Self {
        Self {
            column: self.column,
            row: self.row,
            layer,
        }
    }

    #[inline]
    pub fn component_min(self, rhs: CellCoord) -> CellCoord {
        CellCoord::new(
            self.column.min(rhs.column),
            self.row.min(rhs.row),
            self.layer.min(rhs.layer),
        )
    }

    #[inline]
    pub fn component_max(self, rhs: CellCoord) -> CellCoord {
        CellCoord::new(
            self.column.max(rhs.column),
            self.row.max(rhs.row),
            self.layer.max(rhs.layer),
        )
    }
}

impl From<(i32, i32, i32)> for CellCoord {
    #[inline]
    fn from((column, row, layer): (i32, i32, i32)) -> Self {
        CellCoord::new(column, row, layer)
    }
}

impl Add for CellCoord {
    type Output = CellCoord;
    #[inline]
    fn add(self, rhs: CellCoord) -> CellCoord {
        CellCoord::new(
            self.column + rhs.column,
            self.row + rhs.row,
            self.layer + rhs.layer,
        )
    }
}

impl AddAssign for CellCoord {
    #[inline]
    fn add_assign(&mut self, rhs: CellCoord) {
        self.column += rhs.column;
        self.row += rhs.row;
        self.layer += rhs.layer;
    }
}

impl Sub for CellCoord {
    type Output = CellCoord;
    #[inline]
    fn sub(self, rhs: CellCoord) -> CellCoord {
        CellCoord::new(
            self.column - rhs.column,
            self.row - rhs.row,
            self.layer - rhs.layer,
        )
    }
}

/// Step direction along one axis when walking from `from` towards `to`.
/// A zero delta still walks forward so the single cell on that axis is visited.
#[inline]
pub fn axis_step(from: i32, to: i32) -> i32 {
    match (to - from).signum() {
        0 => 1,
        s => s,
    }
}

/// Axis-aligned box of cells, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellBox {
    pub min: CellCoord,
    pub max: CellCoord,
}

impl CellBox {
    /// Box spanning two arbitrary corners.
    #[inline]
    pub fn from_corners(a: CellCoord, b: CellCoord) -> Self {
        Self {
            min: a.component_min(b),
            max: a.component_max(b),
        }
    }

    #[inline]
    pub fn contains(&self, c: CellCoord) -> bool {
        c.column >= self.min.column
            && c.column <= self.max.column
            && c.row >= self.min.row
            && c.row <= self.max.row
            && c.layer >= self.min.layer
            && c.layer <= self.max.layer
    }

    /// Cell counts along (column, row, layer).
    #[inline]
    pub fn extent(&self) -> (usize, usize, usize) {
        (
            (self.max.column - self.min.column + 1) as usize,
            (self.max.row - self.min.row + 1) as usize,
            (self.max.layer - self.min.layer + 1) as usize,
        )
    }

    #[inline]
    pub fn volume(&self) -> usize {
        let (w, h, d) = self.extent();
        w * h * d
    }
}

/// Cursor movement on the current layer. `Up` decreases the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s {
            "up" | "north" => Some(Direction::Up),
            "left" | "west" => Some(Direction::Left),
            "down" | "south" => Some(Direction::Down),
            "right" | "east" => Some(Direction::Right),
            _ => None,
        }
    }
}

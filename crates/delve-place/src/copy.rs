use delve_catalog::MaterialCode;
use delve_geom::{CellBox, CellCoord};
use delve_grid::{Grid, GridError};
use delve_select::free_box_cells;

use crate::commit::CommitReport;
use crate::error::{CellFailure, CellFault, PlacementError};

/// Snapshot of a free-style box, stored relative to the box's minimum corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyBuffer {
    columns: usize,
    rows: usize,
    layers: usize,
    codes: Vec<MaterialCode>,
}

impl CopyBuffer {
    /// Capture exactly the cells a free-style gesture from `anchor` to `cursor` selects.
    pub fn capture(grid: &Grid, anchor: CellCoord, cursor: CellCoord) -> Result<Self, GridError> {
        let bx = CellBox::from_corners(anchor, cursor);
        let (columns, rows, layers) = bx.extent();
        let mut codes = vec![0; columns * rows * layers];
        for cell in free_box_cells(anchor, cursor) {
            let rel = cell - bx.min;
            let i = (rel.layer as usize * rows + rel.row as usize) * columns + rel.column as usize;
            codes[i] = grid.get(cell)?;
        }
        log::debug!(
            target: "place",
            "captured {}x{}x{} cells at ({}, {}, layer {})",
            columns,
            rows,
            layers,
            bx.min.column,
            bx.min.row,
            bx.min.layer
        );
        Ok(Self {
            columns,
            rows,
            layers,
            codes,
        })
    }

    /// (columns, rows, layers)
    #[inline]
    pub fn extent(&self) -> (usize, usize, usize) {
        (self.columns, self.rows, self.layers)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Offsets from the minimum corner with their captured codes.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, MaterialCode)> + '_ {
        let (columns, rows) = (self.columns, self.rows);
        self.codes.iter().enumerate().map(move |(i, &code)| {
            let column = i % columns;
            let row = (i / columns) % rows;
            let layer = i / (columns * rows);
            (CellCoord::new(column as i32, row as i32, layer as i32), code)
        })
    }
}

/// Write the buffer with its minimum corner at `origin`. Cells that land outside
/// the grid are skipped and reported.
pub fn paste(grid: &mut Grid, buffer: &CopyBuffer, origin: CellCoord) -> Result<CommitReport, PlacementError> {
    let mut written = 0;
    let mut failures = Vec::new();
    for (offset, code) in buffer.iter() {
        let cell = origin + offset;
        match grid.set(cell, code) {
            Ok(()) => written += 1,
            Err(e) => failures.push(CellFailure {
                cell,
                fault: CellFault::OutOfBounds(e),
            }),
        }
    }
    if failures.is_empty() {
        log::debug!(target: "place", "pasted {} cell(s)", written);
        Ok(CommitReport { written })
    } else {
        log::warn!(target: "place", "paste clipped: {} cell(s) outside the grid", failures.len());
        Err(PlacementError::Incomplete { written, failures })
    }
}

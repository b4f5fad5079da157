//! Layered grid storage.
#![forbid(unsafe_code)]

use delve_catalog::{Material, MaterialCode};
use delve_geom::CellCoord;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({}, {}, layer {}) is outside a {layers}x{rows}x{columns} grid", .cell.column, .cell.row, .cell.layer)]
    OutOfBounds {
        cell: CellCoord,
        layers: usize,
        rows: usize,
        columns: usize,
    },
    #[error("grid dimensions must be non-zero (got {layers}x{rows}x{columns})")]
    EmptyDimension {
        layers: usize,
        rows: usize,
        columns: usize,
    },
    #[error("a {layers}x{rows}x{columns} grid exceeds {} cells", MAX_CELLS)]
    TooLarge {
        layers: usize,
        rows: usize,
        columns: usize,
    },
    #[error("nested grid data does not match its dimensions: {0}")]
    Shape(&'static str),
}

/// Largest grid a single map may hold.
pub const MAX_CELLS: usize = 1 << 28;

/// Dense `layers × rows × columns` array of material codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    layers: usize,
    rows: usize,
    columns: usize,
    cells: Vec<MaterialCode>,
}

impl Grid {
    pub fn new(layers: usize, rows: usize, columns: usize, fill: MaterialCode) -> Result<Self, GridError> {
        if layers == 0 || rows == 0 || columns == 0 {
            return Err(GridError::EmptyDimension {
                layers,
                rows,
                columns,
            });
        }
        let len = layers
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(columns))
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(GridError::TooLarge {
                layers,
                rows,
                columns,
            })?;
        Ok(Grid {
            layers,
            rows,
            columns,
            cells: vec![fill; len],
        })
    }

    /// Grid of solid filler, the starting state of a fresh map.
    pub fn solid(layers: usize, rows: usize, columns: usize) -> Result<Self, GridError> {
        Self::new(layers, rows, columns, Material::FILLER.code())
    }

    #[inline]
    pub fn layers(&self) -> usize {
        self.layers
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn idx(&self, layer: usize, row: usize, column: usize) -> usize {
        (layer * self.rows + row) * self.columns + column
    }

    #[inline]
    pub fn contains(&self, c: CellCoord) -> bool {
        c.layer >= 0
            && c.row >= 0
            && c.column >= 0
            && (c.layer as usize) < self.layers
            && (c.row as usize) < self.rows
            && (c.column as usize) < self.columns
    }

    #[inline]
    fn checked_idx(&self, c: CellCoord) -> Result<usize, GridError> {
        if !self.contains(c) {
            return Err(GridError::OutOfBounds {
                cell: c,
                layers: self.layers,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(self.idx(c.layer as usize, c.row as usize, c.column as usize))
    }

    pub fn get(&self, c: CellCoord) -> Result<MaterialCode, GridError> {
        let i = self.checked_idx(c)?;
        Ok(self.cells[i])
    }

    pub fn set(&mut self, c: CellCoord, code: MaterialCode) -> Result<(), GridError> {
        let i = self.checked_idx(c)?;
        self.cells[i] = code;
        Ok(())
    }

    /// Unchecked read for callers that already hold in-range indices.
    #[inline]
    pub fn get_local(&self, layer: usize, row: usize, column: usize) -> MaterialCode {
        self.cells[self.idx(layer, row, column)]
    }

    /// One layer in row-major order.
    pub fn layer_slice(&self, layer: usize) -> Option<&[MaterialCode]> {
        if layer >= self.layers {
            return None;
        }
        let len = self.rows * self.columns;
        let start = layer * len;
        Some(&self.cells[start..start + len])
    }

    #[inline]
    pub fn cells(&self) -> &[MaterialCode] {
        &self.cells
    }

    /// `[layer][row][column]` nesting used by the persisted document.
    pub fn to_nested(&self) -> Vec<Vec<Vec<MaterialCode>>> {
        self.cells
            .chunks(self.rows * self.columns)
            .map(|layer| layer.chunks(self.columns).map(|row| row.to_vec()).collect())
            .collect()
    }

    pub fn from_nested(
        layers: usize,
        rows: usize,
        columns: usize,
        nested: &[Vec<Vec<MaterialCode>>],
    ) -> Result<Self, GridError> {
        if nested.len() != layers {
            return Err(GridError::Shape("layer count"));
        }
        for layer in nested {
            if layer.len() != rows {
                return Err(GridError::Shape("row count"));
            }
            if layer.iter().any(|row| row.len() != columns) {
                return Err(GridError::Shape("column count"));
            }
        }
        let mut grid = Self::new(layers, rows, columns, Material::EMPTY.code())?;
        for (chunk, row) in grid.cells.chunks_mut(columns).zip(nested.iter().flatten()) {
            chunk.copy_from_slice(row);
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            Grid::new(0, 4, 4, 2),
            Err(GridError::EmptyDimension { layers: 0, .. })
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2, 2, 2),
            Err(GridError::TooLarge { layers: usize::MAX, .. })
        ));
        assert!(matches!(Grid::new(1, 1 << 15, 1 << 14, 2), Err(GridError::TooLarge { .. })));
        assert!(Grid::new(1, 1 << 14, 1 << 14, 2).is_ok());
    }

    #[test]
    fn out_of_bounds_never_clamps() {
        let mut g = Grid::solid(2, 3, 4).unwrap();
        for c in [
            CellCoord::new(-1, 0, 0),
            CellCoord::new(0, -1, 0),
            CellCoord::new(0, 0, -1),
            CellCoord::new(4, 0, 0),
            CellCoord::new(0, 3, 0),
            CellCoord::new(0, 0, 2),
        ] {
            assert!(matches!(g.get(c), Err(GridError::OutOfBounds { cell, .. }) if cell == c));
            assert!(g.set(c, 0).is_err());
        }
        assert!(g.cells().iter().all(|&v| v == Material::FILLER.code()));
    }

    #[test]
    fn set_is_visible_to_get() {
        let mut g = Grid::solid(3, 3, 3).unwrap();
        let c = CellCoord::new(2, 1, 0);
        g.set(c, Material::Floor.code()).unwrap();
        assert_eq!(g.get(c), Ok(Material::Floor.code()));
        assert_eq!(g.get_local(0, 1, 2), Material::Floor.code());
        assert_eq!(g.layer_slice(0).unwrap()[1 * 3 + 2], Material::Floor.code());
        assert!(g.layer_slice(3).is_none());
    }

    #[test]
    fn nested_shape_mismatch_is_reported() {
        let nested = vec![vec![vec![0u8; 2]; 2]; 1];
        assert!(Grid::from_nested(1, 2, 2, &nested).is_ok());
        assert_eq!(Grid::from_nested(2, 2, 2, &nested), Err(GridError::Shape("layer count")));
        assert_eq!(Grid::from_nested(1, 2, 3, &nested), Err(GridError::Shape("column count")));
    }
}

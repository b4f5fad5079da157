use std::time::Instant;

use delve_geom::CellCoord;
use delve_grid::{Grid, GridError};

use crate::visibility::{DisplayDescriptor, ViewError, Visibility};

/// One draw pass over a whole layer.
#[derive(Clone, Debug)]
pub struct LayerView {
    pub layer: usize,
    pub rows: usize,
    pub columns: usize,
    cells: Vec<Option<DisplayDescriptor>>,
}

impl LayerView {
    pub fn build(vis: &Visibility, grid: &Grid, layer: usize) -> Result<Self, ViewError> {
        if layer >= grid.layers() {
            return Err(ViewError::OutOfBounds(GridError::OutOfBounds {
                cell: CellCoord::new(0, 0, layer as i32),
                layers: grid.layers(),
                rows: grid.rows(),
                columns: grid.columns(),
            }));
        }
        let t0 = Instant::now();
        let (rows, columns) = (grid.rows(), grid.columns());
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(vis.resolve(grid, layer as i32, column as i32, row as i32)?);
            }
        }
        log::debug!(
            "layer {} draw pass: {}x{} cells in {:.2}ms",
            layer,
            columns,
            rows,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(LayerView {
            layer,
            rows,
            columns,
            cells,
        })
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<&DisplayDescriptor> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells[row * self.columns + column].as_ref()
    }

    /// Row-major iteration: ((column, row), descriptor).
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Option<&DisplayDescriptor>)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, d)| ((i % columns, i / columns), d.as_ref()))
    }

    pub fn drawn_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_catalog::Material;

    #[test]
    fn layer_pass_matches_single_cell_resolve() {
        let mut g = Grid::solid(3, 4, 5).unwrap();
        g.set(CellCoord::new(2, 2, 2), Material::Empty.code()).unwrap();
        g.set(CellCoord::new(2, 2, 1), Material::Empty.code()).unwrap();
        g.set(CellCoord::new(2, 2, 0), Material::Ramp.code()).unwrap();
        g.set(CellCoord::new(0, 0, 2), Material::Floor.code()).unwrap();
        let vis = Visibility::default();
        let view = LayerView::build(&vis, &g, 2).unwrap();
        for row in 0..4 {
            for column in 0..5 {
                let single = vis.resolve(&g, 2, column as i32, row as i32).unwrap();
                assert_eq!(view.get(column, row).copied(), single, "({column},{row})");
            }
        }
        assert_eq!(view.get(2, 2).unwrap().peek_depth, 2);
        assert!(view.get(5, 0).is_none());
    }

    #[test]
    fn layer_out_of_range_is_an_error() {
        let g = Grid::solid(1, 2, 2).unwrap();
        assert!(LayerView::build(&Visibility::default(), &g, 1).is_err());
    }
}

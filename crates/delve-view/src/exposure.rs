use delve_catalog::Material;
use delve_geom::CellCoord;
use delve_grid::{Grid, GridError};

/// A filler cell is exposed when any of its same-layer neighbours (3×3 minus
/// itself, clipped at the grid edge) holds something other than filler.
pub fn is_exposed(grid: &Grid, layer: i32, column: i32, row: i32) -> Result<bool, GridError> {
    let center = CellCoord::new(column, row, layer);
    grid.get(center)?;
    let filler = Material::FILLER.code();
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let n = CellCoord::new(column + dc, row + dr, layer);
            if !grid.contains(n) {
                continue;
            }
            if grid.get_local(n.layer as usize, n.row as usize, n.column as usize) != filler {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

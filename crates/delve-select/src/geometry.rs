use delve_catalog::{Footprint, ModeDescriptor, SelectionStyle};
use delve_geom::{CellBox, CellCoord, axis_step};

/// Cells of a footprint side that sit before the cursor. Even sides put the
/// extra cell after the cursor: 3 → 1 before, 4 → 1 before and 2 after.
#[inline]
pub fn preceding_cells(side: u32) -> i32 {
    let half = (side / 2) as i32;
    if side > 1 && side % 2 == 0 { half - 1 } else { half }
}

/// Stamp area around `cursor`, on the cursor's layer only.
pub fn fixed_footprint(fp: Footprint, cursor: CellCoord) -> CellBox {
    let left = cursor.column - preceding_cells(fp.width);
    let top = cursor.row - preceding_cells(fp.height);
    CellBox {
        min: CellCoord::new(left, top, cursor.layer),
        max: CellCoord::new(
            left + fp.width as i32 - 1,
            top + fp.height as i32 - 1,
            cursor.layer,
        ),
    }
}

/// Every cell of the inclusive box from `anchor` to `cursor`, walked outward from
/// the anchor: layer outermost, then column, then row.
pub fn free_box_cells(anchor: CellCoord, cursor: CellCoord) -> Vec<CellCoord> {
    let delta = cursor - anchor;
    let (sl, sc, sr) = (
        axis_step(anchor.layer, cursor.layer),
        axis_step(anchor.column, cursor.column),
        axis_step(anchor.row, cursor.row),
    );
    let (nl, nc, nr) = (delta.layer.abs(), delta.column.abs(), delta.row.abs());
    let mut out = Vec::with_capacity(((nl + 1) * (nc + 1) * (nr + 1)) as usize);
    for l in 0..=nl {
        for c in 0..=nc {
            for r in 0..=nr {
                out.push(anchor + CellCoord::new(c * sc, r * sr, l * sl));
            }
        }
    }
    out
}

/// Cells a finalized gesture affects. Fixed style ignores `anchor` and yields the
/// footprint in row-major order, which is the order recipes are consumed in.
pub fn selected_cells(mode: &ModeDescriptor, cursor: CellCoord, anchor: CellCoord) -> Vec<CellCoord> {
    match mode.style {
        SelectionStyle::Free | SelectionStyle::Copy => free_box_cells(anchor, cursor),
        SelectionStyle::Fixed => {
            let Some(fp) = mode.footprint else {
                return Vec::new();
            };
            let b = fixed_footprint(fp, cursor);
            let mut out = Vec::with_capacity(fp.area());
            for row in b.min.row..=b.max.row {
                for column in b.min.column..=b.max.column {
                    out.push(CellCoord::new(column, row, cursor.layer));
                }
            }
            out
        }
    }
}

/// Whether (column, row) on the cursor's layer falls inside the mode's stamp.
/// Always false for non-fixed modes.
pub fn is_in_fixed_footprint(mode: &ModeDescriptor, cursor: CellCoord, column: i32, row: i32) -> bool {
    match (mode.style, mode.footprint) {
        (SelectionStyle::Fixed, Some(fp)) => {
            fixed_footprint(fp, cursor).contains(CellCoord::new(column, row, cursor.layer))
        }
        _ => false,
    }
}

use delve_catalog::{ModeDescriptor, SelectionStyle};
use delve_geom::{CellBox, CellCoord};

use crate::geometry::is_in_fixed_footprint;
use crate::state::SelectionState;

/// How a cell should be tinted for the current gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    Selection,
    Cursor,
}

/// Display-only query. During a fixed-style gesture the highlight is a plain 3×3
/// around the cursor regardless of the stamp size; placement uses the real footprint.
pub fn highlight(mode: &ModeDescriptor, state: &SelectionState, cell: CellCoord) -> Highlight {
    let cursor = state.cursor;
    let at_cursor = cell == cursor;

    if state.in_progress {
        let inside = match mode.style {
            SelectionStyle::Fixed => {
                cell.layer == cursor.layer
                    && (cell.column - cursor.column).abs() <= 1
                    && (cell.row - cursor.row).abs() <= 1
            }
            SelectionStyle::Free | SelectionStyle::Copy => {
                CellBox::from_corners(state.anchor_or_cursor(), cursor).contains(cell)
            }
        };
        return match (inside, at_cursor) {
            (true, true) => Highlight::Cursor,
            (true, false) => Highlight::Selection,
            (false, _) => Highlight::None,
        };
    }

    if at_cursor {
        return match mode.style {
            SelectionStyle::Fixed => Highlight::Cursor,
            SelectionStyle::Free | SelectionStyle::Copy => Highlight::Selection,
        };
    }
    if cell.layer == cursor.layer && is_in_fixed_footprint(mode, cursor, cell.column, cell.row) {
        return Highlight::Selection;
    }
    Highlight::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_catalog::{Footprint, Material, RecipeEntry};

    fn free() -> ModeDescriptor {
        ModeDescriptor::free("dig", vec![RecipeEntry::always(Material::Floor)])
    }

    fn stamp5() -> ModeDescriptor {
        ModeDescriptor::fixed("depot", Footprint::new(5, 5), &[Material::TradingSolid; 25])
    }

    #[test]
    fn idle_free_mode_highlights_only_cursor() {
        let s = SelectionState::at(CellCoord::new(3, 3, 1));
        assert_eq!(highlight(&free(), &s, CellCoord::new(3, 3, 1)), Highlight::Selection);
        assert_eq!(highlight(&free(), &s, CellCoord::new(4, 3, 1)), Highlight::None);
    }

    #[test]
    fn idle_fixed_mode_shows_whole_stamp() {
        let s = SelectionState::at(CellCoord::new(10, 10, 0));
        let m = stamp5();
        assert_eq!(highlight(&m, &s, CellCoord::new(10, 10, 0)), Highlight::Cursor);
        assert_eq!(highlight(&m, &s, CellCoord::new(8, 12, 0)), Highlight::Selection);
        assert_eq!(highlight(&m, &s, CellCoord::new(13, 10, 0)), Highlight::None);
        assert_eq!(highlight(&m, &s, CellCoord::new(9, 9, 1)), Highlight::None);
    }

    #[test]
    fn free_gesture_highlights_box_and_cursor() {
        let mut s = SelectionState::at(CellCoord::new(2, 2, 0));
        s.begin();
        s.cursor = CellCoord::new(4, 3, 0);
        let m = free();
        assert_eq!(highlight(&m, &s, CellCoord::new(4, 3, 0)), Highlight::Cursor);
        assert_eq!(highlight(&m, &s, CellCoord::new(2, 2, 0)), Highlight::Selection);
        assert_eq!(highlight(&m, &s, CellCoord::new(3, 3, 0)), Highlight::Selection);
        assert_eq!(highlight(&m, &s, CellCoord::new(5, 3, 0)), Highlight::None);
    }

    #[test]
    fn fixed_gesture_uses_three_by_three() {
        let mut s = SelectionState::at(CellCoord::new(10, 10, 0));
        s.in_progress = true;
        let m = stamp5();
        assert_eq!(highlight(&m, &s, CellCoord::new(11, 11, 0)), Highlight::Selection);
        // Inside the 5x5 stamp but outside the 3x3 display box.
        assert_eq!(highlight(&m, &s, CellCoord::new(12, 12, 0)), Highlight::None);
    }
}

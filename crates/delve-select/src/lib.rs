//! Which cells a gesture touches, for each selection style.
#![forbid(unsafe_code)]

mod geometry;
mod highlight;
mod state;

pub use geometry::{fixed_footprint, free_box_cells, is_in_fixed_footprint, preceding_cells, selected_cells};
pub use highlight::{Highlight, highlight};
pub use state::SelectionState;

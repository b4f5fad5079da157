//! Writing materials into selected cells.
#![forbid(unsafe_code)]

mod commit;
mod copy;
mod error;

pub use commit::{CommitReport, commit, draw_weighted};
pub use copy::{CopyBuffer, paste};
pub use error::{CellFailure, CellFault, PlacementError};

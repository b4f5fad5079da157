use delve_geom::CellCoord;
use delve_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellFault {
    #[error(transparent)]
    OutOfBounds(#[from] GridError),
    #[error("stamp cell #{index} has no recipe entry (recipe has {recipe_len})")]
    RecipeMismatch { index: usize, recipe_len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    pub cell: CellCoord,
    pub fault: CellFault,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    /// Some cells were skipped; every other cell was written.
    #[error("{} cell(s) left unmodified, {written} written", .failures.len())]
    Incomplete {
        written: usize,
        failures: Vec<CellFailure>,
    },
    #[error("mode `{label}` has no materials to place")]
    EmptyRecipe { label: String },
}

impl PlacementError {
    pub fn failures(&self) -> &[CellFailure] {
        match self {
            PlacementError::Incomplete { failures, .. } => failures,
            PlacementError::EmptyRecipe { .. } => &[],
        }
    }
}

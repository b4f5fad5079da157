use delve_catalog::{Material, ModeDescriptor, RecipeEntry, SelectionStyle};
use delve_geom::CellCoord;
use delve_grid::Grid;
use rand::Rng;

use crate::error::{CellFailure, CellFault, PlacementError};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub written: usize,
}

/// Weighted pick for a draw `r` in [0, 1): the first entry whose cumulative
/// weight reaches `r`. Weights are not renormalised; if rounding leaves `r`
/// above the final cumulative weight the last entry wins.
pub fn draw_weighted(recipe: &[RecipeEntry], r: f64) -> Option<Material> {
    let mut sum = 0.0;
    for e in recipe {
        sum += e.weight;
        if r <= sum {
            return Some(e.material);
        }
    }
    recipe.last().map(|e| e.material)
}

/// Write the mode's materials into `cells`. Every cell is attempted; cells that
/// cannot be written are collected and returned, the rest stay written.
pub fn commit<R: Rng + ?Sized>(
    grid: &mut Grid,
    mode: &ModeDescriptor,
    cells: &[CellCoord],
    rng: &mut R,
) -> Result<CommitReport, PlacementError> {
    let mut written = 0;
    let mut failures = Vec::new();

    match mode.style {
        SelectionStyle::Free => {
            let single = match mode.recipe.as_slice() {
                [] => {
                    return Err(PlacementError::EmptyRecipe {
                        label: mode.label.clone(),
                    });
                }
                [only] => Some(only.material),
                _ => None,
            };
            for &cell in cells {
                let material = match single {
                    Some(m) => m,
                    None => draw_weighted(&mode.recipe, rng.r#gen::<f64>()).unwrap_or(Material::EMPTY),
                };
                match grid.set(cell, material.code()) {
                    Ok(()) => written += 1,
                    Err(e) => failures.push(CellFailure {
                        cell,
                        fault: CellFault::OutOfBounds(e),
                    }),
                }
            }
        }
        SelectionStyle::Fixed => {
            for (index, &cell) in cells.iter().enumerate() {
                let Some(entry) = mode.recipe.get(index) else {
                    failures.push(CellFailure {
                        cell,
                        fault: CellFault::RecipeMismatch {
                            index,
                            recipe_len: mode.recipe.len(),
                        },
                    });
                    continue;
                };
                match grid.set(cell, entry.material.code()) {
                    Ok(()) => written += 1,
                    Err(e) => failures.push(CellFailure {
                        cell,
                        fault: CellFault::OutOfBounds(e),
                    }),
                }
            }
        }
        SelectionStyle::Copy => {
            log::debug!(target: "place", "commit on copy mode `{}` writes nothing", mode.label);
        }
    }

    if failures.is_empty() {
        log::debug!(target: "place", "`{}` wrote {} cell(s)", mode.label, written);
        return Ok(CommitReport { written });
    }
    for f in &failures {
        log::warn!(
            target: "place",
            "`{}` skipped ({}, {}, layer {}): {}",
            mode.label,
            f.cell.column,
            f.cell.row,
            f.cell.layer,
            f.fault
        );
    }
    Err(PlacementError::Incomplete { written, failures })
}

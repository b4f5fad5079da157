//! Map documents: the JSON shape a grid is saved to and loaded from.
#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use delve_catalog::{Material, MaterialCode};
use delve_geom::CellCoord;
use delve_grid::{Grid, GridError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("map file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("map document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map document shape: {0}")]
    Shape(#[from] GridError),
    #[error("cell ({}, {}, layer {}) holds unknown material code {code}", .cell.column, .cell.row, .cell.layer)]
    UnknownMaterial { code: MaterialCode, cell: CellCoord },
}

/// `{layerCount, rowCount, columnCount, grid}` with `grid[layer][row][column]`.
/// The older `layers`/`layerRows`/`layerColumns`/`map` keys are read too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    #[serde(alias = "layers")]
    pub layer_count: usize,
    #[serde(alias = "layerRows")]
    pub row_count: usize,
    #[serde(alias = "layerColumns")]
    pub column_count: usize,
    #[serde(alias = "map")]
    pub grid: Vec<Vec<Vec<MaterialCode>>>,
}

impl GridDocument {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            layer_count: grid.layers(),
            row_count: grid.rows(),
            column_count: grid.columns(),
            grid: grid.to_nested(),
        }
    }

    /// Rebuild the grid, checking nesting against the declared dimensions and
    /// every code against the material catalog.
    pub fn into_grid(self) -> Result<Grid, IoError> {
        for (l, layer) in self.grid.iter().enumerate() {
            for (r, row) in layer.iter().enumerate() {
                if let Some((c, &code)) = row
                    .iter()
                    .enumerate()
                    .find(|(_, code)| Material::from_code(**code).is_none())
                {
                    return Err(IoError::UnknownMaterial {
                        code,
                        cell: CellCoord::new(c as i32, r as i32, l as i32),
                    });
                }
            }
        }
        Ok(Grid::from_nested(
            self.layer_count,
            self.row_count,
            self.column_count,
            &self.grid,
        )?)
    }
}

pub fn to_json(grid: &Grid) -> Result<String, IoError> {
    Ok(serde_json::to_string(&GridDocument::from_grid(grid))?)
}

pub fn from_json(s: &str) -> Result<Grid, IoError> {
    let doc: GridDocument = serde_json::from_str(s)?;
    doc.into_grid()
}

pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let json = to_json(grid)?;
    fs::write(path, json).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })?;
    log::info!(
        "saved {}x{}x{} map to {}",
        grid.layers(),
        grid.rows(),
        grid.columns(),
        path.display()
    );
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Grid, IoError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })?;
    let grid = from_json(&s)?;
    log::info!(
        "loaded {}x{}x{} map from {}",
        grid.layers(),
        grid.rows(),
        grid.columns(),
        path.display()
    );
    Ok(grid)
}

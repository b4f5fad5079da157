use delve_catalog::{Material, MaterialCode, RenderStyle, Rgba};
use delve_geom::CellCoord;
use delve_grid::{Grid, GridError};
use thiserror::Error;

use crate::exposure::is_exposed;

/// Deepest run of empty cells the resolver will look through.
pub const DEFAULT_MAX_PEEK_DEPTH: u8 = 5;
/// Alpha applied to anything seen through at least one empty cell.
pub const DEFAULT_PEEK_ALPHA: u8 = 0x77;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error(transparent)]
    OutOfBounds(#[from] GridError),
    #[error("cell ({}, {}, layer {}) holds unknown material code {code}", .cell.column, .cell.row, .cell.layer)]
    UnknownMaterial { code: MaterialCode, cell: CellCoord },
}

/// Resolved appearance of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayDescriptor {
    pub material: Material,
    pub color: Rgba,
    pub style: RenderStyle,
    pub glyph: Option<char>,
    /// Empty cells passed through to reach `material`; 0 means it sits on the viewed layer.
    pub peek_depth: u8,
}

impl DisplayDescriptor {
    #[inline]
    pub fn is_peek(&self) -> bool {
        self.peek_depth > 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub max_peek_depth: u8,
    pub peek_alpha: u8,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            max_peek_depth: DEFAULT_MAX_PEEK_DEPTH,
            peek_alpha: DEFAULT_PEEK_ALPHA,
        }
    }
}

impl Visibility {
    pub fn new(max_peek_depth: u8, peek_alpha: u8) -> Self {
        Self {
            max_peek_depth,
            peek_alpha,
        }
    }

    /// What to draw at (column, row) when viewing `layer`; `None` means nothing.
    pub fn resolve(
        &self,
        grid: &Grid,
        layer: i32,
        column: i32,
        row: i32,
    ) -> Result<Option<DisplayDescriptor>, ViewError> {
        let mut cell = CellCoord::new(column, row, layer);
        let mut code = grid.get(cell)?;
        let mut depth: u8 = 0;
        let material = loop {
            let material =
                Material::from_code(code).ok_or(ViewError::UnknownMaterial { code, cell })?;
            if material == Material::EMPTY {
                if cell.layer == 0 || depth >= self.max_peek_depth {
                    return Ok(None);
                }
                depth += 1;
                cell.layer -= 1;
                code = grid.get(cell)?;
                continue;
            }
            if material == Material::FILLER && !is_exposed(grid, cell.layer, cell.column, cell.row)? {
                return Ok(None);
            }
            break material;
        };

        let desc = material.descriptor();
        let alpha = if depth > 0 { self.peek_alpha } else { u8::MAX };
        Ok(Some(DisplayDescriptor {
            material,
            color: desc.color.with_alpha(alpha),
            style: desc.style,
            glyph: desc.glyph(depth > 0),
            peek_depth: depth,
        }))
    }
}

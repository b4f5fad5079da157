//! Material and mode catalogs.
#![forbid(unsafe_code)]

pub mod error;
pub mod material;
pub mod mode;
pub mod types;

pub use error::CatalogError;
pub use material::{Material, MaterialDescriptor};
pub use mode::{Footprint, Mode, ModeCatalog, ModeDescriptor, RecipeEntry, SelectionStyle};
pub use types::{MaterialCode, RenderStyle, Rgb, Rgba};

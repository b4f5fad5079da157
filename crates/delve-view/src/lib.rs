//! What a cell looks like from a given layer: peeking through empty cells and
//! hiding buried filler.
#![forbid(unsafe_code)]

mod exposure;
mod layer;
mod visibility;

pub use exposure::is_exposed;
pub use layer::LayerView;
pub use visibility::{DEFAULT_MAX_PEEK_DEPTH, DEFAULT_PEEK_ALPHA, DisplayDescriptor, ViewError, Visibility};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("mode `{label}` is malformed: {reason}")]
    MalformedModeDescriptor { label: String, reason: String },
    #[error("unknown mode `{0}`")]
    UnknownMode(String),
}

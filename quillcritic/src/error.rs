//! Error kinds for the critique pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CritiqueError {
    /// Request rejected before anything is sent.
    #[error("Essay text cannot be empty.")]
    EmptyEssay,
    /// Transport failure or a schema-violating response from the model.
    /// Carries a human-readable message; the caller may retry.
    #[error("{0}")]
    Service(String),
}

impl CritiqueError {
    pub fn service(msg: impl std::fmt::Display) -> Self {
        CritiqueError::Service(format!(
            "Failed to get a critique from the model: {}",
            msg
        ))
    }
}

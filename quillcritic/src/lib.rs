//! quillcritic — the critique pipeline for Quill.
//!
//! A pure library: the structured response contract handed to the model,
//! prompt construction, the blocking model client, and normalization of
//! the returned payload. No GUI dependency; everything except the actual
//! network call is unit-testable offline.

pub mod error;
pub mod prompt;
pub mod sample;
pub mod schema;
pub mod service;

pub use error::CritiqueError;
pub use prompt::EssayInputs;
pub use schema::{AnalysisResponse, Priority};
pub use service::CritiqueService;

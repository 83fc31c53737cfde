//! Drafting session errors.

use kontrak_templates::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("No template selected")]
    NoActiveTemplate,

    /// The generation service failed; details are logged, never surfaced
    #[error("Failed to generate contract. Please try again.")]
    GenerationFailed,

    #[error("Export failed for {filename}: {reason}")]
    Export { filename: String, reason: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

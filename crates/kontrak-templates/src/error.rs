//! Template loading and validation errors.
//!
//! Only catalog construction can fail. Selection, resolution and assembly
//! are total over loaded templates and never return these errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("Invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Duplicate clause id '{clause}' in template '{template}'")]
    DuplicateClause { template: String, clause: String },

    #[error(
        "Clause '{clause}' in template '{template}' references undeclared placeholder {{{placeholder}}}"
    )]
    UndeclaredPlaceholder {
        template: String,
        clause: String,
        placeholder: String,
    },

    #[error("Failed to parse template file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse built-in template '{name}': {source}")]
    Builtin {
        name: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Kontrak: contract drafting from clause templates
//!
//! Pick a template, choose its optional clauses, fill its placeholders and
//! get back the assembled contract text, paginated for export.
//!
//! - [`DraftSession`]: one active draft over a shared [`TemplateCatalog`]
//! - [`KontrakConfig`]: templates directory, export directory, generation
//!   endpoint and page layout
//! - [`export`]: export and clipboard collaborators
//! - [`generation`]: the contract generation service boundary
//!
//! The pure engine lives in `kontrak-templates` (selection, resolution,
//! assembly) and `kontrak-layout` (pagination); both are re-exported here.

pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod session;

pub use config::KontrakConfig;
pub use error::DraftError;
pub use export::{export_filename, Clipboard, Exporter, LayoutFileExporter, StdoutClipboard};
pub use generation::{
    generate_contract, ContractGenerator, GenerationRequest, GenerationResponse,
    HttpContractGenerator,
};
pub use session::{ActiveDraft, DraftSession, ExportOutcome};

pub use kontrak_layout as layout;
pub use kontrak_templates as templates;

pub use kontrak_layout::{PageLayout, Pagination, Paginator};
pub use kontrak_templates::{TemplateCatalog, TemplateError};

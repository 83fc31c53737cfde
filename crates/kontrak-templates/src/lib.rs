//! Contract Templates for Document Drafting
//!
//! A template is an ordered list of clauses; clause bodies carry `{NAME}`
//! placeholder tokens. Drafting a document is three pure steps:
//!
//! - pick clauses: [`ClauseSelector`] keeps required clauses selected
//! - fill values: [`PlaceholderResolver`] updates [`PlaceholderValues`]
//! - assemble: [`DocumentAssembler`] renders the selected clauses in template
//!   order, leaving `[NAME]` where a value is missing
//!
//! # Example
//!
//! ```yaml
//! id: cooperation
//! name: Cooperation Agreement
//! category: business
//! placeholders:
//!   - A
//!   - B
//!   - name: MONTHS
//!     label: Duration (months)
//!     example: "12"
//! clauses:
//!   - id: parties
//!     title: Parties
//!     content: "Agreement between {A} and {B}"
//!     required: true
//!   - id: term
//!     title: Term
//!     content: "Valid for {MONTHS} months"
//! ```

mod assembler;
pub mod builtin;
mod catalog;
mod completeness;
mod definition;
mod error;
mod placeholders;
mod selection;

pub use assembler::{DocumentAssembler, BLOCK_SEPARATOR};
pub use catalog::TemplateCatalog;
pub use completeness::{CompletenessCheck, CompletenessReport, MissingPlaceholder};
pub use definition::{humanize, placeholder_tokens, Clause, PlaceholderDefinition, Template};
pub use error::TemplateError;
pub use placeholders::{
    PlaceholderGroup, PlaceholderGrouping, PlaceholderResolver, PlaceholderValues,
};
pub use selection::{ClauseSelector, SelectionState};

//! Drafting session
//!
//! Holds the template catalog and at most one active draft. Every mutation
//! goes through the pure selection and resolver operations and replaces the
//! draft's state wholesale; outputs are derived on demand.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kontrak_layout::{PageLayout, Pagination, Paginator};
use kontrak_templates::{
    ClauseSelector, CompletenessCheck, CompletenessReport, DocumentAssembler, PlaceholderResolver,
    PlaceholderValues, SelectionState, Template, TemplateCatalog,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DraftError;
use crate::export::{export_filename, Clipboard, Exporter};

/// Working state for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDraft {
    pub template_id: String,
    pub selection: SelectionState,
    pub values: PlaceholderValues,
    /// User document title; the template name is used when unset
    pub title: Option<String>,
}

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutcome {
    pub filename: String,
    pub location: std::path::PathBuf,
    pub page_count: usize,
}

pub struct DraftSession {
    catalog: Arc<TemplateCatalog>,
    layout: PageLayout,
    draft: Option<ActiveDraft>,
}

impl DraftSession {
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self {
            catalog,
            layout: PageLayout::default(),
            draft: None,
        }
    }

    /// Page layout used by [`export`](Self::export)
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn draft(&self) -> Option<&ActiveDraft> {
        self.draft.as_ref()
    }

    /// Start a fresh draft from a template, discarding any current one
    pub fn select_template(&mut self, template_id: &str) -> Result<&ActiveDraft, DraftError> {
        let template = self
            .catalog
            .get(template_id)
            .ok_or_else(|| DraftError::UnknownTemplate(template_id.to_string()))?;

        if let Some(previous) = &self.draft {
            debug!(
                previous = %previous.template_id,
                next = %template.id,
                "discarding draft"
            );
        }
        info!(template = %template.id, "Selected template");

        Ok(&*self.draft.insert(ActiveDraft {
            template_id: template.id.clone(),
            selection: ClauseSelector::initialize(template),
            values: PlaceholderValues::new(),
            title: None,
        }))
    }

    /// Template of the active draft
    pub fn template(&self) -> Result<&Template, DraftError> {
        self.active().map(|(template, _)| template)
    }

    /// Flip an optional clause; required and unknown clauses are left as they are
    pub fn toggle_clause(&mut self, clause_id: &str) -> Result<(), DraftError> {
        self.update(|template, draft| {
            draft.selection = ClauseSelector::toggle(&draft.selection, template, clause_id);
        })
    }

    /// Include or exclude an optional clause
    pub fn set_clause(&mut self, clause_id: &str, included: bool) -> Result<(), DraftError> {
        self.update(|template, draft| {
            draft.selection =
                ClauseSelector::set_included(&draft.selection, template, clause_id, included);
        })
    }

    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        let (name, value) = (name.into(), value.into());
        self.update(|_, draft| {
            draft.values = PlaceholderResolver::set(&draft.values, name, value);
        })
    }

    /// Set or clear the document title
    pub fn set_title(&mut self, title: Option<String>) -> Result<(), DraftError> {
        self.update(|_, draft| draft.title = title)
    }

    /// Replace all values with the template's examples
    pub fn fill_samples(&mut self) -> Result<(), DraftError> {
        self.update(|template, draft| {
            draft.values = PlaceholderResolver::fill_samples(template);
        })
    }

    pub fn clear_values(&mut self) -> Result<(), DraftError> {
        self.update(|_, draft| draft.values = PlaceholderResolver::clear())
    }

    /// Assembled document text for the current draft
    pub fn assemble(&self) -> Result<String, DraftError> {
        let (template, draft) = self.active()?;
        Ok(DocumentAssembler::assemble(
            template,
            &draft.selection,
            &draft.values,
            draft.title.as_deref(),
        ))
    }

    /// Placeholders the selected clauses still need
    pub fn validate(&self) -> Result<CompletenessReport, DraftError> {
        let (template, draft) = self.active()?;
        Ok(CompletenessCheck::validate(
            template,
            &draft.selection,
            &draft.values,
        ))
    }

    pub fn paginate(&self, layout: &PageLayout) -> Result<Pagination, DraftError> {
        Ok(Paginator::paginate(&self.assemble()?, layout))
    }

    /// Hand the assembled text to a clipboard unchanged
    pub fn copy_to(&self, clipboard: &dyn Clipboard) -> Result<(), DraftError> {
        let document = self.assemble()?;
        clipboard.copy(&document)?;
        debug!(chars = document.len(), "copied document");
        Ok(())
    }

    /// Paginate with the session layout and hand the result to an exporter
    pub fn export(
        &self,
        exporter: &dyn Exporter,
        now: DateTime<Utc>,
    ) -> Result<ExportOutcome, DraftError> {
        let pagination = self.paginate(&self.layout)?;
        let filename = export_filename(now);
        let location = exporter.export(&filename, &self.layout, &pagination)?;
        info!(file = %filename, pages = pagination.page_count, "Exported document");

        Ok(ExportOutcome {
            filename,
            location,
            page_count: pagination.page_count,
        })
    }

    fn active(&self) -> Result<(&Template, &ActiveDraft), DraftError> {
        let draft = self.draft.as_ref().ok_or(DraftError::NoActiveTemplate)?;
        let template = self
            .catalog
            .get(&draft.template_id)
            .ok_or_else(|| DraftError::UnknownTemplate(draft.template_id.clone()))?;
        Ok((template, draft))
    }

    fn update(
        &mut self,
        apply: impl FnOnce(&Template, &mut ActiveDraft),
    ) -> Result<(), DraftError> {
        let draft = self.draft.as_mut().ok_or(DraftError::NoActiveTemplate)?;
        let template = self
            .catalog
            .get(&draft.template_id)
            .ok_or_else(|| DraftError::UnknownTemplate(draft.template_id.clone()))?;
        apply(template, draft);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kontrak_templates::Clause;
    use pretty_assertions::assert_eq;

    use super::*;

    fn session() -> DraftSession {
        let template = Template {
            id: "coop".to_string(),
            name: "Cooperation".to_string(),
            description: String::new(),
            category: "business".to_string(),
            placeholders: ["A", "B", "MONTHS"]
                .into_iter()
                .map(kontrak_templates::PlaceholderDefinition::new)
                .collect(),
            clauses: vec![
                Clause::new("c1", "Parties", "Agreement between {A} and {B}", true),
                Clause::new("c2", "Term", "Valid for {MONTHS} months", false),
            ],
        };
        let catalog = TemplateCatalog::new(vec![template]).unwrap();
        DraftSession::new(Arc::new(catalog))
    }

    #[test]
    fn test_operations_need_an_active_draft() {
        let mut session = session();
        assert!(matches!(session.assemble(), Err(DraftError::NoActiveTemplate)));
        assert!(matches!(
            session.toggle_clause("c2"),
            Err(DraftError::NoActiveTemplate)
        ));
        assert!(matches!(
            session.set_value("A", "x"),
            Err(DraftError::NoActiveTemplate)
        ));
    }

    #[test]
    fn test_unknown_template() {
        let mut session = session();
        assert!(matches!(
            session.select_template("nope"),
            Err(DraftError::UnknownTemplate(id)) if id == "nope"
        ));
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_draft_flow() {
        let mut session = session();
        session.select_template("coop").unwrap();
        session.set_value("A", "Acme").unwrap();
        session.set_value("B", "Globex").unwrap();
        session.set_title(Some("Pact".to_string())).unwrap();
        assert_eq!(session.assemble().unwrap(), "PACT\n\nAgreement between Acme and Globex");

        session.toggle_clause("c2").unwrap();
        assert_eq!(
            session.assemble().unwrap(),
            "PACT\n\nAgreement between Acme and Globex\n\nValid for [MONTHS] months"
        );
        assert_eq!(session.validate().unwrap().missing[0].name, "MONTHS");

        // required clause stays
        session.set_clause("c1", false).unwrap();
        assert!(session.draft().unwrap().selection.contains("c1"));
    }

    #[test]
    fn test_reselecting_starts_fresh() {
        let mut session = session();
        session.select_template("coop").unwrap();
        session.set_value("A", "Acme").unwrap();
        session.toggle_clause("c2").unwrap();

        let draft = session.select_template("coop").unwrap();
        assert!(draft.values.is_empty());
        assert!(!draft.selection.contains("c2"));
    }
}

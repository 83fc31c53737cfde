//! Completeness check for a draft
//!
//! Advisory pass listing placeholders that the selected clauses reference
//! but that have no usable value yet. Assembly does not consult it.

use std::collections::HashMap;

use serde::Serialize;

use crate::placeholders::{PlaceholderGroup, PlaceholderResolver};
use crate::{PlaceholderValues, SelectionState, Template};

/// A placeholder that still needs a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingPlaceholder {
    pub name: String,
    /// Human-readable label
    pub label: String,
    pub example: Option<String>,
    pub group: PlaceholderGroup,
    /// Selected clauses that reference it, in template order
    pub clause_ids: Vec<String>,
}

/// Result of checking a draft for unfilled placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    pub template_id: String,
    /// Placeholders that have a value
    pub filled: Vec<String>,
    /// Placeholders still needing values
    pub missing: Vec<MissingPlaceholder>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Format missing placeholders as a prompt for the user
    pub fn format_prompt(&self) -> String {
        if self.missing.is_empty() {
            return String::new();
        }

        let mut prompt = String::from("Please provide the following:\n");
        for placeholder in &self.missing {
            prompt.push_str(&format!("- {} ({})", placeholder.label, placeholder.name));
            if let Some(ref example) = placeholder.example {
                prompt.push_str(&format!(" (e.g., {})", example));
            }
            prompt.push('\n');
        }
        prompt
    }
}

pub struct CompletenessCheck;

impl CompletenessCheck {
    /// Check the placeholders referenced by the selected clauses
    pub fn validate(
        template: &Template,
        selection: &SelectionState,
        values: &PlaceholderValues,
    ) -> CompletenessReport {
        let mut order: Vec<&str> = Vec::new();
        let mut clauses_by_name: HashMap<&str, Vec<String>> = HashMap::new();

        for clause in selection.selected_clauses(template) {
            for name in clause.placeholder_names() {
                let referenced_by = clauses_by_name.entry(name).or_insert_with(|| {
                    order.push(name);
                    Vec::new()
                });
                referenced_by.push(clause.id.clone());
            }
        }

        let mut filled = Vec::new();
        let mut missing = Vec::new();
        for name in order {
            if values.resolved(name).is_some() {
                filled.push(name.to_string());
                continue;
            }
            let definition = template.placeholder(name);
            missing.push(MissingPlaceholder {
                name: name.to_string(),
                label: PlaceholderResolver::label(template, name),
                example: definition.and_then(|d| d.example.clone()),
                group: PlaceholderResolver::classify(name),
                clause_ids: clauses_by_name.remove(name).unwrap_or_default(),
            });
        }

        CompletenessReport {
            template_id: template.id.clone(),
            filled,
            missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Clause, ClauseSelector, DocumentAssembler, PlaceholderDefinition};

    fn template() -> Template {
        Template {
            id: "lease".to_string(),
            name: "Lease".to_string(),
            description: String::new(),
            category: "property".to_string(),
            placeholders: vec![
                PlaceholderDefinition::new("PARTY1_NAME").with_label("Landlord"),
                PlaceholderDefinition::new("PARTY2_NAME").with_example("Budi"),
                PlaceholderDefinition::new("RENT_AMOUNT"),
                PlaceholderDefinition::new("DEPOSIT_AMOUNT"),
            ],
            clauses: vec![
                Clause::new("parties", "Parties", "{PARTY1_NAME} leases to {PARTY2_NAME}.", true),
                Clause::new("rent", "Rent", "{PARTY2_NAME} pays {RENT_AMOUNT}.", true),
                Clause::new("deposit", "Deposit", "Deposit of {DEPOSIT_AMOUNT}.", false),
            ],
        }
    }

    #[test]
    fn test_reports_only_selected_clause_placeholders() {
        let template = template();
        let selection = ClauseSelector::initialize(&template);
        let values: PlaceholderValues = [("PARTY1_NAME", "Siti")].into_iter().collect();

        let report = CompletenessCheck::validate(&template, &selection, &values);

        assert!(!report.is_complete());
        assert_eq!(report.filled, vec!["PARTY1_NAME"]);
        let names: Vec<&str> = report.missing.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["PARTY2_NAME", "RENT_AMOUNT"]);
        assert_eq!(report.missing[0].clause_ids, vec!["parties", "rent"]);
        assert_eq!(report.missing[0].group, PlaceholderGroup::SecondParty);
    }

    #[test]
    fn test_complete_when_all_filled() {
        let template = template();
        let selection = ClauseSelector::initialize(&template);
        let values = PlaceholderResolver::fill_samples(&template);

        let report = CompletenessCheck::validate(&template, &selection, &values);
        assert!(report.is_complete());
        assert_eq!(report.format_prompt(), "");
    }

    #[test]
    fn test_validation_does_not_change_assembly() {
        let template = template();
        let selection = ClauseSelector::initialize(&template);
        let values = PlaceholderValues::new();

        let before = DocumentAssembler::assemble(&template, &selection, &values, None);
        let _ = CompletenessCheck::validate(&template, &selection, &values);
        let after = DocumentAssembler::assemble(&template, &selection, &values, None);
        assert_eq!(before, after);
        assert!(after.contains("[RENT_AMOUNT]"));
    }

    #[test]
    fn test_format_prompt() {
        let template = template();
        let selection = ClauseSelector::initialize(&template);
        let report = CompletenessCheck::validate(&template, &selection, &PlaceholderValues::new());

        let prompt = report.format_prompt();
        assert!(prompt.starts_with("Please provide the following:\n"));
        assert!(prompt.contains("- Landlord (PARTY1_NAME)\n"));
        assert!(prompt.contains("- Party2 Name (PARTY2_NAME) (e.g., Budi)\n"));
    }
}

//! Built-in contract templates embedded at compile time.
//!
//! All YAML files under `crates/kontrak-templates/templates/` are compiled
//! into the binary via [`include_str!`], so the catalog is available without
//! a templates directory on disk.
//!
//! When adding or removing template files, update [`BUILTIN_SOURCES`].

use crate::{Template, TemplateError};

/// The total number of built-in templates.
pub const BUILTIN_TEMPLATE_COUNT: usize = 5;

const BUILTIN_SOURCES: [(&str, &str); BUILTIN_TEMPLATE_COUNT] = [
    (
        "service_agreement",
        include_str!("../templates/service_agreement.yaml"),
    ),
    (
        "employment_contract",
        include_str!("../templates/employment_contract.yaml"),
    ),
    (
        "non_disclosure_agreement",
        include_str!("../templates/non_disclosure_agreement.yaml"),
    ),
    (
        "lease_agreement",
        include_str!("../templates/lease_agreement.yaml"),
    ),
    (
        "sale_purchase_agreement",
        include_str!("../templates/sale_purchase_agreement.yaml"),
    ),
];

/// Parse the built-in templates in catalog order.
///
/// # Errors
///
/// Returns `TemplateError::Builtin` if an embedded file is not a valid
/// template document.
pub fn builtin_templates() -> Result<Vec<Template>, TemplateError> {
    BUILTIN_SOURCES
        .iter()
        .map(|&(name, yaml)| {
            serde_yaml::from_str(yaml).map_err(|source| TemplateError::Builtin { name, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TemplateCatalog;

    #[test]
    fn test_should_parse_all_builtin_templates() {
        let templates = builtin_templates().unwrap();
        assert_eq!(templates.len(), BUILTIN_TEMPLATE_COUNT);
    }

    #[test]
    fn test_builtin_catalog_validates() {
        let catalog = TemplateCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), BUILTIN_TEMPLATE_COUNT);

        for id in [
            "service-agreement",
            "employment-contract",
            "non-disclosure-agreement",
            "lease-agreement",
            "sale-purchase-agreement",
        ] {
            assert!(catalog.get(id).is_some(), "Missing template: {id}");
        }
    }

    #[test]
    fn test_every_builtin_has_required_clause_and_examples() {
        for template in builtin_templates().unwrap() {
            assert!(
                template.required_clauses().next().is_some(),
                "Template '{}' has no required clause",
                template.id,
            );
            for placeholder in &template.placeholders {
                assert!(
                    placeholder.example.is_some(),
                    "Placeholder '{}' of '{}' has no example",
                    placeholder.name,
                    template.id,
                );
            }
        }
    }
}

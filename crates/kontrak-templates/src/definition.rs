//! Template Definition Types
//!
//! YAML schema for contract templates. A template is an ordered list of
//! clauses whose bodies reference `{NAME}` placeholder tokens.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::TemplateError;

/// Matches a `{NAME}` placeholder token. Anything else in braces is literal text.
pub(crate) static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("static token pattern"));

/// Placeholder names referenced by `content`, in order of appearance (repeats included).
pub fn placeholder_tokens(content: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// A complete template definition loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier (e.g., "service-agreement")
    pub id: String,

    /// Human-readable name, also the default document title
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Catalog category (e.g., "business", "employment")
    pub category: String,

    /// Placeholder names the clauses may reference
    #[serde(default)]
    pub placeholders: Vec<PlaceholderDefinition>,

    /// Clauses in assembly order
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

/// A titled block of contract text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,

    pub title: String,

    /// Clause body with `{NAME}` placeholders
    pub content: String,

    /// Required clauses can never be deselected
    #[serde(default, alias = "isRequired")]
    pub required: bool,
}

/// Placeholder declaration
///
/// In YAML either a bare name or a mapping with optional label/example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlaceholderSpec")]
pub struct PlaceholderDefinition {
    pub name: String,

    /// Form label shown to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Sample value used by "fill with sample data"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaceholderSpec {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        example: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<PlaceholderSpec> for PlaceholderDefinition {
    fn from(spec: PlaceholderSpec) -> Self {
        match spec {
            PlaceholderSpec::Name(name) => PlaceholderDefinition::new(name),
            PlaceholderSpec::Full {
                name,
                label,
                example,
                description,
            } => PlaceholderDefinition {
                name,
                label,
                example,
                description,
            },
        }
    }
}

impl PlaceholderDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            example: None,
            description: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Declared label, or the name humanised (`PARTY1_NAME` -> `Party1 Name`)
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => humanize(&self.name),
        }
    }
}

/// `START_DATE` -> `Start Date`
pub fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Clause {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            required,
        }
    }

    /// Distinct placeholder names in this clause, first occurrence first
    pub fn placeholder_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        placeholder_tokens(&self.content)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

impl Template {
    /// Declared placeholder names in declaration order
    pub fn placeholder_names(&self) -> Vec<&str> {
        self.placeholders.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn placeholder(&self, name: &str) -> Option<&PlaceholderDefinition> {
        self.placeholders.iter().find(|p| p.name == name)
    }

    pub fn clause(&self, clause_id: &str) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.id == clause_id)
    }

    pub fn required_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(|c| c.required)
    }

    pub fn optional_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(|c| !c.required)
    }

    /// Placeholder names referenced by any clause, first occurrence first
    pub fn referenced_placeholders(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.clauses
            .iter()
            .flat_map(|c| placeholder_tokens(&c.content))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Structural checks run when a template enters a catalog
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.id.trim().is_empty() {
            return Err(TemplateError::InvalidTemplate {
                template: self.name.clone(),
                reason: "template id is empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(TemplateError::InvalidTemplate {
                template: self.id.clone(),
                reason: "template name is empty".to_string(),
            });
        }

        let mut declared = HashSet::new();
        for placeholder in &self.placeholders {
            if !declared.insert(placeholder.name.as_str()) {
                return Err(TemplateError::InvalidTemplate {
                    template: self.id.clone(),
                    reason: format!("placeholder '{}' declared twice", placeholder.name),
                });
            }
        }

        let mut clause_ids = HashSet::new();
        for clause in &self.clauses {
            if clause.id.trim().is_empty() {
                return Err(TemplateError::InvalidTemplate {
                    template: self.id.clone(),
                    reason: format!("clause '{}' has an empty id", clause.title),
                });
            }
            if !clause_ids.insert(clause.id.as_str()) {
                return Err(TemplateError::DuplicateClause {
                    template: self.id.clone(),
                    clause: clause.id.clone(),
                });
            }
            if let Some(name) = placeholder_tokens(&clause.content).find(|n| !declared.contains(n))
            {
                return Err(TemplateError::UndeclaredPlaceholder {
                    template: self.id.clone(),
                    clause: clause.id.clone(),
                    placeholder: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

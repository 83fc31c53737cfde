//! Template Catalog - immutable store of contract templates
//!
//! Built from the compiled-in templates or from a directory of YAML files.
//! Lookups never fail: unknown ids return `None` and unmatched queries
//! return an empty list.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::builtin::builtin_templates;
use crate::{Template, TemplateError};

/// Immutable, ordered collection of validated templates
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

/// A YAML file holds either one template or a `templates:` list
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    Many { templates: Vec<Template> },
    One(Box<Template>),
}

impl TemplateCatalog {
    /// Validate and index templates, keeping their order
    pub fn new(templates: Vec<Template>) -> Result<Self, TemplateError> {
        let mut index = HashMap::with_capacity(templates.len());
        for (position, template) in templates.iter().enumerate() {
            template.validate()?;
            if index.insert(template.id.clone(), position).is_some() {
                return Err(TemplateError::DuplicateTemplate(template.id.clone()));
            }
        }
        Ok(Self { templates, index })
    }

    /// Catalog of the templates compiled into the crate
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::new(builtin_templates()?)
    }

    /// Load every `*.yaml` / `*.yml` file in `dir`, in file name order
    ///
    /// A missing directory yields an empty catalog.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            warn!("Templates directory does not exist: {:?}", dir);
            return Ok(Self::default());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut templates = Vec::new();
        for path in &paths {
            debug!("Loading templates from {:?}", path);
            templates.extend(Self::load_file(path)?);
        }

        let catalog = Self::new(templates)?;
        info!("Loaded {} templates from {:?}", catalog.len(), dir);
        Ok(catalog)
    }

    /// Parse one YAML template file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Template>, TemplateError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: TemplateFile =
            serde_yaml::from_str(&content).map_err(|source| TemplateError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(match file {
            TemplateFile::Many { templates } => templates,
            TemplateFile::One(template) => vec![*template],
        })
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Free-text search
    ///
    /// Case-insensitive substring match on name, description or category,
    /// or exact match on category. A blank query matches nothing.
    pub fn find(&self, query: &str) -> Vec<&Template> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.templates
            .iter()
            .filter(|t| {
                t.category == query.trim()
                    || t.name.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Exact category filter; unknown categories yield nothing
    pub fn by_category(&self, category: &str) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for template in &self.templates {
            if !categories.contains(&template.category.as_str()) {
                categories.push(&template.category);
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::Clause;

    fn template(id: &str, name: &str, category: &str, description: &str) -> Template {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            placeholders: Vec::new(),
            clauses: vec![Clause::new("body", "Body", "Text", true)],
        }
    }

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::new(vec![
            template("nda", "Non-Disclosure Agreement", "business", "Keeps secrets"),
            template("lease", "Lease Agreement", "property", "Rent a house"),
            template("job", "Employment Contract", "employment", "Hire staff for business"),
        ])
        .unwrap()
    }

    #[test]
    fn test_list_preserves_order() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["nda", "lease", "job"]);
    }

    #[test]
    fn test_find_is_case_insensitive_over_all_fields() {
        let catalog = catalog();

        let by_name: Vec<&str> = catalog.find("LEASE").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(by_name, vec!["lease"]);

        // "business" is nda's category and appears in job's description
        let by_text: Vec<&str> = catalog
            .find("Business")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(by_text, vec!["nda", "job"]);
    }

    #[test]
    fn test_find_unknown_or_blank_is_empty() {
        let catalog = catalog();
        assert!(catalog.find("zzz-unknown").is_empty());
        assert!(catalog.find("").is_empty());
        assert!(catalog.find("   ").is_empty());
        assert!(catalog.by_category("maritime").is_empty());
    }

    #[test]
    fn test_find_trims_the_category_query() {
        let catalog = TemplateCatalog::new(vec![template("x", "X", "HR", "")]).unwrap();
        let ids: Vec<&str> = catalog.find("  HR ").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["x"]);
    }

    #[test]
    fn test_get_and_categories() {
        let catalog = catalog();
        assert_eq!(catalog.get("job").unwrap().name, "Employment Contract");
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.categories(), vec!["business", "property", "employment"]);
    }

    #[test]
    fn test_duplicate_template_id_rejected() {
        let result = TemplateCatalog::new(vec![
            template("nda", "A", "business", ""),
            template("nda", "B", "business", ""),
        ]);
        assert!(matches!(result, Err(TemplateError::DuplicateTemplate(id)) if id == "nda"));
    }

    #[test]
    fn test_load_from_dir_single_and_list_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b_list.yaml"),
            r#"
templates:
  - id: second
    name: Second
    category: misc
    clauses:
      - id: c1
        title: One
        content: "Hello"
        required: true
  - id: third
    name: Third
    category: misc
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("a_single.yml"),
            "id: first\nname: First\ncategory: misc\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.md"), "# ignored").unwrap();

        let catalog = TemplateCatalog::load_from_dir(dir.path()).unwrap();
        let ids: Vec<&str> = catalog.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_load_from_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TemplateCatalog::load_from_dir(dir.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.yaml"), "id: [unterminated").unwrap();

        let err = TemplateCatalog::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }
}

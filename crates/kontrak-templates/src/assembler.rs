//! Document Assembler
//!
//! Turns (template, selection, values) into the final document text.
//! Assembly is total and deterministic: unfilled placeholders become a
//! visible `[NAME]` marker instead of an error.

use regex::Captures;

use crate::definition::TOKEN_RE;
use crate::{PlaceholderValues, SelectionState, Template};

/// Separator between the title and between clause bodies
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Builds document text from a template
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Assemble the document
    ///
    /// 1. Keep the selected clauses in template order
    /// 2. Substitute `{NAME}` tokens (missing or blank values become `[NAME]`)
    /// 3. Join clause bodies with a blank line
    /// 4. Prepend the upper-cased title (user title, else template name)
    pub fn assemble(
        template: &Template,
        selection: &SelectionState,
        values: &PlaceholderValues,
        title: Option<&str>,
    ) -> String {
        let body = selection
            .selected_clauses(template)
            .into_iter()
            .map(|clause| Self::substitute(&clause.content, values))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR);

        let title = Self::title_line(template, title);
        if body.is_empty() {
            title
        } else {
            format!("{}{}{}", title, BLOCK_SEPARATOR, body)
        }
    }

    /// Replace every `{NAME}` token in one pass
    ///
    /// Substituted values are not rescanned, so a value containing braces is
    /// inserted literally.
    pub fn substitute(content: &str, values: &PlaceholderValues) -> String {
        TOKEN_RE
            .replace_all(content, |caps: &Captures| {
                let name = &caps[1];
                match values.resolved(name) {
                    Some(value) => value.to_string(),
                    None => Self::marker(name),
                }
            })
            .into_owned()
    }

    /// Visible marker for an unfilled placeholder
    pub fn marker(name: &str) -> String {
        format!("[{}]", name)
    }

    /// Upper-cased user title when given and not blank, else the template name
    pub fn title_line(template: &Template, title: Option<&str>) -> String {
        title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(template.name.as_str())
            .to_uppercase()
    }
}

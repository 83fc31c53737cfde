//! Placeholder values and their presentation grouping.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::definition::humanize;
use crate::Template;

/// User-supplied values keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderValues(BTreeMap<String, String>);

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value, possibly empty
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    /// Value usable for substitution: present and not blank
    pub fn resolved(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Form sections placeholders are shown under, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderGroup {
    FirstParty,
    SecondParty,
    ContractTerms,
    Other,
}

impl PlaceholderGroup {
    pub const ALL: [PlaceholderGroup; 4] = [
        PlaceholderGroup::FirstParty,
        PlaceholderGroup::SecondParty,
        PlaceholderGroup::ContractTerms,
        PlaceholderGroup::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderGroup::FirstParty => "First Party",
            PlaceholderGroup::SecondParty => "Second Party",
            PlaceholderGroup::ContractTerms => "Contract Terms",
            PlaceholderGroup::Other => "Other",
        }
    }

    /// Upper-case substrings that route a name into this group
    fn markers(&self) -> &'static [&'static str] {
        match self {
            PlaceholderGroup::FirstParty => &["PARTY1", "PIHAK1", "FIRST"],
            PlaceholderGroup::SecondParty => &["PARTY2", "PIHAK2", "SECOND"],
            PlaceholderGroup::ContractTerms => &[
                "DATE", "DURATION", "MONTHS", "TERM", "VALUE", "AMOUNT", "FEE", "PRICE",
                "PAYMENT", "SALARY", "PERIOD",
            ],
            PlaceholderGroup::Other => &[],
        }
    }

    fn suffix(&self) -> Option<&'static str> {
        match self {
            PlaceholderGroup::FirstParty => Some("_1"),
            PlaceholderGroup::SecondParty => Some("_2"),
            _ => None,
        }
    }

    fn matches(&self, upper_name: &str) -> bool {
        self.markers().iter().any(|m| upper_name.contains(m))
            || self.suffix().is_some_and(|s| upper_name.ends_with(s))
    }
}

/// Members of one non-empty group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderGrouping {
    pub group: PlaceholderGroup,
    pub label: &'static str,
    pub placeholders: Vec<String>,
}

/// Pure operations over [`PlaceholderValues`]
pub struct PlaceholderResolver;

impl PlaceholderResolver {
    /// Copy of `values` with one entry replaced
    pub fn set(
        values: &PlaceholderValues,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> PlaceholderValues {
        let mut next = values.clone();
        next.0.insert(name.into(), value.into());
        next
    }

    /// "Clear all values"
    pub fn clear() -> PlaceholderValues {
        PlaceholderValues::new()
    }

    /// "Fill with sample data": every declared placeholder gets its example,
    /// or its label when no example is declared
    pub fn fill_samples(template: &Template) -> PlaceholderValues {
        template
            .placeholders
            .iter()
            .map(|p| {
                let sample = p.example.clone().unwrap_or_else(|| p.display_label());
                (p.name.clone(), sample)
            })
            .collect()
    }

    /// Form label for a placeholder of `template`
    pub fn label(template: &Template, name: &str) -> String {
        template
            .placeholder(name)
            .map(|p| p.display_label())
            .unwrap_or_else(|| humanize(name))
    }

    /// First group whose markers match, `Other` when none do
    pub fn classify(name: &str) -> PlaceholderGroup {
        let upper = name.to_uppercase();
        PlaceholderGroup::ALL
            .into_iter()
            .find(|g| g.matches(&upper))
            .unwrap_or(PlaceholderGroup::Other)
    }

    /// Partition names into the fixed group order, omitting empty groups
    ///
    /// Input order is kept within a group and repeated names are listed once.
    pub fn group_by_category<S: AsRef<str>>(placeholders: &[S]) -> Vec<PlaceholderGrouping> {
        let mut buckets: BTreeMap<PlaceholderGroup, Vec<String>> = BTreeMap::new();
        let mut seen = HashSet::new();
        for name in placeholders.iter().map(|p| p.as_ref()) {
            if seen.insert(name) {
                buckets
                    .entry(Self::classify(name))
                    .or_default()
                    .push(name.to_string());
            }
        }

        buckets
            .into_iter()
            .map(|(group, placeholders)| PlaceholderGrouping {
                group,
                label: group.label(),
                placeholders,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaceholderDefinition;

    #[test]
    fn test_set_is_pure() {
        let empty = PlaceholderValues::new();
        let one = PlaceholderResolver::set(&empty, "A", "Acme");
        assert!(empty.is_empty());
        assert_eq!(one.get("A"), Some("Acme"));

        let replaced = PlaceholderResolver::set(&one, "A", "Globex");
        assert_eq!(replaced.get("A"), Some("Globex"));
        assert_eq!(replaced.len(), 1);
    }

    #[test]
    fn test_resolved_ignores_blank_values() {
        let values: PlaceholderValues = [("A", ""), ("B", "  "), ("C", "x")].into_iter().collect();
        assert_eq!(values.get("A"), Some(""));
        assert_eq!(values.resolved("A"), None);
        assert_eq!(values.resolved("B"), None);
        assert_eq!(values.resolved("C"), Some("x"));
        assert_eq!(values.resolved("D"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            PlaceholderResolver::classify("PARTY1_NAME"),
            PlaceholderGroup::FirstParty
        );
        assert_eq!(
            PlaceholderResolver::classify("address_1"),
            PlaceholderGroup::FirstParty
        );
        assert_eq!(
            PlaceholderResolver::classify("NAMA_PIHAK2"),
            PlaceholderGroup::SecondParty
        );
        assert_eq!(
            PlaceholderResolver::classify("START_DATE"),
            PlaceholderGroup::ContractTerms
        );
        assert_eq!(
            PlaceholderResolver::classify("CITY"),
            PlaceholderGroup::Other
        );
        // party markers win over term markers
        assert_eq!(
            PlaceholderResolver::classify("PARTY2_PAYMENT_ACCOUNT"),
            PlaceholderGroup::SecondParty
        );
    }

    #[test]
    fn test_group_order_is_fixed_and_empty_groups_omitted() {
        let groups = PlaceholderResolver::group_by_category(&[
            "CITY",
            "FEE",
            "PARTY1_NAME",
            "SIGNING_PLACE",
            "PARTY1_ADDRESS",
        ]);

        let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["First Party", "Contract Terms", "Other"]);
        assert_eq!(groups[0].placeholders, vec!["PARTY1_NAME", "PARTY1_ADDRESS"]);
        assert_eq!(groups[2].placeholders, vec!["CITY", "SIGNING_PLACE"]);
    }

    #[test]
    fn test_group_by_category_dedupes() {
        let groups = PlaceholderResolver::group_by_category(&["FEE", "FEE"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].placeholders, vec!["FEE"]);
        assert!(PlaceholderResolver::group_by_category::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_fill_samples_and_clear() {
        let template = Template {
            id: "t".to_string(),
            name: "T".to_string(),
            description: String::new(),
            category: "test".to_string(),
            placeholders: vec![
                PlaceholderDefinition::new("PARTY1_NAME").with_example("Acme"),
                PlaceholderDefinition::new("CITY"),
            ],
            clauses: Vec::new(),
        };

        let samples = PlaceholderResolver::fill_samples(&template);
        assert_eq!(samples.get("PARTY1_NAME"), Some("Acme"));
        assert_eq!(samples.get("CITY"), Some("City"));
        assert!(PlaceholderResolver::clear().is_empty());
        assert_eq!(PlaceholderResolver::label(&template, "UNDECLARED_X"), "Undeclared X");
    }
}

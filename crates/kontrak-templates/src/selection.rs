//! Clause selection for the active template.
//!
//! The selection is a set of clause ids. Required clauses are seeded on
//! initialisation and `toggle` refuses to remove them, so every reachable
//! `SelectionState` contains all required ids of its template.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Clause, Template};

/// Ids of the clauses included in the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    clause_ids: BTreeSet<String>,
}

impl SelectionState {
    pub fn contains(&self, clause_id: &str) -> bool {
        self.clause_ids.contains(clause_id)
    }

    pub fn len(&self) -> usize {
        self.clause_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clause_ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.clause_ids.iter().map(|s| s.as_str())
    }

    /// Selected clauses in template order, regardless of selection order
    pub fn selected_clauses<'t>(&self, template: &'t Template) -> Vec<&'t Clause> {
        template
            .clauses
            .iter()
            .filter(|c| self.contains(&c.id))
            .collect()
    }
}

/// Pure operations over [`SelectionState`]
pub struct ClauseSelector;

impl ClauseSelector {
    /// Fresh selection holding every required clause
    pub fn initialize(template: &Template) -> SelectionState {
        SelectionState {
            clause_ids: template.required_clauses().map(|c| c.id.clone()).collect(),
        }
    }

    /// Flip an optional clause in or out
    ///
    /// Required clauses and ids unknown to the template are left untouched.
    pub fn toggle(state: &SelectionState, template: &Template, clause_id: &str) -> SelectionState {
        let mut next = state.clone();
        match template.clause(clause_id) {
            Some(clause) if clause.required => {
                debug!(template = %template.id, clause = clause_id, "ignoring toggle of required clause");
            }
            Some(clause) => {
                if !next.clause_ids.remove(&clause.id) {
                    next.clause_ids.insert(clause.id.clone());
                }
            }
            None => {
                debug!(template = %template.id, clause = clause_id, "ignoring toggle of unknown clause");
            }
        }
        next
    }

    /// Include or exclude an optional clause; same guarantees as [`toggle`](Self::toggle)
    pub fn set_included(
        state: &SelectionState,
        template: &Template,
        clause_id: &str,
        included: bool,
    ) -> SelectionState {
        if state.contains(clause_id) == included {
            state.clone()
        } else {
            Self::toggle(state, template, clause_id)
        }
    }
}

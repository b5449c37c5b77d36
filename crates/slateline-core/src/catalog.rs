//! # Element Catalog
//!
//! The master catalog of every element harvested so far, keyed by category.
//!
//! The catalog is the reference state handed to the continuity Matchmaker:
//! when scene 9 mentions "the bags", the catalog is where "6 DUFFEL BAGS"
//! from scene 1 lives. It uses `BTreeMap`/`BTreeSet` so summaries render in
//! a deterministic order regardless of harvest scheduling.

use crate::types::{Category, Element};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deterministic catalog of harvested element names per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCatalog {
    entries: BTreeMap<Category, BTreeSet<String>>,
}

impl ElementCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch of harvested elements. Names are uppercased.
    pub fn record(&mut self, elements: &[Element]) {
        for element in elements {
            let name = element.name.trim().to_uppercase();
            if name.is_empty() {
                continue;
            }
            self.entries.entry(element.category).or_default().insert(name);
        }
    }

    /// Number of distinct names across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// True when nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }

    /// Check whether a name is already known under a category.
    #[must_use]
    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.entries
            .get(&category)
            .is_some_and(|names| names.contains(&name.trim().to_uppercase()))
    }

    /// Render the reference catalog for the Matchmaker prompt.
    ///
    /// One line per category: `CATEGORY PROPS: CASH, DUFFEL BAGS, GUNS`.
    /// Returns `"CATALOG EMPTY."` before anything is recorded.
    #[must_use]
    pub fn reference_summary(&self) -> String {
        if self.is_empty() {
            return "CATALOG EMPTY.".to_string();
        }
        let lines: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(category, names)| {
                let joined = names.iter().cloned().collect::<Vec<_>>().join(", ");
                format!("CATEGORY {}: {}", category.as_str().to_uppercase(), joined)
            })
            .collect();
        lines.join("\n")
    }
}

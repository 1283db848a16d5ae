// Filter state - selected categories plus free-text search
//
// Owned by the storefront controller and mutated only by explicit user
// actions. Any change to it starts a new filter epoch in the list loader.

use crate::catalog::Product;
use std::collections::BTreeSet;
use std::fmt;

/// Active category selection and search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selected: BTreeSet<String>,
    search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `label` if absent, remove it if present
    ///
    /// Returns whether the label is selected afterwards.
    pub fn toggle_category(&mut self, label: &str) -> bool {
        if self.selected.remove(label) {
            false
        } else {
            self.selected.insert(label.to_string());
            true
        }
    }

    /// Deselect every category
    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Replace the search text verbatim (trimming happens at match time)
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn selected_categories(&self) -> Vec<&str> {
        self.selected.iter().map(String::as_str).collect()
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// No category selected and no meaningful search text
    pub fn is_default(&self) -> bool {
        self.selected.is_empty() && self.search.trim().is_empty()
    }

    /// Category predicate AND search predicate
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_search(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.selected.is_empty() || self.selected.contains(&product.category)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle)
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "categories=[{}] search={:?}",
            self.selected_categories().join(", "),
            self.search
        )
    }
}

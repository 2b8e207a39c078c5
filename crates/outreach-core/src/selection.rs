//! Manual recipient selection.

use std::collections::HashSet;

/// The set of manually chosen recipient identifiers.
///
/// Independent of how many pages have been loaded: ids stay selected across
/// incremental loads for the whole session, and selecting against a
/// partially loaded list is fine.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the id if absent, removes it if present.
    ///
    /// Returns true when the id ended up selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Adds every given id to the selection.
    ///
    /// Used for "select all visible": ids already selected stay selected,
    /// and recipients on pages not yet loaded are unaffected.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
    }

    /// Empties the selection.
    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    /// Resets the selection after a send.
    pub fn clear(&mut self) {
        self.deselect_all();
    }

    /// Returns true if the id is currently selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected ids in a stable order, ready for a send payload.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();

        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(!selection.contains("a"));
    }

    #[test]
    fn test_select_all_is_a_union() {
        let mut selection = SelectionSet::new();
        selection.toggle("page1-item");

        // Page 2 arrives; selecting all visible must keep earlier picks.
        selection.select_all(["x", "y"]);

        assert_eq!(selection.len(), 3);
        assert!(selection.contains("page1-item"));
        assert!(selection.contains("x"));
    }

    #[test]
    fn test_selection_survives_further_loads() {
        // Selecting an id is independent of list contents, so loading more
        // pages cannot drop it; deselect_all is the only way out.
        let mut selection = SelectionSet::new();
        selection.toggle("X");
        selection.select_all(["p2a", "p2b"]);
        assert!(selection.contains("X"));

        selection.deselect_all();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_to_vec_is_sorted() {
        let mut selection = SelectionSet::new();
        selection.select_all(["c", "a", "b"]);
        assert_eq!(selection.to_vec(), vec!["a", "b", "c"]);
    }
}

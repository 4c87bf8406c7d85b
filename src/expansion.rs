//! Expansion State
//!
//! Which root rows currently show their children.

use std::collections::HashSet;

use crate::models::CategoryId;
use crate::tree::CategoryTree;

/// Set of expanded root IDs.
///
/// May hold IDs of roots that no longer exist; lookups intersect with the
/// current forest so stale entries are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<CategoryId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip membership of `id`
    pub fn toggle(&mut self, id: &CategoryId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    /// Expand exactly the roots of `trees`
    pub fn expand_all(&mut self, trees: &[CategoryTree]) {
        self.expanded = trees.iter().map(|tree| tree.root.id.clone()).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRecord;
    use crate::tree::Forest;

    fn forest() -> Forest {
        Forest::from_records(&[
            CategoryRecord::new("1", "Electronics"),
            CategoryRecord::new("2", "Phones").under("1"),
            CategoryRecord::new("3", "Garden"),
        ])
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut state = ExpansionState::new();
        state.toggle(&CategoryId::new("3"));
        let before = state.clone();

        for id in ["1", "3", "missing"] {
            let id = CategoryId::new(id);
            state.toggle(&id);
            state.toggle(&id);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_expand_all_sets_exactly_roots() {
        let forest = forest();
        let mut state = ExpansionState::new();
        state.toggle(&CategoryId::new("stale"));

        state.expand_all(&forest.trees);

        assert_eq!(state.len(), 2);
        assert!(state.is_expanded(&CategoryId::new("1")));
        assert!(state.is_expanded(&CategoryId::new("3")));
        assert!(!state.is_expanded(&CategoryId::new("2")));
        assert!(!state.is_expanded(&CategoryId::new("stale")));
    }

    #[test]
    fn test_expand_then_collapse_is_empty() {
        let mut state = ExpansionState::new();
        state.expand_all(&forest().trees);
        state.collapse_all();
        assert!(state.is_empty());

        state.expand_all(&[]);
        state.collapse_all();
        assert!(state.is_empty());
    }
}

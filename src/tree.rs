//! Tree Utilities
//!
//! Builds the two-level category forest and the rows rendered from it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::expansion::ExpansionState;
use crate::models::{Category, CategoryId, CategoryRecord};

/// A root category and its direct children
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTree {
    pub root: Category,
    pub children: Vec<Category>,
}

/// Result of building: the rendered trees plus children that lost their root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    pub trees: Vec<CategoryTree>,
    /// Never rendered. A child is orphaned when its parent is missing or is
    /// itself a child.
    pub orphans: Vec<Category>,
}

impl Forest {
    pub fn from_records(records: &[CategoryRecord]) -> Self {
        let categories: Vec<Category> = records.iter().map(Category::from).collect();
        build_forest(&categories)
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn find_tree(&self, id: &CategoryId) -> Option<&CategoryTree> {
        self.trees.iter().find(|tree| &tree.root.id == id)
    }

    pub fn is_root(&self, id: &CategoryId) -> bool {
        self.find_tree(id).is_some()
    }

    /// Number of children rendered under `id` (0 for non-roots)
    pub fn child_count(&self, id: &CategoryId) -> usize {
        self.find_tree(id).map_or(0, |tree| tree.children.len())
    }

    /// Rendered categories: roots plus attached children
    pub fn category_count(&self) -> usize {
        self.trees.iter().map(|tree| 1 + tree.children.len()).sum()
    }
}

fn display_order(a: &Category, b: &Category) -> Ordering {
    a.sort_order
        .total_cmp(&b.sort_order)
        .then_with(|| a.name.cmp(&b.name))
}

/// Build the forest from a flat, unsorted list.
///
/// Duplicated IDs keep their first occurrence.
pub fn build_forest(categories: &[Category]) -> Forest {
    let mut seen: HashSet<&CategoryId> = HashSet::new();
    let mut roots: Vec<&Category> = Vec::new();
    let mut children: Vec<&Category> = Vec::new();

    for category in categories {
        if !seen.insert(&category.id) {
            log::debug!("[TREE] Skipping duplicate category {}", category.id);
            continue;
        }
        if category.is_root() {
            roots.push(category);
        } else {
            children.push(category);
        }
    }

    roots.sort_by(|a, b| display_order(a, b));

    // Root ID -> index into `trees`
    let index: HashMap<&CategoryId, usize> = roots
        .iter()
        .enumerate()
        .map(|(i, root)| (&root.id, i))
        .collect();

    let mut trees: Vec<CategoryTree> = roots
        .iter()
        .map(|root| CategoryTree { root: (*root).clone(), children: Vec::new() })
        .collect();
    let mut orphans = Vec::new();

    for child in children {
        match child.parent_id().and_then(|parent| index.get(parent)) {
            Some(&i) => trees[i].children.push(child.clone()),
            None => orphans.push(child.clone()),
        }
    }

    for tree in &mut trees {
        tree.children.sort_by(display_order);
    }

    if !orphans.is_empty() {
        log::warn!("[TREE] {} categories reference a missing root and are hidden", orphans.len());
    }

    Forest { trees, orphans }
}

/// Pre-order listing: each root followed by its children
#[cfg(test)]
pub fn flatten(trees: &[CategoryTree]) -> Vec<Category> {
    let mut result = Vec::new();
    for tree in trees {
        result.push(tree.root.clone());
        result.extend(tree.children.iter().cloned());
    }
    result
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub category: Category,
    pub depth: usize,
    pub child_count: usize,
    pub expanded: bool,
}

/// Rows in display order; children appear only under expanded roots.
pub fn visible_rows(trees: &[CategoryTree], expansion: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for tree in trees {
        let expanded = expansion.is_expanded(&tree.root.id);
        rows.push(TreeRow {
            category: tree.root.clone(),
            depth: 0,
            child_count: tree.children.len(),
            expanded,
        });
        if expanded {
            rows.extend(tree.children.iter().map(|child| TreeRow {
                category: child.clone(),
                depth: 1,
                child_count: 0,
                expanded: false,
            }));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(id: &str, name: &str, parent: Option<&str>, sort_order: Option<f64>) -> Category {
        let mut record = CategoryRecord::new(id, name);
        record.parent_id = parent.map(CategoryId::from);
        record.sort_order = sort_order;
        record.into()
    }

    fn electronics() -> Vec<Category> {
        vec![
            make("1", "Electronics", None, Some(0.0)),
            make("2", "Phones", Some("1"), Some(1.0)),
            make("3", "Laptops", Some("1"), Some(0.0)),
        ]
    }

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_build_orders_children_by_sort_order() {
        let forest = build_forest(&electronics());

        assert_eq!(forest.trees.len(), 1);
        assert_eq!(forest.trees[0].root.name, "Electronics");
        assert_eq!(names(&forest.trees[0].children), vec!["Laptops", "Phones"]);
        assert!(forest.orphans.is_empty());
    }

    #[test]
    fn test_name_breaks_ties_and_missing_sort_order_is_zero() {
        let categories = vec![
            make("b", "beta", None, None),
            make("a", "Alpha", None, Some(0.0)),
            make("z", "Zeta", None, Some(-1.0)),
            make("c", "alpha", None, Some(2.0)),
        ];
        let forest = build_forest(&categories);
        let roots: Vec<&str> = forest.trees.iter().map(|t| t.root.name.as_str()).collect();

        // Case-sensitive: uppercase sorts before lowercase
        assert_eq!(roots, vec!["Zeta", "Alpha", "beta", "alpha"]);
    }

    #[test]
    fn test_fractional_sort_orders_interleave() {
        let categories = vec![
            make("1", "Electronics", None, None),
            make("2", "Phones", Some("1"), Some(1.0)),
            make("3", "Cases", Some("1"), Some(1.5)),
            make("4", "Laptops", Some("1"), Some(0.5)),
            make("5", "Cables", Some("1"), None),
        ];
        let forest = build_forest(&categories);

        assert_eq!(names(&forest.trees[0].children), vec!["Cables", "Laptops", "Phones", "Cases"]);
    }

    #[test]
    fn test_children_are_exactly_those_referencing_root() {
        let categories = vec![
            make("1", "Electronics", None, None),
            make("2", "Garden", None, None),
            make("3", "Phones", Some("1"), None),
            make("4", "Tools", Some("2"), None),
            make("5", "Hoses", Some("2"), None),
            make("6", "Cases", Some("3"), None),
            make("7", "Lost", Some("99"), None),
        ];
        let forest = build_forest(&categories);

        for tree in &forest.trees {
            let expected: HashSet<&CategoryId> = categories
                .iter()
                .filter(|c| c.parent_id() == Some(&tree.root.id))
                .map(|c| &c.id)
                .collect();
            let actual: HashSet<&CategoryId> = tree.children.iter().map(|c| &c.id).collect();
            assert_eq!(actual, expected);
        }

        assert!(forest.category_count() <= categories.len());
        assert_eq!(forest.category_count(), 5);
        // Grandchild and dangling reference are both orphans
        assert_eq!(names(&forest.orphans), vec!["Cases", "Lost"]);
    }

    #[test]
    fn test_deleted_root_drops_child() {
        // Root "1" deleted server-side, child still points at it
        let categories = vec![make("2", "Phones", Some("1"), Some(1.0))];
        let forest = build_forest(&categories);

        assert!(forest.trees.is_empty());
        assert_eq!(forest.category_count(), 0);
        assert_eq!(forest.orphans.len(), 1);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let categories = vec![
            make("1", "Electronics", None, None),
            make("1", "Electronics (stale)", None, None),
            make("2", "Phones", Some("1"), None),
            make("2", "Phones", Some("1"), None),
        ];
        let forest = build_forest(&categories);

        assert_eq!(forest.trees.len(), 1);
        assert_eq!(forest.trees[0].root.name, "Electronics");
        assert_eq!(forest.trees[0].children.len(), 1);
    }

    #[test]
    fn test_build_is_idempotent_on_flattened_output() {
        let categories = vec![
            make("10", "Garden", None, Some(2.0)),
            make("1", "Electronics", None, Some(1.0)),
            make("11", "Hoses", Some("10"), None),
            make("2", "Phones", Some("1"), Some(1.0)),
            make("3", "Laptops", Some("1"), Some(1.0)),
        ];
        let once = build_forest(&categories);
        let twice = build_forest(&flatten(&once.trees));

        assert_eq!(once.trees, twice.trees);
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let forest = build_forest(&electronics());
        let mut expansion = ExpansionState::new();

        let rows = visible_rows(&forest.trees, &expansion);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].child_count, 2);
        assert!(!rows[0].expanded);

        expansion.toggle(&CategoryId::new("1"));
        // Stale ID from a deleted root is ignored
        expansion.toggle(&CategoryId::new("42"));
        let rows = visible_rows(&forest.trees, &expansion);
        let shown: Vec<(&str, usize)> = rows.iter().map(|r| (r.category.name.as_str(), r.depth)).collect();
        assert_eq!(shown, vec![("Electronics", 0), ("Laptops", 1), ("Phones", 1)]);
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            CategoryRecord::new("1", "Electronics").ordered(0),
            CategoryRecord::new("2", "Phones").under("1").ordered(1),
        ];
        let forest = Forest::from_records(&records);
        assert!(forest.is_root(&CategoryId::new("1")));
        assert!(!forest.is_root(&CategoryId::new("2")));
        assert_eq!(forest.child_count(&CategoryId::new("1")), 1);
    }
}

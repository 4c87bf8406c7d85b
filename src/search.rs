//! Category Search
//!
//! Narrows the forest to rows whose name or slug contains the query.

use std::borrow::Cow;

use crate::models::Category;
use crate::tree::CategoryTree;

fn matches(category: &Category, needle: &str) -> bool {
    category.name.to_lowercase().contains(needle) || category.slug.to_lowercase().contains(needle)
}

/// Filter the forest by a free-text query.
///
/// A root that matches keeps all its children. A root kept only because some
/// children match keeps just those children. A blank query borrows the input
/// unchanged.
pub fn filter_trees<'a>(trees: &'a [CategoryTree], query: &str) -> Cow<'a, [CategoryTree]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(trees);
    }

    let filtered: Vec<CategoryTree> = trees
        .iter()
        .filter_map(|tree| {
            if matches(&tree.root, &needle) {
                return Some(tree.clone());
            }
            let children: Vec<Category> = tree
                .children
                .iter()
                .filter(|child| matches(child, &needle))
                .cloned()
                .collect();
            (!children.is_empty()).then(|| CategoryTree { root: tree.root.clone(), children })
        })
        .collect();

    log::debug!("[SEARCH] {:?} kept {} of {} roots", needle, filtered.len(), trees.len());
    Cow::Owned(filtered)
}

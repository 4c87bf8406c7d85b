//! Frontend Models
//!
//! Data structures matching the catalog backend, plus the validated
//! category shape the tree is built from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category identifier.
///
/// The backend sends either UUID strings or integers; both become a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| CategoryId(raw.into()))
    }
}

/// `null`, missing and `""` all mean "no parent".
fn deserialize_parent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<CategoryId>, D::Error> {
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .map(String::from)
        .filter(|s| !s.trim().is_empty())
        .map(CategoryId))
}

fn default_true() -> bool {
    true
}

/// Category record as returned by `GET /categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Builders for fixtures
#[cfg(test)]
impl CategoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            slug: String::new(),
            description: None,
            parent_id: None,
            sort_order: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent_id = Some(CategoryId::new(parent));
        self
    }

    pub fn ordered(mut self, sort_order: impl Into<f64>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }
}

/// Where a category sits in the two-level hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKind {
    Root,
    Child { parent_id: CategoryId },
}

/// Category after crossing the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub kind: CategoryKind,
    /// Any finite number; fractional values are allowed
    pub sort_order: f64,
    pub is_active: bool,
}

impl Category {
    pub fn is_root(&self) -> bool {
        matches!(self.kind, CategoryKind::Root)
    }

    pub fn parent_id(&self) -> Option<&CategoryId> {
        match &self.kind {
            CategoryKind::Root => None,
            CategoryKind::Child { parent_id } => Some(parent_id),
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        let kind = match record.parent_id {
            Some(parent_id) => CategoryKind::Child { parent_id },
            None => CategoryKind::Root,
        };
        Self {
            id: record.id,
            name: record.name,
            slug: record.slug,
            description: record.description,
            kind,
            sort_order: record.sort_order.unwrap_or(0.0),
            is_active: record.is_active,
        }
    }
}

impl From<&CategoryRecord> for Category {
    fn from(record: &CategoryRecord) -> Self {
        record.clone().into()
    }
}

/// Body of `POST /categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    pub is_active: bool,
}

/// Body of `PATCH /categories/{id}`; only set fields are sent.
///
/// `parent_id: Some(None)` is sent as `null` and moves the category to the
/// root level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<CategoryId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == CategoryPatch::default()
    }
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl<T> Page<T> {
    /// A bare array is a single, final page.
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total: Some(total),
            page: Some(1),
            size: None,
            pages: Some(1),
        }
    }
}

impl<T> Page<T> {
    /// Convert the items, keeping the paging fields
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Page<U> {
        Page {
            items: f(self.items),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}

/// Listing bodies seen in the wild: a page envelope or a plain array.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> From<ListResponse<T>> for Page<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Paged(page) => page,
            ListResponse::Bare(items) => Page::single(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let json = r#"[
            {"id": 1, "name": "Electronics", "parent_id": null, "sort_order": 0},
            {"id": "2", "name": "Phones", "parent_id": 1, "sort_order": 1, "is_active": false}
        ]"#;
        let records: Vec<CategoryRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].id, CategoryId::new("1"));
        assert_eq!(records[0].parent_id, None);
        assert!(records[0].is_active);
        assert_eq!(records[1].parent_id, Some(CategoryId::new("1")));
        assert!(!records[1].is_active);
    }

    #[test]
    fn test_blank_parent_is_root() {
        let json = r#"{"id": "a", "name": "Garden", "slug": "garden", "parent_id": ""}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        let category = Category::from(record);
        assert!(category.is_root());
        assert_eq!(category.sort_order, 0.0);
    }

    #[test]
    fn test_child_kind() {
        let category = Category::from(CategoryRecord::new("2", "Phones").under("1").ordered(3));
        assert_eq!(category.parent_id(), Some(&CategoryId::new("1")));
        assert_eq!(category.sort_order, 3.0);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = CategoryPatch {
            name: Some("Phones".to_string()),
            parent_id: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Phones", "parent_id": null}));
        assert!(!patch.is_empty());
        assert!(CategoryPatch::default().is_empty());
    }

    #[test]
    fn test_fractional_sort_order() {
        let json = r#"[
            {"id": "1", "name": "Electronics", "sort_order": 0},
            {"id": "2", "name": "Phones", "parent_id": "1", "sort_order": 1.5}
        ]"#;
        let page = Page::from(serde_json::from_str::<ListResponse<CategoryRecord>>(json).unwrap());

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].sort_order, Some(1.5));
        assert_eq!(Category::from(&page.items[1]).sort_order, 1.5);
    }

    #[test]
    fn test_list_response_shapes() {
        let paged: ListResponse<CategoryRecord> = serde_json::from_str(
            r#"{"items": [{"id": "1", "name": "A"}], "total": 3, "page": 1, "size": 1}"#,
        )
        .unwrap();
        let page = Page::from(paged);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, Some(3));

        let bare: ListResponse<CategoryRecord> =
            serde_json::from_str(r#"[{"id": "1", "name": "A"}, {"id": "2", "name": "B"}]"#).unwrap();
        let page = Page::from(bare);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pages, Some(1));
    }
}

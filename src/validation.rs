//! Form Validation
//!
//! Checks run before any request leaves the browser.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CategoryId, CategoryPatch, CategoryRecord, NewCategory};
use crate::tree::Forest;

/// Editable fields of the create/edit dialog, as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent_id: Option<CategoryId>,
    pub sort_order: String,
    pub is_active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            parent_id: None,
            sort_order: String::new(),
            is_active: true,
        }
    }
}

impl CategoryForm {
    pub fn under(parent_id: Option<CategoryId>) -> Self {
        Self { parent_id, ..Self::default() }
    }

    /// Pre-filled from an existing record
    pub fn from_record(record: &CategoryRecord) -> Self {
        Self {
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone().unwrap_or_default(),
            parent_id: record.parent_id.clone(),
            sort_order: record.sort_order.map(|n| n.to_string()).unwrap_or_default(),
            is_active: record.is_active,
        }
    }
}

/// ASCII spelling of an accented Latin letter
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Lowercase, fold accented Latin letters, collapse every other run into
/// one hyphen.
///
/// Returns an empty slug when the name holds letters with no ASCII spelling
/// (Cyrillic, CJK, ...); the backend derives one instead.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        let piece = if c.is_ascii_alphanumeric() {
            Some(c.to_string())
        } else if let Some(folded) = fold_latin(c) {
            Some(folded.to_string())
        } else if c.is_alphanumeric() {
            return String::new();
        } else {
            None
        };

        match piece {
            Some(piece) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push_str(&piece);
            }
            None => pending_hyphen = true,
        }
    }
    slug
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_name(form: &CategoryForm) -> CatalogResult<String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(CatalogError::validation("Category name is required"));
    }
    Ok(name.to_string())
}

fn validate_slug(form: &CategoryForm) -> CatalogResult<Option<String>> {
    let slug = form.slug.trim();
    if slug.is_empty() {
        return Ok(None);
    }
    if !is_valid_slug(slug) {
        return Err(CatalogError::validation(
            "Slug may only contain lowercase letters, digits and single hyphens",
        ));
    }
    Ok(Some(slug.to_string()))
}

fn validate_sort_order(form: &CategoryForm) -> CatalogResult<Option<f64>> {
    let raw = form.sort_order.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| CatalogError::validation("Sort order must be a number"))
}

fn validate_parent(
    parent_id: Option<&CategoryId>,
    editing: Option<&CategoryId>,
    forest: &Forest,
) -> CatalogResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if editing == Some(parent_id) {
        return Err(CatalogError::validation("A category cannot be its own parent"));
    }
    if !forest.is_root(parent_id) {
        return Err(CatalogError::validation("Parent must be a top-level category"));
    }
    if let Some(id) = editing {
        if forest.child_count(id) > 0 {
            return Err(CatalogError::validation(
                "A category with subcategories cannot be moved under another category",
            ));
        }
    }
    Ok(())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate a create form. A blank slug is derived from the name.
pub fn validate_new(form: &CategoryForm, forest: &Forest) -> CatalogResult<NewCategory> {
    let name = validate_name(form)?;
    let slug = validate_slug(form)?.or_else(|| Some(slugify(&name)).filter(|s| !s.is_empty()));
    let sort_order = validate_sort_order(form)?;
    validate_parent(form.parent_id.as_ref(), None, forest)?;

    Ok(NewCategory {
        name,
        slug,
        description: optional_text(&form.description),
        parent_id: form.parent_id.clone(),
        sort_order,
        is_active: form.is_active,
    })
}

/// Validate an edit form against the record it was opened from.
///
/// Only fields that changed end up in the patch.
pub fn validate_patch(
    original: &CategoryRecord,
    form: &CategoryForm,
    forest: &Forest,
) -> CatalogResult<CategoryPatch> {
    let name = validate_name(form)?;
    let slug = validate_slug(form)?;
    let sort_order = validate_sort_order(form)?;
    validate_parent(form.parent_id.as_ref(), Some(&original.id), forest)?;

    let description = optional_text(&form.description);
    let patch = CategoryPatch {
        name: (name != original.name).then_some(name),
        // Clearing the slug field keeps the current slug
        slug: slug.filter(|s| *s != original.slug),
        description: (description != original.description).then_some(description),
        parent_id: (form.parent_id != original.parent_id).then(|| form.parent_id.clone()),
        sort_order: sort_order.filter(|n| Some(*n) != original.sort_order),
        is_active: (form.is_active != original.is_active).then_some(form.is_active),
    };

    if patch.is_empty() {
        return Err(CatalogError::validation("No changes to save"));
    }
    Ok(patch)
}

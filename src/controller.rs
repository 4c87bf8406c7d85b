//! Category Page Controller
//!
//! All local state of the category screen in one object. Components read it
//! through a signal and change it only through these transitions, so the
//! open dialog -> submit -> settle cycle can be tested without a browser.

use crate::error::{CatalogError, CatalogResult};
use crate::expansion::ExpansionState;
use crate::models::{CategoryId, CategoryPatch, CategoryRecord, NewCategory};
use crate::notify::Notices;
use crate::search::filter_trees;
use crate::tree::{visible_rows, Forest, TreeRow};
use crate::validation::{validate_new, validate_patch, CategoryForm};

/// Edit dialog contents
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub original: CategoryRecord,
    pub form: CategoryForm,
}

/// Category awaiting delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTarget {
    pub id: CategoryId,
    pub name: String,
    pub child_count: usize,
}

impl DeleteTarget {
    /// Roots with children may still be deleted; the dialog only warns.
    pub fn warning(&self) -> Option<String> {
        match self.child_count {
            0 => None,
            1 => Some("This category has 1 subcategory, which will no longer be shown.".to_string()),
            n => Some(format!("This category has {} subcategories, which will no longer be shown.", n)),
        }
    }
}

/// Request that has been sent and not yet settled
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { name: String },
    Update { id: CategoryId, name: String },
    Delete { id: CategoryId, name: String },
}

impl Mutation {
    fn success_message(&self) -> String {
        match self {
            Mutation::Create { name } => format!("Category \"{}\" created", name),
            Mutation::Update { name, .. } => format!("Category \"{}\" updated", name),
            Mutation::Delete { name, .. } => format!("Category \"{}\" deleted", name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPageState {
    pub query: String,
    pub expansion: ExpansionState,
    pub create_form: Option<CategoryForm>,
    pub edit_form: Option<EditForm>,
    pub delete_target: Option<DeleteTarget>,
    pub notices: Notices,
    pending: Option<Mutation>,
}

impl CategoryPageState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Tree view
    // ========================

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rows to render for the current query and expansion
    pub fn rows(&self, forest: &Forest) -> Vec<TreeRow> {
        let trees = filter_trees(&forest.trees, &self.query);
        visible_rows(&trees, &self.expansion)
    }

    pub fn toggle(&mut self, id: &CategoryId) {
        self.expansion.toggle(id);
    }

    pub fn expand_all(&mut self, forest: &Forest) {
        self.expansion.expand_all(&forest.trees);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    // ========================
    // Dialogs
    // ========================

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the in-flight request targets `id`
    pub fn is_pending_for(&self, id: &CategoryId) -> bool {
        matches!(
            &self.pending,
            Some(Mutation::Update { id: pending, .. } | Mutation::Delete { id: pending, .. }) if pending == id
        )
    }

    #[cfg(test)]
    pub fn has_open_dialog(&self) -> bool {
        self.create_form.is_some() || self.edit_form.is_some() || self.delete_target.is_some()
    }

    fn clear_dialogs(&mut self) {
        self.create_form = None;
        self.edit_form = None;
        self.delete_target = None;
    }

    /// Returns false while a mutation is outstanding
    pub fn open_create(&mut self, parent_id: Option<CategoryId>) -> bool {
        if self.is_pending() {
            return false;
        }
        self.clear_dialogs();
        self.create_form = Some(CategoryForm::under(parent_id));
        true
    }

    pub fn open_edit(&mut self, record: &CategoryRecord) -> bool {
        if self.is_pending() {
            return false;
        }
        self.clear_dialogs();
        self.edit_form = Some(EditForm {
            original: record.clone(),
            form: CategoryForm::from_record(record),
        });
        true
    }

    pub fn open_delete(&mut self, record: &CategoryRecord, forest: &Forest) -> bool {
        if self.is_pending() {
            return false;
        }
        self.clear_dialogs();
        self.delete_target = Some(DeleteTarget {
            id: record.id.clone(),
            name: record.name.clone(),
            child_count: forest.child_count(&record.id),
        });
        true
    }

    pub fn close_dialog(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.clear_dialogs();
        true
    }

    /// Apply a field change to whichever form dialog is open
    pub fn edit_fields(&mut self, change: impl FnOnce(&mut CategoryForm)) {
        if let Some(form) = self.create_form.as_mut() {
            change(form);
        } else if let Some(edit) = self.edit_form.as_mut() {
            change(&mut edit.form);
        }
    }

    /// The form shown in the create/edit dialog, if any
    pub fn active_form(&self) -> Option<&CategoryForm> {
        self.create_form
            .as_ref()
            .or_else(|| self.edit_form.as_ref().map(|edit| &edit.form))
    }

    // ========================
    // Mutations
    // ========================

    fn guard(&self) -> CatalogResult<()> {
        if self.is_pending() {
            return Err(CatalogError::MutationInFlight);
        }
        Ok(())
    }

    fn reject(&mut self, err: CatalogError) -> CatalogError {
        self.notices.error(err.user_message());
        err
    }

    /// Validate the create dialog and mark the request as in flight
    pub fn submit_create(&mut self, forest: &Forest) -> CatalogResult<NewCategory> {
        self.guard()?;
        let form = self
            .create_form
            .as_ref()
            .ok_or_else(|| CatalogError::validation("No category form is open"))?;
        let body = validate_new(form, forest).map_err(|err| self.reject(err))?;
        self.pending = Some(Mutation::Create { name: body.name.clone() });
        Ok(body)
    }

    pub fn submit_edit(&mut self, forest: &Forest) -> CatalogResult<(CategoryId, CategoryPatch)> {
        self.guard()?;
        let edit = self
            .edit_form
            .as_ref()
            .ok_or_else(|| CatalogError::validation("No category form is open"))?;
        let validated = validate_patch(&edit.original, &edit.form, forest);
        let id = edit.original.id.clone();
        let current_name = edit.original.name.clone();
        let patch = validated.map_err(|err| self.reject(err))?;
        let name = patch.name.clone().unwrap_or(current_name);
        self.pending = Some(Mutation::Update { id: id.clone(), name });
        Ok((id, patch))
    }

    pub fn submit_delete(&mut self) -> CatalogResult<CategoryId> {
        self.guard()?;
        let target = self
            .delete_target
            .as_ref()
            .ok_or_else(|| CatalogError::validation("Nothing selected for deletion"))?;
        let id = target.id.clone();
        self.pending = Some(Mutation::Delete { id: id.clone(), name: target.name.clone() });
        Ok(id)
    }

    /// Record the outcome of the in-flight request.
    ///
    /// Success closes the dialog; failure leaves it open with the user's input
    /// so the same action can be retried.
    pub fn settle(&mut self, outcome: Result<(), &CatalogError>) {
        let Some(mutation) = self.pending.take() else {
            log::warn!("[PAGE] settle() called with no pending mutation");
            return;
        };
        match outcome {
            Ok(()) => {
                log::info!("[PAGE] {:?} succeeded", mutation);
                self.clear_dialogs();
                self.notices.success(mutation.success_message());
            }
            Err(err) => {
                log::warn!("[PAGE] {:?} failed: {}", mutation, err);
                self.notices.error(err.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE;
    use crate::notify::NoticeLevel;

    fn records() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord::new("1", "Electronics").ordered(0).with_slug("electronics"),
            CategoryRecord::new("2", "Phones").under("1").ordered(1).with_slug("phones"),
            CategoryRecord::new("3", "Laptops").under("1").ordered(0).with_slug("laptops"),
        ]
    }

    fn forest() -> Forest {
        Forest::from_records(&records())
    }

    #[test]
    fn test_rows_follow_query_and_expansion() {
        let forest = forest();
        let mut page = CategoryPageState::new();
        page.toggle(&CategoryId::new("1"));
        page.set_query("phone");

        let names: Vec<String> = page.rows(&forest).into_iter().map(|r| r.category.name).collect();
        assert_eq!(names, vec!["Electronics", "Phones"]);

        // Clearing the query leaves expansion untouched
        let before = page.expansion.clone();
        page.set_query("  ");
        assert_eq!(page.expansion, before);
        assert_eq!(page.rows(&forest).len(), 3);
    }

    #[test]
    fn test_create_cycle() {
        let forest = forest();
        let mut page = CategoryPageState::new();
        assert!(page.open_create(Some(CategoryId::new("1"))));
        page.edit_fields(|form| form.name = "Tablets".to_string());

        let body = page.submit_create(&forest).unwrap();
        assert_eq!(body.slug.as_deref(), Some("tablets"));
        assert!(page.is_pending());

        // Duplicate submission is blocked
        assert_eq!(page.submit_create(&forest).unwrap_err(), CatalogError::MutationInFlight);
        assert!(!page.close_dialog());

        page.settle(Ok(()));
        assert!(!page.is_pending());
        assert!(!page.has_open_dialog());
        assert_eq!(page.notices.latest().unwrap().message, "Category \"Tablets\" created");
    }

    #[test]
    fn test_validation_error_sends_nothing() {
        let mut page = CategoryPageState::new();
        page.open_create(None);

        let err = page.submit_create(&forest()).unwrap_err();
        assert!(err.is_validation());
        assert!(!page.is_pending());
        assert!(page.create_form.is_some());
        let notice = page.notices.latest().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Category name is required");
    }

    #[test]
    fn test_failed_request_keeps_dialog() {
        let mut page = CategoryPageState::new();
        page.open_edit(&records()[1]);
        page.edit_fields(|form| form.name = "Mobile".to_string());
        let (id, patch) = page.submit_edit(&forest()).unwrap();
        assert_eq!(id, CategoryId::new("2"));
        assert_eq!(patch.name.as_deref(), Some("Mobile"));

        let err = CatalogError::Request { status: 409, message: Some("Slug already exists".to_string()) };
        page.settle(Err(&err));

        assert!(!page.is_pending());
        let edit = page.edit_form.as_ref().expect("dialog stays open");
        assert_eq!(edit.form.name, "Mobile");
        assert_eq!(page.notices.latest().unwrap().message, "Slug already exists");

        page.settle(Err(&CatalogError::Network("offline".to_string())));
        // No pending mutation: nothing changes
        assert_eq!(page.notices.items().len(), 1);
    }

    #[test]
    fn test_delete_root_with_children_warns() {
        let forest = forest();
        let mut page = CategoryPageState::new();
        page.open_delete(&records()[0], &forest);

        let target = page.delete_target.clone().unwrap();
        assert_eq!(target.child_count, 2);
        assert!(target.warning().unwrap().contains("2 subcategories"));

        let id = page.submit_delete().unwrap();
        assert_eq!(id, CategoryId::new("1"));
        page.settle(Err(&CatalogError::Request { status: 500, message: None }));
        assert_eq!(page.notices.latest().unwrap().message, GENERIC_FAILURE);
        assert!(page.delete_target.is_some());
    }

    #[test]
    fn test_only_one_dialog_open() {
        let forest = forest();
        let mut page = CategoryPageState::new();
        page.open_create(None);
        page.open_delete(&records()[2], &forest);
        assert!(page.create_form.is_none());
        assert!(page.delete_target.as_ref().unwrap().warning().is_none());

        page.open_edit(&records()[2]);
        assert!(page.delete_target.is_none());
        assert_eq!(page.active_form().unwrap().name, "Laptops");
    }

    #[test]
    fn test_pending_delete_blocks_other_actions() {
        let forest = forest();
        let mut page = CategoryPageState::new();
        assert!(page.open_delete(&records()[2], &forest));
        page.submit_delete().unwrap();

        assert_eq!(page.submit_delete().unwrap_err(), CatalogError::MutationInFlight);
        assert!(page.is_pending_for(&CategoryId::new("3")));
        assert!(!page.is_pending_for(&CategoryId::new("2")));
        assert!(!page.open_edit(&records()[1]));
        assert!(!page.open_delete(&records()[0], &forest));
        assert!(!page.open_create(None));
        assert!(page.edit_form.is_none());
        assert_eq!(page.delete_target.as_ref().unwrap().id, CategoryId::new("3"));

        page.settle(Ok(()));
        assert!(!page.is_pending_for(&CategoryId::new("3")));
        assert!(page.open_edit(&records()[1]));
    }

    #[test]
    fn test_pending_edit_blocks_second_submit() {
        let mut page = CategoryPageState::new();
        page.open_edit(&records()[1]);
        page.edit_fields(|form| form.name = "Mobile".to_string());
        page.submit_edit(&forest()).unwrap();

        assert_eq!(page.submit_edit(&forest()).unwrap_err(), CatalogError::MutationInFlight);
        assert!(!page.open_delete(&records()[1], &forest()));
        assert_eq!(page.edit_form.as_ref().unwrap().form.name, "Mobile");
    }

    #[test]
    fn test_submit_without_dialog() {
        let mut page = CategoryPageState::new();
        assert!(page.submit_delete().is_err());
        assert!(page.submit_edit(&forest()).is_err());
        assert!(!page.is_pending());
    }
}

//! UI Components
//!
//! Leptos components of the category screen.

mod category_toolbar;
mod category_table;
mod category_row;
mod category_form_dialog;
mod delete_category_dialog;
mod notice_tray;

pub use category_toolbar::CategoryToolbar;
pub use category_table::CategoryTable;
pub use category_row::CategoryRow;
pub use category_form_dialog::CategoryFormDialog;
pub use delete_category_dialog::DeleteCategoryDialog;
pub use notice_tray::NoticeTray;

//! Category management: the categories screen, category selection and the
//! endpoints that create, edit and delete categories.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod screen;

pub use create::create_category_endpoint;
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryBody, CategoryFormData, CategoryId, CategoryName};
pub use edit::{get_edit_category_panel, update_category_endpoint};
pub use list::{get_categories_page, get_categories_panel, select_category_endpoint};
pub use screen::{CATEGORIES_LOAD_ERROR, CategoriesScreen, mount_categories_screen};

//! Product management: the products screen and the endpoints that create,
//! edit and delete products.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod screen;

pub use create::create_product_endpoint;
pub use delete::delete_product_endpoint;
pub use domain::{Product, ProductBody, ProductFormData, ProductId};
pub use edit::{get_edit_product_panel, update_product_endpoint};
pub use list::{get_products_page, get_products_panel, get_products_table};
pub use screen::{PRODUCTS_LOAD_ERROR, ProductsScreen, mount_products_screen};

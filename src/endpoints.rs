//! The endpoint URIs, both the console's own routes and the catalog
//! service's resource paths.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The root route which redirects to the products page.
pub const ROOT: &str = "/";
/// The page listing products with search, sort and pagination.
pub const PRODUCTS_VIEW: &str = "/produits";
/// The products panel: the product form, the list controls and the list.
pub const PRODUCTS_PANEL: &str = "/produits/panel";
/// The fragment with the current page of products, for search, sort and page changes.
pub const PRODUCTS_TABLE: &str = "/produits/table";
/// The page for editing an existing product.
pub const EDIT_PRODUCT_VIEW: &str = "/produits/{product_id}/edit";
/// The page listing categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The categories panel: the category form, the list and the selected category's products.
pub const CATEGORIES_PANEL: &str = "/categories/panel";
/// The route that toggles which category has its products shown.
pub const SELECT_CATEGORY: &str = "/categories/{category_id}/select";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";

/// The route to create a product.
pub const POST_PRODUCT: &str = "/api/produits";
/// The route to update a product.
pub const PUT_PRODUCT: &str = "/api/produits/{product_id}";
/// The route to delete a product.
pub const DELETE_PRODUCT: &str = "/api/produits/{product_id}";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to update a category.
pub const PUT_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";

/// The catalog service's category collection, relative to its base URL.
pub const REMOTE_CATEGORIES: &str = "/categories";
/// A single category on the catalog service.
pub const REMOTE_CATEGORY: &str = "/categories/{category_id}";
/// The catalog service's product collection, relative to its base URL.
pub const REMOTE_PRODUCTS: &str = "/produits";
/// A single product on the catalog service.
pub const REMOTE_PRODUCT: &str = "/produits/{product_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

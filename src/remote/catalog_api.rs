//! Typed catalog operations on top of [RemoteClient].

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    category::{Category, CategoryBody, CategoryId},
    endpoints::{self, format_endpoint},
    product::{Product, ProductBody, ProductId},
};

use super::{RemoteClient, RemoteError, client::decode};

/// The catalog service as seen by the screens and the mutation coordinator.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Get every category, in the order the service returns them.
    async fn categories(&self) -> Result<Vec<Category>, RemoteError>;

    /// Get every product, in the order the service returns them.
    async fn products(&self) -> Result<Vec<Product>, RemoteError>;

    /// Create a category and return it with its service-assigned ID.
    async fn create_category(&self, body: &CategoryBody) -> Result<Category, RemoteError>;

    /// Rename the category `id` and return the updated category.
    async fn update_category(
        &self,
        id: CategoryId,
        body: &CategoryBody,
    ) -> Result<Category, RemoteError>;

    /// Delete the category `id`.
    ///
    /// The service is expected to delete the category's products as well.
    async fn delete_category(&self, id: CategoryId) -> Result<(), RemoteError>;

    /// Create a product and return it with its service-assigned ID.
    async fn create_product(&self, body: &ProductBody) -> Result<Product, RemoteError>;

    /// Replace the fields of product `id` and return the updated product.
    async fn update_product(
        &self,
        id: ProductId,
        body: &ProductBody,
    ) -> Result<Product, RemoteError>;

    /// Delete the product `id`.
    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteError>;
}

#[async_trait]
impl CatalogApi for RemoteClient {
    async fn categories(&self) -> Result<Vec<Category>, RemoteError> {
        self.fetch_as(endpoints::REMOTE_CATEGORIES).await
    }

    async fn products(&self) -> Result<Vec<Product>, RemoteError> {
        self.fetch_as(endpoints::REMOTE_PRODUCTS).await
    }

    async fn create_category(&self, body: &CategoryBody) -> Result<Category, RemoteError> {
        let path = endpoints::REMOTE_CATEGORIES;
        let value = self.create_from(path, body).await?;

        decode(path, value)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        body: &CategoryBody,
    ) -> Result<Category, RemoteError> {
        let path = format_endpoint(endpoints::REMOTE_CATEGORY, id);
        let value = self.update_from(&path, body).await?;

        decode(&path, value)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), RemoteError> {
        self.remove(&format_endpoint(endpoints::REMOTE_CATEGORY, id))
            .await
            .map(|_| ())
    }

    async fn create_product(&self, body: &ProductBody) -> Result<Product, RemoteError> {
        let path = endpoints::REMOTE_PRODUCTS;
        let value = self.create_from(path, body).await?;

        decode(path, with_category_fallback(value, body.category_id))
    }

    async fn update_product(
        &self,
        id: ProductId,
        body: &ProductBody,
    ) -> Result<Product, RemoteError> {
        let path = format_endpoint(endpoints::REMOTE_PRODUCT, id);
        let value = self.update_from(&path, body).await?;

        decode(&path, with_category_fallback(value, body.category_id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteError> {
        self.remove(&format_endpoint(endpoints::REMOTE_PRODUCT, id))
            .await
            .map(|_| ())
    }
}

/// Write responses do not always embed the product's category, in which case
/// the category that was sent is the one the product now belongs to.
fn with_category_fallback(mut value: Value, category_id: CategoryId) -> Value {
    if let Value::Object(fields) = &mut value {
        let has_category = ["categories", "category_id"]
            .iter()
            .any(|key| fields.get(*key).is_some_and(|field| !field.is_null()));

        if !has_category {
            fields.insert("category_id".to_owned(), Value::from(category_id));
        }
    }

    value
}

//! Create, update and delete operations for categories and products.
//!
//! Every operation validates its input before talking to the catalog
//! service, and only touches the screens' collections once the service has
//! confirmed the change. A failed call leaves every collection as it was.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    Error,
    category::{CategoriesScreen, Category, CategoryFormData, CategoryId},
    product::{Product, ProductFormData, ProductId, ProductsScreen},
    remote::CatalogApi,
    session::Session,
};

/// The user's answer to "are you sure you want to delete this?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Go ahead with the delete.
    Confirmed,
    /// Abort the delete.
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// The query string of a delete request.
///
/// The confirmation prompt adds `confirmed=true`; without it the delete is
/// treated as declined.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DeleteQuery {
    /// Whether the user confirmed the delete.
    #[serde(default)]
    pub confirmed: bool,
}

impl From<DeleteQuery> for Confirmation {
    fn from(query: DeleteQuery) -> Self {
        Confirmation::from(query.confirmed)
    }
}

/// What a delete request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The service deleted the entity and the screens were updated.
    Deleted,
    /// The user declined, so nothing was sent to the service.
    Declined,
}

/// Applies create, update and delete operations to the catalog service and
/// reconciles the screens with the result.
#[derive(Clone)]
pub struct Coordinator {
    catalog: Arc<dyn CatalogApi>,
    products_screen: Arc<Mutex<ProductsScreen>>,
    categories_screen: Arc<Mutex<CategoriesScreen>>,
}

impl Coordinator {
    /// Create a coordinator that keeps `products_screen` and
    /// `categories_screen` in step with `catalog`.
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        products_screen: Arc<Mutex<ProductsScreen>>,
        categories_screen: Arc<Mutex<CategoriesScreen>>,
    ) -> Self {
        Self {
            catalog,
            products_screen,
            categories_screen,
        }
    }

    /// Create a coordinator for the screens of `session`.
    pub fn for_session(catalog: Arc<dyn CatalogApi>, session: &Session) -> Self {
        Self::new(
            catalog,
            session.products_screen.clone(),
            session.categories_screen.clone(),
        )
    }

    /// Create a category from `form`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] without calling the service if the name is
    /// blank, or [Error::Remote] if the service rejects the request.
    pub async fn create_category(&self, form: &CategoryFormData) -> Result<Category, Error> {
        let body = form.validate()?;
        let category = self.catalog.create_category(&body).await?;

        tracing::info!("Created category {} ({})", category.id, category.name);

        self.products_screen
            .lock()
            .await
            .category_created(category.clone());
        self.categories_screen
            .lock()
            .await
            .category_created(category.clone());

        Ok(category)
    }

    /// Rename the category `id` from `form`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] without calling the service if the name is
    /// blank, or [Error::Remote] if the service rejects the request.
    pub async fn update_category(
        &self,
        id: CategoryId,
        form: &CategoryFormData,
    ) -> Result<Category, Error> {
        let body = form.validate()?;
        let category = self.catalog.update_category(id, &body).await?;

        tracing::info!("Updated category {} ({})", category.id, category.name);

        self.products_screen
            .lock()
            .await
            .category_updated(category.clone());
        self.categories_screen
            .lock()
            .await
            .category_updated(category.clone());

        Ok(category)
    }

    /// Update the category being edited, or create a new one if `editing`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// See [Coordinator::create_category] and [Coordinator::update_category].
    pub async fn save_category(
        &self,
        editing: Option<CategoryId>,
        form: &CategoryFormData,
    ) -> Result<Category, Error> {
        match editing {
            Some(id) => self.update_category(id, form).await,
            None => self.create_category(form).await,
        }
    }

    /// Delete the category `id` along with its products.
    ///
    /// The service is trusted to delete the category's products, so they are
    /// removed locally without refetching. Any category selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [Error::Remote] if the service rejects the request.
    pub async fn delete_category(
        &self,
        id: CategoryId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, Error> {
        if confirmation == Confirmation::Declined {
            tracing::debug!("Delete of category {id} was declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.catalog.delete_category(id).await?;

        tracing::info!("Deleted category {id} and its products");

        self.products_screen.lock().await.category_deleted(id);
        self.categories_screen.lock().await.category_deleted(id);

        Ok(DeleteOutcome::Deleted)
    }

    /// Create a product from `form`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] without calling the service if a field is
    /// missing or the price is not a number, or [Error::Remote] if the
    /// service rejects the request.
    pub async fn create_product(&self, form: &ProductFormData) -> Result<Product, Error> {
        let body = form.validate()?;
        let product = self.catalog.create_product(&body).await?;

        tracing::info!("Created product {} ({})", product.id, product.name);

        self.products_screen
            .lock()
            .await
            .product_created(product.clone());
        self.categories_screen
            .lock()
            .await
            .product_created(product.clone());

        Ok(product)
    }

    /// Replace the fields of product `id` with `form`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] without calling the service if a field is
    /// missing or the price is not a number, or [Error::Remote] if the
    /// service rejects the request.
    pub async fn update_product(
        &self,
        id: ProductId,
        form: &ProductFormData,
    ) -> Result<Product, Error> {
        let body = form.validate()?;
        let product = self.catalog.update_product(id, &body).await?;

        tracing::info!("Updated product {} ({})", product.id, product.name);

        self.products_screen
            .lock()
            .await
            .product_updated(product.clone());
        self.categories_screen
            .lock()
            .await
            .product_updated(product.clone());

        Ok(product)
    }

    /// Update the product being edited, or create a new one if `editing` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// See [Coordinator::create_product] and [Coordinator::update_product].
    pub async fn save_product(
        &self,
        editing: Option<ProductId>,
        form: &ProductFormData,
    ) -> Result<Product, Error> {
        match editing {
            Some(id) => self.update_product(id, form).await,
            None => self.create_product(form).await,
        }
    }

    /// Delete the product `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Remote] if the service rejects the request.
    pub async fn delete_product(
        &self,
        id: ProductId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, Error> {
        if confirmation == Confirmation::Declined {
            tracing::debug!("Delete of product {id} was declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.catalog.delete_product(id).await?;

        tracing::info!("Deleted product {id}");

        self.products_screen.lock().await.product_deleted(id);
        self.categories_screen.lock().await.product_deleted(id);

        Ok(DeleteOutcome::Deleted)
    }
}

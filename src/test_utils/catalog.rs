use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    category::{Category, CategoryBody, CategoryId, mount_categories_screen},
    product::{Product, ProductBody, ProductId, mount_products_screen},
    remote::{CatalogApi, RemoteError},
    session::Session,
    view_model::DEFAULT_PAGE_SIZE,
};

/// Build a product with a placeholder description.
pub(crate) fn product(id: ProductId, name: &str, price: f64, category_id: CategoryId) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: "Description".to_owned(),
        price,
        category_id: Some(category_id),
        category_name: None,
    }
}

/// A session whose products and categories screens are both mounted from
/// `catalog`. The catalog's call count is reset afterwards.
pub(crate) async fn mounted_session(catalog: &FakeCatalog) -> Session {
    let session = Session::new(DEFAULT_PAGE_SIZE);
    mount_products_screen(&session.products_screen, catalog).await;
    mount_categories_screen(&session.categories_screen, catalog).await;
    catalog.reset_call_count();

    session
}

#[derive(Debug, Default)]
struct FakeData {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// An in-memory catalog service that counts the calls made to it.
#[derive(Debug, Default)]
pub(crate) struct FakeCatalog {
    data: Mutex<FakeData>,
    calls: AtomicUsize,
    failure: Mutex<Option<RemoteError>>,
}

impl FakeCatalog {
    pub(crate) fn with_data(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            data: Mutex::new(FakeData {
                categories,
                products,
            }),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail with a 500 status, or succeed again.
    pub(crate) fn fail_requests(&self, fail: bool) {
        let failure = fail.then(|| RemoteError::Status {
            status: 500,
            body: "Internal Server Error".to_owned(),
        });
        *self.failure.lock().unwrap() = failure;
    }

    /// Make every subsequent call fail with `error`.
    pub(crate) fn fail_with(&self, error: RemoteError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_call_count(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn begin_call(&self) -> Result<std::sync::MutexGuard<'_, FakeData>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        Ok(self.data.lock().unwrap())
    }
}

fn not_found() -> RemoteError {
    RemoteError::Status {
        status: 404,
        body: "Not Found".to_owned(),
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn categories(&self) -> Result<Vec<Category>, RemoteError> {
        Ok(self.begin_call()?.categories.clone())
    }

    async fn products(&self) -> Result<Vec<Product>, RemoteError> {
        Ok(self.begin_call()?.products.clone())
    }

    async fn create_category(&self, body: &CategoryBody) -> Result<Category, RemoteError> {
        let mut data = self.begin_call()?;
        let id = data.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let category = Category {
            id,
            name: body.name.clone(),
        };
        data.categories.push(category.clone());

        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        body: &CategoryBody,
    ) -> Result<Category, RemoteError> {
        let mut data = self.begin_call()?;
        let category = data
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(not_found)?;
        category.name = body.name.clone();

        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), RemoteError> {
        let mut data = self.begin_call()?;
        let count = data.categories.len();
        data.categories.retain(|category| category.id != id);

        if data.categories.len() == count {
            return Err(not_found());
        }

        data.products
            .retain(|product| product.category_id != Some(id));

        Ok(())
    }

    async fn create_product(&self, body: &ProductBody) -> Result<Product, RemoteError> {
        let mut data = self.begin_call()?;
        let id = data.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: body.name.clone(),
            description: body.description.clone(),
            price: body.price,
            category_id: Some(body.category_id),
            category_name: None,
        };
        data.products.push(product.clone());

        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        body: &ProductBody,
    ) -> Result<Product, RemoteError> {
        let mut data = self.begin_call()?;
        let product = data
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(not_found)?;
        product.name = body.name.clone();
        product.description = body.description.clone();
        product.price = body.price;
        product.category_id = Some(body.category_id);

        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteError> {
        let mut data = self.begin_call()?;
        let count = data.products.len();
        data.products.retain(|product| product.id != id);

        if data.products.len() == count {
            return Err(not_found());
        }

        Ok(())
    }
}

//! Core product domain types.

use serde::{Deserialize, Serialize};

use crate::{
    ValidationError,
    category::{Category, CategoryId},
    view_model::Listable,
};

/// Identifier assigned to a product by the catalog service.
pub type ProductId = i64;

/// A product for sale in the catalog.
///
/// The catalog service embeds the product's category as `categories`; a
/// bare `category_id` is accepted too. A product whose category is missing
/// or null is kept and shown without a category. Prices may arrive as JSON
/// numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    /// The service-assigned ID.
    pub id: ProductId,
    /// The display name.
    pub name: String,
    /// A free text description.
    pub description: String,
    /// The unit price in euros.
    pub price: f64,
    /// The category the product belongs to, if the service sent one.
    pub category_id: Option<CategoryId>,
    /// The category's name, when the service embedded it.
    pub category_name: Option<String>,
}

impl Listable for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRecord {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: PriceRecord,
    #[serde(default)]
    categories: Option<Category>,
    #[serde(default)]
    category_id: Option<CategoryId>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = String;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = match record.price {
            PriceRecord::Number(price) => price,
            PriceRecord::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("product {} has a non-numeric price {text:?}", record.id))?,
        };

        let (category_id, category_name) = match (record.categories, record.category_id) {
            (Some(category), _) => (Some(category.id), Some(category.name.to_string())),
            (None, category_id) => (category_id, None),
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            price,
            category_id,
            category_name,
        })
    }
}

/// Form data for product creation and editing.
///
/// Every field is kept as typed so that a rejected form can be shown again
/// exactly as it was submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    /// The product name.
    #[serde(default)]
    pub name: String,
    /// The product description.
    #[serde(default)]
    pub description: String,
    /// The price, as typed.
    #[serde(default)]
    pub price: String,
    /// The chosen category ID, as sent by the category selector.
    #[serde(default)]
    pub category_id: String,
}

impl ProductFormData {
    /// Check that every field is filled in and build the request body for
    /// the catalog service.
    ///
    /// # Errors
    ///
    /// Returns the [ValidationError] for the first field, in form order, that
    /// is blank. The price must also parse as a number and the category as an
    /// ID.
    pub fn validate(&self) -> Result<ProductBody, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let price = self.price.trim();
        if price.is_empty() {
            return Err(ValidationError::MissingPrice);
        }
        let price = price
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or(ValidationError::InvalidPrice)?;

        let category_id = self
            .category_id
            .trim()
            .parse::<CategoryId>()
            .map_err(|_| ValidationError::MissingCategory)?;

        Ok(ProductBody {
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            category_id,
        })
    }
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category_id: product
                .category_id
                .map(|category_id| category_id.to_string())
                .unwrap_or_default(),
        }
    }
}

/// The body sent to the catalog service to create or update a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductBody {
    /// The product name.
    pub name: String,
    /// The product description.
    pub description: String,
    /// The unit price in euros.
    pub price: f64,
    /// The category the product belongs to.
    pub category_id: CategoryId,
}

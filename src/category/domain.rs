//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ValidationError, view_model::Listable};

/// Identifier assigned to a category by the catalog service.
pub type CategoryId = i64;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [ValidationError::MissingName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            Err(ValidationError::MissingName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group of products, e.g. 'Fruits' or 'Boissons'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The service-assigned ID.
    pub id: CategoryId,
    /// The display name.
    pub name: CategoryName,
}

impl Listable for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_ref()
    }
}

/// Form data for category creation and editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFormData {
    /// The name as typed by the user.
    #[serde(default)]
    pub name: String,
}

impl CategoryFormData {
    /// Check the form and build the request body for the catalog service.
    ///
    /// # Errors
    ///
    /// Returns [ValidationError::MissingName] if the name is blank.
    pub fn validate(&self) -> Result<CategoryBody, ValidationError> {
        Ok(CategoryBody {
            name: CategoryName::new(&self.name)?,
        })
    }
}

impl From<&Category> for CategoryFormData {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
        }
    }
}

/// The body sent to the catalog service to create or rename a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBody {
    /// The new name.
    pub name: CategoryName,
}

//! Product record and insert shape.
//!
//! # Responsibility
//! - Define the single persisted entity (`id`, `name`, `quantity`).
//! - Enforce field invariants before any write.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused after delete.
//! - `name` is not blank.
//! - `quantity` is strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
}

/// Insert shape for a product that has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: u32,
}

/// Field-level invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductValidationError {
    BlankName,
    NonPositiveQuantity,
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "product name must not be blank"),
            Self::NonPositiveQuantity => write!(f, "product quantity must be greater than 0"),
        }
    }
}

impl Error for ProductValidationError {}

impl NewProduct {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Checks field invariants.
    ///
    /// Called by repository write paths before any SQL mutation.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(&self.name, self.quantity)
    }

    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
        }
    }
}

impl Product {
    /// Checks field invariants on a persisted row.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(&self.name, self.quantity)
    }
}

fn validate_fields(name: &str, quantity: u32) -> Result<(), ProductValidationError> {
    if name.trim().is_empty() {
        return Err(ProductValidationError::BlankName);
    }
    if quantity == 0 {
        return Err(ProductValidationError::NonPositiveQuantity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewProduct, ProductId, ProductValidationError};

    #[test]
    fn validate_rejects_whitespace_name() {
        let product = NewProduct::new("  \t", 3);
        assert_eq!(product.validate(), Err(ProductValidationError::BlankName));
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let product = NewProduct::new("Widget", 0);
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::NonPositiveQuantity)
        );
    }

    #[test]
    fn with_id_keeps_fields() {
        let product = NewProduct::new("Widget", 5).with_id(ProductId(7));
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn product_id_serializes_as_plain_integer() {
        let product = NewProduct::new("Widget", 5).with_id(ProductId(12));
        let json = serde_json::to_value(&product).expect("serialize product");
        assert_eq!(json["id"], 12);
        assert_eq!(json["quantity"], 5);
    }
}

//! Product entry form state and input validation.
//!
//! # Responsibility
//! - Hold the two text inputs, search mode and the last error message.
//! - Turn raw text into validated store requests with user-facing messages.
//!
//! # Invariants
//! - Validation never touches the store.
//! - A failed validation leaves the typed inputs unchanged.

use crate::model::product::NewProduct;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing validation failures, one per form rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    EmptyName,
    InvalidQuantity,
    NonPositiveQuantity,
    EmptySearchName,
    EmptyDeleteName,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::EmptyName => "Product name cannot be empty",
            Self::InvalidQuantity => "Please enter a valid quantity",
            Self::NonPositiveQuantity => "Quantity must be greater than 0",
            Self::EmptySearchName => "Please enter product name to search",
            Self::EmptyDeleteName => "Please enter product name to delete",
        };
        f.write_str(message)
    }
}

impl Error for FormError {}

/// Editable form state backing the product screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name_input: String,
    pub quantity_input: String,
    pub searching: bool,
    pub error_message: Option<String>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates both inputs for the Add action.
    pub fn validate_add(&self) -> Result<NewProduct, FormError> {
        let name = required_name(&self.name_input, FormError::EmptyName)?;
        let quantity = parse_quantity(&self.quantity_input)?;
        Ok(NewProduct::new(name, quantity))
    }

    /// Validates the name input for the Search action.
    pub fn validate_search(&self) -> Result<String, FormError> {
        required_name(&self.name_input, FormError::EmptySearchName)
    }

    /// Validates the name input for the Delete action.
    pub fn validate_delete(&self) -> Result<String, FormError> {
        required_name(&self.name_input, FormError::EmptyDeleteName)
    }

    /// Empties both text inputs.
    pub fn clear_inputs(&mut self) {
        self.name_input.clear();
        self.quantity_input.clear();
    }
}

/// Parses quantity text as a signed 32-bit integer and requires it to be positive.
///
/// Surrounding whitespace, decimals and out-of-range values are all
/// `InvalidQuantity`; zero and negatives are `NonPositiveQuantity`.
pub fn parse_quantity(raw: &str) -> Result<u32, FormError> {
    let value = raw
        .parse::<i32>()
        .map_err(|_| FormError::InvalidQuantity)?;
    if value <= 0 {
        return Err(FormError::NonPositiveQuantity);
    }
    u32::try_from(value).map_err(|_| FormError::NonPositiveQuantity)
}

fn required_name(raw: &str, missing: FormError) -> Result<String, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed.to_string())
}

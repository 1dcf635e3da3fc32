//! Product screen controller.
//!
//! # Responsibility
//! - Implement the Add/Search/Delete/Clear buttons over form + view-model.
//! - Expose the list to render (search results or all products) with its
//!   title row.
//!
//! # Invariants
//! - Every action starts by clearing the previous error message.
//! - A validation failure aborts the action without dispatching a store job.
//! - Clear never dispatches a store job.

use super::form::{FormError, ProductForm};
use crate::model::product::Product;
use crate::viewmodel::product_view_model::{ProductViewModel, ViewModelError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column headings of the product list.
pub const TITLE_ROW: [&str; 3] = ["ID", "Product", "Quantity"];

/// The four form buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Add,
    Search,
    Delete,
    Clear,
}

/// Failure of one screen action.
#[derive(Debug)]
pub enum ScreenError {
    /// Input rejected; the message is also stored on the form.
    Form(FormError),
    /// The store worker could not accept the job.
    ViewModel(ViewModelError),
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::ViewModel(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScreenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::ViewModel(err) => Some(err),
        }
    }
}

impl From<FormError> for ScreenError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<ViewModelError> for ScreenError {
    fn from(value: ViewModelError) -> Self {
        Self::ViewModel(value)
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub quantity: String,
}

impl ProductRow {
    pub fn title() -> Self {
        let [id, name, quantity] = TITLE_ROW;
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quantity: quantity.to_string(),
        }
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            quantity: product.quantity.to_string(),
        }
    }
}

/// Form state bound to a view-model.
pub struct ProductScreen {
    form: ProductForm,
    view_model: ProductViewModel,
}

impl ProductScreen {
    pub fn new(view_model: ProductViewModel) -> Self {
        Self {
            form: ProductForm::new(),
            view_model,
        }
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn view_model(&self) -> &ProductViewModel {
        &self.view_model
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.form.name_input = text.into();
    }

    pub fn set_quantity(&mut self, text: impl Into<String>) {
        self.form.quantity_input = text.into();
    }

    pub fn error_message(&self) -> Option<&str> {
        self.form.error_message.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.form.searching
    }

    /// Handles one button press.
    ///
    /// On a validation failure the error message is set on the form and the
    /// same error is returned.
    pub fn press(&mut self, action: ScreenAction) -> Result<(), ScreenError> {
        self.form.error_message = None;
        let result = match action {
            ScreenAction::Add => self.add(),
            ScreenAction::Search => self.search(),
            ScreenAction::Delete => self.delete(),
            ScreenAction::Clear => {
                self.form.searching = false;
                self.form.clear_inputs();
                Ok(())
            }
        };

        if let Err(ScreenError::Form(err)) = &result {
            self.form.error_message = Some(err.to_string());
        }
        result
    }

    /// Products the list should currently show.
    pub fn visible_products(&self) -> Vec<Product> {
        if self.form.searching {
            self.view_model.search_results().get()
        } else {
            self.view_model.all_products().get()
        }
    }

    /// Title row followed by one row per visible product.
    pub fn rows(&self) -> Vec<ProductRow> {
        let products = self.visible_products();
        std::iter::once(ProductRow::title())
            .chain(products.iter().map(ProductRow::from))
            .collect()
    }

    fn add(&mut self) -> Result<(), ScreenError> {
        let product = self.form.validate_add()?;
        self.view_model.insert_product(product)?;
        self.form.searching = false;
        self.form.clear_inputs();
        Ok(())
    }

    fn search(&mut self) -> Result<(), ScreenError> {
        let name = self.form.validate_search()?;
        self.form.searching = true;
        self.view_model.find_product(name)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ScreenError> {
        let name = self.form.validate_delete()?;
        self.form.searching = false;
        self.view_model.delete_product(name)?;
        self.form.clear_inputs();
        Ok(())
    }
}

//! Core logic for the RoomDemo product inventory.
//! This crate is the single source of truth for product invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod ui;
pub mod viewmodel;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::product::{NewProduct, Product, ProductId, ProductValidationError};
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use ui::form::{parse_quantity, FormError, ProductForm};
pub use ui::screen::{ProductRow, ProductScreen, ScreenAction, ScreenError, TITLE_ROW};
pub use viewmodel::observable::Observable;
pub use viewmodel::product_view_model::{JobReport, ProductViewModel, ViewModelError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

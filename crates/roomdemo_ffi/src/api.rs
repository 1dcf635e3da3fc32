//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the four product form actions to Dart via FRB.
//! - Apply the same input validation and messages as the core screen.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Validation failures never touch the database.
//! - Return values are UTF-8 strings with stable meaning.

use log::warn;
use roomdemo_core::db::open_db;
use roomdemo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, Product, ProductForm, ProductRepository, RepoResult, SqliteProductRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static PRODUCT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One product row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductItem {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
}

/// List response envelope for list-all and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListResponse {
    /// Whether the query ran.
    pub ok: bool,
    /// Rows ordered by id (empty on failure or no match).
    pub items: Vec<ProductItem>,
    /// Validation message, diagnostics, or a short summary.
    pub message: String,
}

/// Action response envelope for add and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductActionResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Id assigned by add; `None` for delete and failures.
    pub product_id: Option<i64>,
    /// Rows written (1 for add) or removed (delete).
    pub affected: u32,
    /// Human-readable message for the UI.
    pub message: String,
}

impl ProductActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            product_id: None,
            affected: 0,
            message: message.into(),
        }
    }
}

impl ProductListResponse {
    fn from_result(action: &str, result: Result<Vec<Product>, String>) -> Self {
        match result {
            Ok(products) => {
                let message = if products.is_empty() {
                    "No products.".to_string()
                } else {
                    format!("{} product(s).", products.len())
                };
                Self {
                    ok: true,
                    items: products.into_iter().map(to_product_item).collect(),
                    message,
                }
            }
            Err(err) => Self::failure(format!("{action} failed: {err}")),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Adds one product from raw form text.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Validation failures return the form message (`ok=false`) without DB access.
#[flutter_rust_bridge::frb(sync)]
pub fn product_add(name: String, quantity: String) -> ProductActionResponse {
    let form = ProductForm {
        name_input: name,
        quantity_input: quantity,
        ..ProductForm::default()
    };
    let product = match form.validate_add() {
        Ok(product) => product,
        Err(err) => return ProductActionResponse::failure(err.to_string()),
    };

    match with_product_repo(|repo| repo.insert_product(&product)) {
        Ok(id) => ProductActionResponse {
            ok: true,
            product_id: Some(id.0),
            affected: 1,
            message: "Product added.".to_string(),
        },
        Err(err) => ProductActionResponse::failure(format!("product_add failed: {err}")),
    }
}

/// Lists products whose name starts with `name`.
#[flutter_rust_bridge::frb(sync)]
pub fn product_search(name: String) -> ProductListResponse {
    let form = ProductForm {
        name_input: name,
        ..ProductForm::default()
    };
    match form.validate_search() {
        Ok(name) => ProductListResponse::from_result(
            "product_search",
            with_product_repo(|repo| repo.find_products(&name)),
        ),
        Err(err) => ProductListResponse::failure(err.to_string()),
    }
}

/// Deletes every product named exactly `name`.
#[flutter_rust_bridge::frb(sync)]
pub fn product_delete(name: String) -> ProductActionResponse {
    let form = ProductForm {
        name_input: name,
        ..ProductForm::default()
    };
    let name = match form.validate_delete() {
        Ok(name) => name,
        Err(err) => return ProductActionResponse::failure(err.to_string()),
    };

    match with_product_repo(|repo| repo.delete_products(&name)) {
        Ok(removed) => ProductActionResponse {
            ok: true,
            product_id: None,
            affected: u32::try_from(removed).unwrap_or(u32::MAX),
            message: format!("Deleted {removed} product(s)."),
        },
        Err(err) => ProductActionResponse::failure(format!("product_delete failed: {err}")),
    }
}

/// Lists every stored product ordered by id.
#[flutter_rust_bridge::frb(sync)]
pub fn product_list_all() -> ProductListResponse {
    ProductListResponse::from_result(
        "product_list_all",
        with_product_repo(|repo| repo.list_products()),
    )
}

fn resolve_product_db_path() -> PathBuf {
    PRODUCT_DB_PATH
        .get_or_init(|| AppConfig::from_env().db_path)
        .clone()
}

fn with_product_repo<T>(
    f: impl FnOnce(&SqliteProductRepository<'_>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_product_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("product DB open failed: {err}")
    })?;
    let repo = SqliteProductRepository::new(&conn);
    f(&repo).map_err(|err| err.to_string())
}

fn to_product_item(product: Product) -> ProductItem {
    ProductItem {
        id: product.id.0,
        name: product.name,
        quantity: product.quantity,
    }
}

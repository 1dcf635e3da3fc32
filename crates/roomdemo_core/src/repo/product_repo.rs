//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four store operations over the `products` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewProduct::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - List and search results are ordered by `id ASC`.

use crate::db::DbError;
use crate::model::product::{NewProduct, Product, ProductId, ProductValidationError};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PRODUCT_SELECT_SQL: &str = "SELECT id, name, quantity FROM products";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProductValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ProductValidationError> for RepoError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for product store operations.
pub trait ProductRepository {
    /// Inserts one product and returns its freshly assigned id.
    fn insert_product(&self, product: &NewProduct) -> RepoResult<ProductId>;
    /// Lists every stored product.
    fn list_products(&self) -> RepoResult<Vec<Product>>;
    /// Lists products whose name starts with `name` (case-sensitive).
    fn find_products(&self, name: &str) -> RepoResult<Vec<Product>>;
    /// Deletes every product named exactly `name`; returns removed row count.
    fn delete_products(&self, name: &str) -> RepoResult<usize>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn insert_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        product.validate()?;

        self.conn.execute(
            "INSERT INTO products (name, quantity) VALUES (?1, ?2);",
            params![product.name.as_str(), i64::from(product.quantity)],
        )?;

        let id = ProductId(self.conn.last_insert_rowid());
        debug!("event=product_insert module=repo status=ok product_id={id}");
        Ok(id)
    }

    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_products(&mut rows)
    }

    fn find_products(&self, name: &str) -> RepoResult<Vec<Product>> {
        if name.is_empty() {
            return Ok(Vec::new());
        }

        // substr() keeps the match case-sensitive and free of LIKE wildcards.
        let mut stmt = self.conn.prepare(&format!(
            "{PRODUCT_SELECT_SQL}
             WHERE substr(name, 1, length(?1)) = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([name])?;
        collect_products(&mut rows)
    }

    fn delete_products(&self, name: &str) -> RepoResult<usize> {
        if name.is_empty() {
            return Ok(0);
        }

        let removed = self
            .conn
            .execute("DELETE FROM products WHERE name = ?1;", [name])?;
        debug!("event=product_delete module=repo status=ok removed={removed}");
        Ok(removed)
    }
}

fn collect_products(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Product>> {
    let mut products = Vec::new();
    while let Some(row) = rows.next()? {
        products.push(parse_product_row(row)?);
    }
    Ok(products)
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id: i64 = row.get("id")?;
    let raw_quantity: i64 = row.get("quantity")?;
    let quantity = u32::try_from(raw_quantity).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid quantity `{raw_quantity}` in products.quantity for id {id}"
        ))
    })?;

    let product = Product {
        id: ProductId(id),
        name: row.get("name")?,
        quantity,
    };
    product.validate().map_err(|err| {
        RepoError::InvalidData(format!("row {id} violates product invariants: {err}"))
    })?;
    Ok(product)
}

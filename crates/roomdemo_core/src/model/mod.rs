//! Product domain model.
//!
//! # Invariants
//! - Every stored product is identified by a store-assigned `ProductId`.
//! - There is no update path; products are only created and deleted.

pub mod product;

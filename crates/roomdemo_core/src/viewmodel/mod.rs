//! View-model layer between the product screen and the store.
//!
//! # Responsibility
//! - Hold the observable product lists consumed by UI layers.
//! - Run store operations off the caller thread.

pub mod observable;
pub mod product_view_model;

//! Plain-text rendering of the product screen.
//!
//! # Responsibility
//! - Lay out the title row and product rows as aligned columns.
//! - Render the form inputs and error line above the list.

use roomdemo_core::{ProductRow, ProductScreen};
use std::fmt::Write as _;

/// Formats rows as left-aligned columns; the first row is the title row.
pub fn table(rows: &[ProductRow]) -> String {
    let id_width = rows.iter().map(|row| row.id.chars().count()).max().unwrap_or(0);
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {}",
            row.id, row.name, row.quantity
        );
    }
    out
}

/// Full screen: inputs, optional error line, then the list.
pub fn screen(screen: &ProductScreen) -> String {
    let form = screen.form();
    let mut out = String::new();
    let _ = writeln!(out, "product:  {}", form.name_input);
    let _ = writeln!(out, "quantity: {}", form.quantity_input);
    if let Some(message) = screen.error_message() {
        let _ = writeln!(out, "error: {message}");
    }
    if screen.is_searching() {
        let _ = writeln!(out, "(search results)");
    }
    out.push_str(&table(&screen.rows()));
    out
}

//! Headless UI layer: form state and the product screen controller.
//!
//! Front-ends (terminal shell, Flutter via FFI) render what this layer
//! exposes and forward button presses to it.

pub mod form;
pub mod screen;

//! Shared types and models for Boom Art Sales
//!
//! This crate contains the sale data model, form validation and the
//! reporting engine shared between the command-line application and the
//! browser front end (via WASM).

pub mod models;
pub mod reporting;
pub mod types;
pub mod validation;

pub use models::*;
pub use reporting::*;
pub use types::*;
pub use validation::*;

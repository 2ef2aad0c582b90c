//! Product catalog search service.
//!
//! Searches a product catalog by free text and applies a 50% discount to
//! every match when the query reads the same backwards, ignoring case,
//! accents and punctuation.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod seed;
pub mod state;

pub use error::{AppError, Result};

//! Catalog search with palindrome discounts
//!
//! A query is trimmed, checked for being a palindrome, and matched against
//! the product store. When the query is a palindrome every matching product
//! is offered at half price.
//!
//! ```text
//! raw query ──trim──► empty? ──yes──► store.find_all(browse_limit, 0)
//!                        │                         │
//!                        no                        │ (no discount)
//!                        ▼                         ▼
//!               is_palindrome(q)            SearchResponse
//!                        │                         ▲
//!                        ▼                         │
//!          MatchStrategy::find(store, q) ──► pricing::price
//! ```
//!
//! # Example
//!
//! ```no_run
//! use catalog_search::search::{SearchConfig, SearchService};
//! use catalog_search::state::create_in_memory_store;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = SearchService::new(create_in_memory_store(), SearchConfig::default());
//!
//!     let results = search.search(Some("radar")).await?;
//!     println!("{} items, palindrome: {}", results.total_items, results.is_palindrome);
//!
//!     Ok(())
//! }
//! ```

mod config;
pub mod normalizer;
pub mod palindrome;
pub mod pricing;
mod service;
mod strategy;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use normalizer::normalize;
pub use palindrome::{is_palindrome, MIN_PALINDROME_LEN};
pub use pricing::{price, PricedAmount, PALINDROME_DISCOUNT_PERCENT};
pub use service::{ProductItem, SearchResponse, SearchService};
pub use strategy::{MatchStrategy, FALLBACK_MIN_EXCLUSIVE_LEN};

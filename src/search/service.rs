//! Search orchestration: trim, evaluate, look up, price.

use crate::error::Result;
use crate::models::{Price, Product};
use crate::search::config::SearchConfig;
use crate::search::palindrome::is_palindrome;
use crate::search::pricing::{self, PricedAmount};
use crate::state::ProductStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A product as shown in search results, with display prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: i64,
    pub title: String,
    pub brand: String,
    pub description: String,
    pub original_price: Price,
    pub final_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<u8>,
}

impl ProductItem {
    fn from_product(product: Product, is_palindrome: bool) -> Self {
        let PricedAmount {
            original_price,
            final_price,
            discount_percentage,
        } = pricing::price(product.price, is_palindrome);

        Self {
            id: product.id,
            title: product.title,
            brand: product.brand,
            description: product.description,
            original_price,
            final_price,
            discount_percentage,
        }
    }
}

/// Search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The trimmed query that was executed
    pub query: String,

    /// Whether the query is a palindrome match
    pub is_palindrome: bool,

    /// Matching products in repository order
    pub items: Vec<ProductItem>,

    /// Always `items.len()`
    pub total_items: usize,
}

impl SearchResponse {
    fn new(query: String, is_palindrome: bool, products: Vec<Product>) -> Self {
        let items: Vec<ProductItem> = products
            .into_iter()
            .map(|p| ProductItem::from_product(p, is_palindrome))
            .collect();

        Self {
            query,
            is_palindrome,
            total_items: items.len(),
            items,
        }
    }
}

/// Main search service
///
/// Stateless apart from the store handle; one instance serves any number
/// of concurrent requests.
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn ProductStore>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: Arc<dyn ProductStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    /// Search the catalog.
    ///
    /// An absent or blank query lists the first `browse_limit` products
    /// without discount. Otherwise matching products are returned, halved in
    /// price when the query is a palindrome. Store failures are returned
    /// unchanged.
    pub async fn search(&self, raw_query: Option<&str>) -> Result<SearchResponse> {
        let query = raw_query.unwrap_or_default().trim();

        if query.is_empty() {
            let page = self.store.find_all(self.config.browse_limit, 0).await?;
            tracing::debug!(
                returned = page.products.len(),
                total = page.total_items,
                "Empty query, browsing catalog"
            );
            return Ok(SearchResponse::new(String::new(), false, page.products));
        }

        let palindrome = is_palindrome(query);
        let products = self.config.strategy.find(self.store.as_ref(), query).await?;

        tracing::debug!(
            query = %query,
            is_palindrome = palindrome,
            strategy = %self.config.strategy,
            matches = products.len(),
            "Search executed"
        );

        Ok(SearchResponse::new(query.to_string(), palindrome, products))
    }
}

//! Shared fixtures for integration tests

#![allow(dead_code)]

use catalog_search::models::NewProduct;
use catalog_search::search::{SearchConfig, SearchService};
use catalog_search::state::{InMemoryStore, ProductStore};
use std::sync::Arc;

/// Build an insert payload with a decimal price such as `"99.99"`
pub fn product(title: &str, brand: &str, description: &str, price: &str) -> NewProduct {
    NewProduct::new(title, brand, description, price.parse().unwrap())
}

/// A small catalog with one palindrome title and overlapping text fields
pub fn sample_catalog() -> Vec<NewProduct> {
    vec![
        product("radar", "Garmin", "Rear view bike radar", "100.00"),
        product("Laptop Pro", "Acme", "Portable workstation", "999.99"),
        product("Kayak Paddle", "Wave", "Carbon shaft for a kayak", "89.95"),
        product("Level", "Tools Inc", "Spirit level, 60 cm", "33.33"),
    ]
}

/// Insert `products` into `store` in order
pub async fn populate(store: &dyn ProductStore, products: Vec<NewProduct>) {
    for p in products {
        store.save_product(p).await.unwrap();
    }
}

/// Search service over a fresh in-memory store holding `products`
pub async fn service_with(products: Vec<NewProduct>, config: SearchConfig) -> SearchService {
    let store = Arc::new(InMemoryStore::new());
    populate(store.as_ref(), products).await;
    SearchService::new(store, config)
}

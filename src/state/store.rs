use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductPage};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use validator::Validate;

/// Trait for product storage operations
///
/// Listing and search results are always in ascending id order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Save a new product, assigning its id and timestamps
    async fn save_product(&self, product: NewProduct) -> Result<Product>;

    /// Get a product by ID
    async fn get_product(&self, id: i64) -> Result<Option<Product>>;

    /// List one page of products
    async fn find_all(&self, limit: u32, offset: u32) -> Result<ProductPage>;

    /// Count all products
    async fn count_products(&self) -> Result<u64>;

    /// Case-insensitive exact title lookup; blank titles find nothing
    async fn find_by_exact_title(&self, title: &str) -> Result<Option<Product>>;

    /// Case-insensitive substring match on title, brand or description;
    /// blank queries find nothing
    async fn search_across_all_fields(&self, query: &str) -> Result<Vec<Product>>;

    /// Case-insensitive substring match on brand or description; queries of
    /// three characters or fewer find nothing
    async fn search_by_brand_or_description(&self, query: &str) -> Result<Vec<Product>>;

    /// Remove every product
    async fn clear(&self) -> Result<()>;
}

/// Lowercased, trimmed search needle, or `None` for a blank query
pub(crate) fn substring_needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Needle for the brand/description search, which needs more than three characters
pub(crate) fn brand_or_description_needle(query: &str) -> Option<String> {
    substring_needle(query).filter(|needle| needle.chars().count() > 3)
}

/// Key used to enforce case-insensitive title uniqueness
pub(crate) fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// In-memory product store (for development and testing)
///
/// A title entry whose product is gone is stale and may be claimed again.
#[derive(Clone)]
pub struct InMemoryStore {
    products: Arc<DashMap<i64, Product>>,
    title_index: Arc<DashMap<String, i64>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            products: Arc::new(DashMap::new()),
            title_index: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn insert_new(&self, product: NewProduct) -> Product {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::from_new(id, product);
        self.products.insert(id, product.clone());
        product
    }

    /// Snapshot of all products matching `predicate`, ascending by id
    fn collect_sorted<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        products.sort_by_key(|p| p.id);
        products
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn save_product(&self, product: NewProduct) -> Result<Product> {
        product.validate()?;

        // Product and title entry are written under the title's shard lock
        let product = match self.title_index.entry(title_key(&product.title)) {
            Entry::Occupied(slot) if self.products.contains_key(slot.get()) => {
                return Err(AppError::Validation(format!(
                    "Product title '{}' already exists",
                    product.title
                )));
            }
            Entry::Occupied(mut slot) => {
                let product = self.insert_new(product);
                slot.insert(product.id);
                product
            }
            Entry::Vacant(slot) => {
                let product = self.insert_new(product);
                slot.insert(product.id);
                product
            }
        };

        tracing::debug!(product_id = product.id, title = %product.title, "Product saved");
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.products.get(&id).map(|entry| entry.clone()))
    }

    async fn find_all(&self, limit: u32, offset: u32) -> Result<ProductPage> {
        let all = self.collect_sorted(|_| true);
        let total_items = all.len() as u64;

        let products = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(ProductPage {
            products,
            total_items,
        })
    }

    async fn count_products(&self) -> Result<u64> {
        Ok(self.products.len() as u64)
    }

    async fn find_by_exact_title(&self, title: &str) -> Result<Option<Product>> {
        let key = title_key(title);
        if key.is_empty() {
            return Ok(None);
        }

        let id = match self.title_index.get(&key) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        self.get_product(id).await
    }

    async fn search_across_all_fields(&self, query: &str) -> Result<Vec<Product>> {
        match substring_needle(query) {
            Some(needle) => Ok(self.collect_sorted(|p| p.matches_any_field(&needle))),
            None => Ok(Vec::new()),
        }
    }

    async fn search_by_brand_or_description(&self, query: &str) -> Result<Vec<Product>> {
        match brand_or_description_needle(query) {
            Some(needle) => Ok(self.collect_sorted(|p| p.matches_brand_or_description(&needle))),
            None => Ok(Vec::new()),
        }
    }

    async fn clear(&self) -> Result<()> {
        // Index first: a save racing the clear leaves at most a stale title
        self.title_index.clear();
        self.products.clear();
        tracing::debug!("Product store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;

    fn new_product(title: &str, brand: &str, description: &str) -> NewProduct {
        NewProduct::new(title, brand, description, Price::from_cents(1000).unwrap())
    }

    #[tokio::test]
    async fn test_save_and_get_product() {
        let store = InMemoryStore::new();

        let saved = store
            .save_product(new_product("radar", "Acme", "Speed sensor"))
            .await
            .unwrap();

        assert_eq!(saved.id, 1);
        let retrieved = store.get_product(saved.id).await.unwrap();
        assert_eq!(retrieved, Some(saved));
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected() {
        let store = InMemoryStore::new();
        store
            .save_product(new_product("Radar", "Acme", "One"))
            .await
            .unwrap();

        let result = store.save_product(new_product("radar ", "Other", "Two")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all_paginates_by_id() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .save_product(new_product(&format!("Product {}", i), "Acme", "Desc"))
                .await
                .unwrap();
        }

        let page = store.find_all(2, 1).await.unwrap();
        assert_eq!(page.total_items, 5);
        let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_exact_title_lookup() {
        let store = InMemoryStore::new();
        store
            .save_product(new_product("Level Headphones", "Acme", "Desc"))
            .await
            .unwrap();

        assert!(store
            .find_by_exact_title("  level headphones ")
            .await
            .unwrap()
            .is_some());
        assert!(store.find_by_exact_title("level").await.unwrap().is_none());
        assert!(store.find_by_exact_title("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_substring_searches() {
        let store = InMemoryStore::new();
        store
            .save_product(new_product("Kayak Paddle", "Wave", "Carbon shaft"))
            .await
            .unwrap();
        store
            .save_product(new_product("Tent", "Summit", "Two person kayak shelter"))
            .await
            .unwrap();

        let unified = store.search_across_all_fields("KAYAK").await.unwrap();
        assert_eq!(unified.len(), 2);
        assert!(unified[0].id < unified[1].id);

        let fallback = store.search_by_brand_or_description("kayak").await.unwrap();
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].title, "Tent");

        assert!(store.search_across_all_fields("  ").await.unwrap().is_empty());
        assert!(store
            .search_by_brand_or_description("wav")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryStore::new();
        store
            .save_product(new_product("radar", "Acme", "Desc"))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.count_products().await.unwrap(), 0);
        // Title is free again after a clear
        assert!(store
            .save_product(new_product("radar", "Acme", "Desc"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_stale_title_is_reclaimed() {
        let store = InMemoryStore::new();
        store.title_index.insert("radar".to_string(), 99);

        let saved = store
            .save_product(new_product("Radar", "Acme", "Desc"))
            .await
            .unwrap();
        assert_eq!(store.find_by_exact_title("radar").await.unwrap(), Some(saved));

        let duplicate = store.save_product(new_product("radar", "Acme", "Desc")).await;
        assert!(matches!(duplicate, Err(AppError::Validation(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_clear_racing_saves_keeps_index_consistent() {
        let store = Arc::new(InMemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..200 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                if i % 25 == 0 {
                    store.clear().await.unwrap();
                } else {
                    let title = format!("Item {}", i % 40);
                    let _ = store.save_product(new_product(&title, "Acme", "Desc")).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every surviving product is reachable through its title, so its
        // title cannot be saved twice
        let page = store.find_all(1_000, 0).await.unwrap();
        for product in page.products {
            let indexed = store.find_by_exact_title(&product.title).await.unwrap();
            assert_eq!(indexed.map(|p| p.id), Some(product.id));

            let duplicate = store
                .save_product(new_product(&product.title, "Other", "Desc"))
                .await;
            assert!(matches!(duplicate, Err(AppError::Validation(_))));
        }
    }
}

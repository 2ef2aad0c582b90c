use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductPage};
use crate::state::store::{brand_or_description_needle, substring_needle, title_key};
use crate::state::ProductStore;
use async_trait::async_trait;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, Transactional};
use std::path::Path;
use std::sync::Arc;
use validator::Validate;

const NEXT_ID_KEY: &[u8] = b"next_id";

/// Persistent product store using Sled embedded database
///
/// Products are keyed by their big-endian id so tree iteration yields them
/// in ascending id order. Titles are indexed in lowercase to keep them unique;
/// a title entry whose product is gone is stale and may be claimed again.
#[derive(Clone)]
pub struct SledStore {
    db: Arc<Db>,
    products_tree: sled::Tree,
    titles_tree: sled::Tree,
    meta_tree: sled::Tree,
}

impl SledStore {
    /// Create a new Sled store at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let db = sled::open(path_ref).map_err(|e| {
            AppError::Database(format!("Failed to open Sled database: {}", e))
        })?;

        let products_tree = db.open_tree("products").map_err(|e| {
            AppError::Database(format!("Failed to open products tree: {}", e))
        })?;

        let titles_tree = db.open_tree("titles").map_err(|e| {
            AppError::Database(format!("Failed to open titles tree: {}", e))
        })?;

        let meta_tree = db.open_tree("meta").map_err(|e| {
            AppError::Database(format!("Failed to open meta tree: {}", e))
        })?;

        tracing::info!("Initialized Sled store at {:?}", path_ref);

        Ok(Self {
            db: Arc::new(db),
            products_tree,
            titles_tree,
            meta_tree,
        })
    }

    fn serialize_product(product: &Product) -> Result<Vec<u8>> {
        bincode::serialize(product).map_err(|e| {
            AppError::Serialization(format!("Failed to serialize product: {}", e))
        })
    }

    fn deserialize_product(bytes: &[u8]) -> Result<Product> {
        bincode::deserialize(bytes).map_err(|e| {
            AppError::Serialization(format!("Failed to deserialize product: {}", e))
        })
    }

    fn product_key(id: i64) -> [u8; 8] {
        id.to_be_bytes()
    }

    fn decode_id(bytes: &[u8]) -> Result<i64> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            AppError::Database(format!("Corrupt id of {} bytes", bytes.len()))
        })?;
        Ok(i64::from_be_bytes(raw))
    }

    /// Allocate the next product id; the sequence survives restarts and clears
    fn next_id(&self) -> Result<i64> {
        let updated = self
            .meta_tree
            .update_and_fetch(NEXT_ID_KEY, |old| {
                let current = old
                    .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
                    .map(i64::from_be_bytes)
                    .unwrap_or(0);
                Some((current + 1).to_be_bytes().to_vec())
            })
            .map_err(|e| AppError::Database(format!("Failed to allocate product id: {}", e)))?
            .ok_or_else(|| AppError::Database("Id sequence is missing".to_string()))?;

        Self::decode_id(&updated)
    }

    /// Products matching `predicate`, in key (id) order
    fn scan<F>(&self, predicate: F) -> Result<Vec<Product>>
    where
        F: Fn(&Product) -> bool,
    {
        let mut products = Vec::new();

        for result in self.products_tree.iter() {
            let (_, value) = result.map_err(|e| {
                AppError::Database(format!("Failed to iterate products: {}", e))
            })?;

            let product = Self::deserialize_product(&value)?;
            if predicate(&product) {
                products.push(product);
            }
        }

        Ok(products)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(|e| {
            AppError::Database(format!("Failed to flush database: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for SledStore {
    async fn save_product(&self, product: NewProduct) -> Result<Product> {
        product.validate()?;

        let title = title_key(&product.title);
        let id = self.next_id()?;
        let key = Self::product_key(id);

        let product = Product::from_new(id, product);
        let value = Self::serialize_product(&product)?;

        // Title claim and product write commit together or not at all
        let outcome: std::result::Result<(), TransactionError<()>> =
            (&self.titles_tree, &self.products_tree).transaction(|(titles, products)| {
                if let Some(existing) = titles.get(title.as_bytes())? {
                    if products.get(&existing)?.is_some() {
                        return Err(ConflictableTransactionError::Abort(()));
                    }
                }

                titles.insert(title.as_bytes(), &key[..])?;
                products.insert(&key[..], value.as_slice())?;
                Ok(())
            });

        match outcome {
            Ok(()) => {}
            Err(TransactionError::Abort(())) => {
                return Err(AppError::Validation(format!(
                    "Product title '{}' already exists",
                    product.title
                )));
            }
            Err(TransactionError::Storage(e)) => {
                return Err(AppError::Database(format!("Failed to save product: {}", e)));
            }
        }

        self.flush()?;

        tracing::debug!(product_id = product.id, title = %product.title, "Product saved to Sled");
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        match self.products_tree.get(Self::product_key(id)) {
            Ok(Some(bytes)) => Ok(Some(Self::deserialize_product(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(AppError::Database(format!("Failed to get product: {}", e))),
        }
    }

    async fn find_all(&self, limit: u32, offset: u32) -> Result<ProductPage> {
        let mut products = Vec::new();

        for result in self
            .products_tree
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
        {
            let (_, value) = result.map_err(|e| {
                AppError::Database(format!("Failed to iterate products: {}", e))
            })?;
            products.push(Self::deserialize_product(&value)?);
        }

        Ok(ProductPage {
            products,
            total_items: self.products_tree.len() as u64,
        })
    }

    async fn count_products(&self) -> Result<u64> {
        Ok(self.products_tree.len() as u64)
    }

    async fn find_by_exact_title(&self, title: &str) -> Result<Option<Product>> {
        let key = title_key(title);
        if key.is_empty() {
            return Ok(None);
        }

        let id = match self.titles_tree.get(key.as_bytes()) {
            Ok(Some(bytes)) => Self::decode_id(&bytes)?,
            Ok(None) => return Ok(None),
            Err(e) => {
                return Err(AppError::Database(format!("Failed to read title index: {}", e)));
            }
        };

        self.get_product(id).await
    }

    async fn search_across_all_fields(&self, query: &str) -> Result<Vec<Product>> {
        match substring_needle(query) {
            Some(needle) => self.scan(|p| p.matches_any_field(&needle)),
            None => Ok(Vec::new()),
        }
    }

    async fn search_by_brand_or_description(&self, query: &str) -> Result<Vec<Product>> {
        match brand_or_description_needle(query) {
            Some(needle) => self.scan(|p| p.matches_brand_or_description(&needle)),
            None => Ok(Vec::new()),
        }
    }

    async fn clear(&self) -> Result<()> {
        // Products go first: title entries left behind are stale and reclaimable
        self.products_tree.clear().map_err(|e| {
            AppError::Database(format!("Failed to clear products: {}", e))
        })?;
        self.titles_tree.clear().map_err(|e| {
            AppError::Database(format!("Failed to clear title index: {}", e))
        })?;

        self.flush()?;

        tracing::debug!("Sled product store cleared");
        Ok(())
    }
}

use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::search::SearchResponse;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Search the catalog
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let term = params.term();

    if let Some(term) = term {
        let max = state.search.config().max_query_length;
        if term.trim().chars().count() > max {
            return Err(AppError::Validation(format!(
                "Search term must be at most {} characters",
                max
            )));
        }
    }

    let response = state.search.search(term).await.map_err(|e| {
        tracing::error!(error = %e, "Product search failed");
        AppError::Internal("Product search failed".to_string())
    })?;

    Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchParams {
    /// `q` takes precedence over `searchTerm` unless it is empty
    pub fn term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .filter(|q| !q.is_empty())
            .or(self.search_term.as_deref())
    }
}

/// List products page by page
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductsResponse>> {
    let (limit, offset) = params.parse()?;

    let page = state.store().find_all(limit, offset).await?;

    Ok(Json(ProductsResponse::new(
        page.products,
        page.total_items,
        limit,
        offset,
    )))
}

/// Raw pagination parameters, validated by [`ListParams::parse`]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListParams {
    /// Validated `(limit, offset)`; limit defaults to 20 and must be positive
    pub fn parse(&self) -> Result<(u32, u32)> {
        let invalid =
            || AppError::Validation("limit and offset must be non-negative integers".to_string());

        let limit = match self.limit.as_deref() {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| invalid())?,
            None => DEFAULT_PAGE_LIMIT,
        };
        let offset = match self.offset.as_deref() {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| invalid())?,
            None => 0,
        };

        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }

        Ok((limit, offset))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total_items: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl ProductsResponse {
    pub fn new(products: Vec<Product>, total_items: u64, limit: u32, offset: u32) -> Self {
        let limit = u64::from(limit);
        let total_pages = total_items.div_ceil(limit);
        let current_page = u64::from(offset) / limit + 1;

        Self {
            products,
            total_items,
            current_page,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }
}

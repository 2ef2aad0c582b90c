//! Repository lookup strategies for non-empty queries.

use crate::error::Result;
use crate::models::Product;
use crate::state::ProductStore;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Queries of this many characters or fewer never reach the
/// brand/description fallback.
pub const FALLBACK_MIN_EXCLUSIVE_LEN: usize = 3;

/// How a trimmed, non-empty query is turned into repository calls.
///
/// The two strategies are not equivalent: `ExactTitleThenFallback` misses
/// title substrings that are not an exact title, and ignores short queries
/// that miss the exact lookup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStrategy {
    /// Case-insensitive substring match on title, brand or description.
    #[default]
    Unified,
    /// Case-insensitive exact title lookup; when it misses and the query is
    /// longer than three characters, substring match on brand or description.
    ExactTitleThenFallback,
}

impl MatchStrategy {
    /// Run the lookup for `query` against `store`.
    ///
    /// Store errors are returned untouched.
    pub async fn find(&self, store: &dyn ProductStore, query: &str) -> Result<Vec<Product>> {
        match self {
            MatchStrategy::Unified => store.search_across_all_fields(query).await,
            MatchStrategy::ExactTitleThenFallback => {
                if let Some(product) = store.find_by_exact_title(query).await? {
                    return Ok(vec![product]);
                }
                if query.chars().count() > FALLBACK_MIN_EXCLUSIVE_LEN {
                    store.search_by_brand_or_description(query).await
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_unified() {
        assert_eq!(MatchStrategy::default(), MatchStrategy::Unified);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(MatchStrategy::Unified.to_string(), "unified");
        assert_eq!(
            MatchStrategy::from_str("exact_title_then_fallback").unwrap(),
            MatchStrategy::ExactTitleThenFallback
        );
        assert!(MatchStrategy::from_str("fuzzy").is_err());
    }

    #[test]
    fn test_serde_form() {
        let json = serde_json::to_string(&MatchStrategy::ExactTitleThenFallback).unwrap();
        assert_eq!(json, "\"exact_title_then_fallback\"");
    }
}

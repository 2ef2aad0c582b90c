//! Search configuration

use crate::search::MatchStrategy;
use serde::{Deserialize, Serialize};

/// Search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Repository lookup strategy for non-empty queries
    #[serde(default)]
    pub strategy: MatchStrategy,

    /// Page size used when the query is empty
    #[serde(default = "default_browse_limit")]
    pub browse_limit: u32,

    /// Longest search term accepted by the HTTP layer
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            browse_limit: default_browse_limit(),
            max_query_length: default_max_query_length(),
        }
    }
}

fn default_browse_limit() -> u32 {
    100
}

fn default_max_query_length() -> usize {
    255
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn strategy(mut self, strategy: MatchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn browse_limit(mut self, limit: u32) -> Self {
        self.config.browse_limit = limit;
        self
    }

    pub fn max_query_length(mut self, len: usize) -> Self {
        self.config.max_query_length = len;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, MatchStrategy::Unified);
        assert_eq!(config.browse_limit, 100);
        assert_eq!(config.max_query_length, 255);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfigBuilder::new()
            .strategy(MatchStrategy::ExactTitleThenFallback)
            .browse_limit(10)
            .build();
        assert_eq!(config.strategy, MatchStrategy::ExactTitleThenFallback);
        assert_eq!(config.browse_limit, 10);
    }
}

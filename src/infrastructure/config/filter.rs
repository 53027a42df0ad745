//! Listing filter configuration.

use serde::Deserialize;

use crate::domain::FilterCriteria;

const fn default_min_price() -> u64 {
    20_000
}

const fn default_max_price() -> u64 {
    100_000
}

fn default_keywords() -> Vec<String> {
    vec!["valve".into(), "index".into()]
}

/// Price interval and keywords, both inclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_min_price")]
    pub min_price: u64,
    #[serde(default = "default_max_price")]
    pub max_price: u64,
    /// Matched case-insensitively as substrings of the listing name.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl FilterConfig {
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.min_price, self.max_price, &self.keywords)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            max_price: default_max_price(),
            keywords: default_keywords(),
        }
    }
}

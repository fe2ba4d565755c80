use serde::{Deserialize, Serialize};

use crate::models::ListingKind;
use crate::query::sort::SortKey;

/// Query parameters for one listing fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Which directory to query (offices or packages)
    pub kind: ListingKind,
    /// Free-text search
    pub search_text: Option<String>,
    /// Minimum price
    pub min_price: Option<f64>,
    /// Maximum price
    pub max_price: Option<f64>,
    /// Minimum duration in days
    pub min_duration: Option<u32>,
    /// Maximum duration in days
    pub max_duration: Option<u32>,
    /// Rating floor (0-5)
    pub min_rating: Option<f32>,
    /// Exact city constraint
    pub city: Option<String>,
    /// Requested sort key
    pub sort: Option<SortKey>,
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Active locale for translated fields
    pub locale: String,
}

impl ListingQuery {
    pub fn new(kind: ListingKind, page_size: u32, locale: impl Into<String>) -> Self {
        Self {
            kind,
            search_text: None,
            min_price: None,
            max_price: None,
            min_duration: None,
            max_duration: None,
            min_rating: None,
            city: None,
            sort: None,
            page: 1,
            page_size,
            locale: locale.into(),
        }
    }

    /// Encode the populated fields as URL query pairs
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.page_size.to_string()),
            ("locale".to_string(), self.locale.clone()),
        ];
        if let Some(text) = self.search_text.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("search".to_string(), text.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price".to_string(), max.to_string()));
        }
        if let Some(min) = self.min_duration {
            pairs.push(("min_duration".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_duration {
            pairs.push(("max_duration".to_string(), max.to_string()));
        }
        if let Some(floor) = self.min_rating {
            pairs.push(("min_rating".to_string(), floor.to_string()));
        }
        if let Some(city) = self.city.as_deref() {
            pairs.push(("city".to_string(), city.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort".to_string(), sort.as_str().to_string()));
        }
        pairs
    }
}

/// One entry of a reorder commit payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderEntry {
    pub id: String,
    pub display_order: u32,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub locale: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            locale: "en".to_string(),
        }
    }
}

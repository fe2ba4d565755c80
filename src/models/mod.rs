use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of directory listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Office,
    Package,
}

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Canonical listing record (travel office or package)
///
/// Optional numeric fields stay `None` when the backend omits them —
/// `0` is a valid price and a valid rating, so missing must never be
/// collapsed onto it. Sorting and filtering apply the "missing sorts
/// worst" convention instead (see `query::sort`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingItem {
    pub id: String,
    pub kind: ListingKind,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_days: Option<u32>,
    /// Star rating, clamped to [0, 5] at normalization time
    pub rating: Option<f32>,
    pub location: Option<GeoPoint>,
    pub city: Option<String>,
    pub is_featured: bool,
}

impl ListingItem {
    /// Price with the missing-sorts-worst convention applied
    pub fn price_key(&self) -> f64 {
        self.price.unwrap_or(f64::INFINITY)
    }

    /// Duration with the missing-sorts-worst convention applied
    pub fn duration_key(&self) -> f64 {
        self.duration_days.map(f64::from).unwrap_or(f64::INFINITY)
    }

    /// Rating with missing treated as zero stars
    pub fn rating_key(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}

/// One canonical page of results, independent of backend response shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Page<T> {
    /// Build a page, deriving `total_pages` and clamping `current_page`
    pub fn new(items: Vec<T>, total_items: u64, page_size: u32, current_page: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(u64::from(page_size)) as u32;
        Self {
            items,
            total_items,
            page_size,
            current_page: current_page.clamp(1, total_pages.max(1)),
            total_pages,
            fetched_at: Utc::now(),
        }
    }

    /// Empty page for the recovered-error and zero-results cases
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 0, page_size, 1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Member of a curated, reorderable media collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderableItem {
    pub id: String,
    /// Persisted 1-based rank within the owning collection
    pub display_order: u32,
    pub is_featured: bool,
}

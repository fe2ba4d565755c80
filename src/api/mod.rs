pub mod client;
pub mod normalize;
pub mod traits;
pub mod types;

pub use client::ApiClient;
pub use normalize::{normalize_page, ResponseShape};
pub use traits::{FeaturedSink, ListingSource, ReorderSink};
pub use types::{ApiConfig, ListingQuery, OrderEntry};

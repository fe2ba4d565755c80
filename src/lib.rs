//! travel-scout — listing & curation engine for a travel-office and
//! package directory.
//!
//! The engine sits between a host UI and a REST backend whose paginated
//! response shapes cannot be trusted to stay consistent. It normalizes
//! whatever arrives into one canonical [`models::Page`], applies
//! filtering, geo-distance ranking, and sorting client-side, keeps
//! pagination state honest across filter changes, and manages optimistic
//! reordering and featured toggles over curated image collections with
//! rollback on failure.
//!
//! Rendering, routing, authentication, and locale selection are the host
//! application's concern; the engine receives already-authorized requests
//! and returns normalized, sorted, paginated results plus draft state.

pub mod api;
pub mod curation;
pub mod error;
pub mod models;
pub mod query;

pub use api::{ApiClient, ApiConfig, ListingQuery, ListingSource};
pub use curation::{FeaturedSelector, OrderingEditor};
pub use error::EngineError;
pub use models::{GeoPoint, ListingItem, ListingKind, OrderableItem, Page};
pub use query::{FilterState, ListingController, SortKey, SortState, ViewState};

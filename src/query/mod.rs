pub mod controller;
pub mod filter;
pub mod geo;
pub mod paging;
pub mod sort;

pub use controller::{Debounce, ListingController, ResponseOutcome, ViewState, SEARCH_DEBOUNCE};
pub use filter::FilterState;
pub use paging::{Paginator, DEFAULT_PAGE_SIZE};
pub use sort::{SortKey, SortState};

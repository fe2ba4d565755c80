use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::traits::ListingSource;
use crate::api::types::ListingQuery;
use crate::error::EngineError;
use crate::models::{GeoPoint, ListingItem, ListingKind, Page};
use crate::query::filter::{self, FilterState};
use crate::query::paging::Paginator;
use crate::query::sort::{self, SortKey, SortState};

/// Recommended quiet period for free-text input
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the host should render for this view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// A fetch is in flight
    Loading,
    /// Valid query, at least one visible item
    Ready,
    /// Valid query, zero matches (distinct from Failed: render "no
    /// results", not "try again")
    Empty,
    /// The last fetch failed at the transport level
    Failed,
}

/// Outcome of applying one completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Response accepted; `page_corrected` asks the caller to re-fetch
    /// at the clamped page number
    Applied { page_corrected: bool },
    /// A newer request was issued while this one was in flight
    Stale,
}

/// Debounce guard for free-text search input
///
/// Resource discipline only — stale-response suppression already makes
/// racing fetches safe, this just avoids one fetch per keystroke.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    generation: u64,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    /// Record an edit; the returned token identifies it
    pub fn touch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Wait out the quiet period
    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }

    /// True when no newer edit arrived after the tokened one
    pub fn is_settled(&self, token: u64) -> bool {
        token == self.generation
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

/// Query-cycle owner for one listing view
///
/// Holds that view's filter, sort, and pagination state, fetches through
/// a [`ListingSource`], and applies filtering and sorting client-side on
/// the normalized page. Each view owns its own controller instance; no
/// shared globals.
pub struct ListingController<S> {
    source: S,
    kind: ListingKind,
    locale: String,
    filter: FilterState,
    sort: SortState,
    pager: Paginator<ListingItem>,
    /// Monotonic sequence for stale-response suppression
    seq: u64,
    state: ViewState,
    visible: Vec<ListingItem>,
    bounds_seeded: bool,
    pub debounce: Debounce,
}

impl<S: ListingSource> ListingController<S> {
    pub fn new(source: S, kind: ListingKind, page_size: u32, locale: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            locale: locale.into(),
            filter: FilterState::default(),
            sort: SortState::default(),
            pager: Paginator::new(page_size),
            seq: 0,
            state: ViewState::Empty,
            visible: Vec::new(),
            bounds_seeded: false,
            debounce: Debounce::default(),
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.state
    }

    /// Items of the current page after client-side filter and sort
    pub fn visible_items(&self) -> &[ListingItem] {
        &self.visible
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn current_page(&self) -> u32 {
        self.pager.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.pager.last().map_or(0, |p| p.total_pages)
    }

    pub fn total_items(&self) -> u64 {
        self.pager.last().map_or(0, |p| p.total_items)
    }

    /// Sort keys this view may offer, given geolocation availability
    pub fn available_sort_keys(&self) -> Vec<SortKey> {
        SortState::available_keys(self.sort.reference.is_some())
    }

    // --- mutators -------------------------------------------------------
    // Every filter/sort mutation resets pagination: a page number from a
    // previous filter context is never reused.

    /// Record a search edit; returns the debounce token the host should
    /// wait on before calling [`refresh`](Self::refresh)
    pub fn set_search_text(&mut self, text: impl Into<String>) -> u64 {
        self.filter.search_text = Some(text.into());
        self.pager.reset();
        self.debounce.touch()
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.filter.price_range = Some((min, max));
        self.pager.reset();
    }

    pub fn set_duration_range(&mut self, min: u32, max: u32) {
        self.filter.duration_range = Some((min, max));
        self.pager.reset();
    }

    pub fn set_min_rating(&mut self, floor: f32) {
        self.filter.min_rating = Some(floor.clamp(0.0, 5.0));
        self.pager.reset();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.filter.city = Some(city.into());
        self.pager.reset();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.pager.reset();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        if key == SortKey::DistanceAsc && self.sort.reference.is_none() {
            warn!("distance sort requested without a reference point, degrading to name");
        }
        self.sort.key = key;
        self.pager.reset();
    }

    /// Geolocation reference from the host; `None` withdraws distance
    /// sorting as an option
    pub fn set_reference(&mut self, reference: Option<GeoPoint>) {
        self.sort.reference = reference;
    }

    pub fn set_page(&mut self, page: u32) {
        self.pager.set_page(page);
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.pager.set_page_size(size);
    }

    // --- query cycle ----------------------------------------------------

    /// Issue a new request sequence number and build its query
    ///
    /// Split from [`apply_response`](Self::apply_response) so hosts can
    /// drive their own fetch loop; [`refresh`](Self::refresh) composes
    /// the two.
    pub fn begin_request(&mut self) -> (u64, ListingQuery) {
        self.seq += 1;
        self.state = ViewState::Loading;
        (self.seq, self.build_query())
    }

    /// Apply one completed fetch, suppressing stale responses
    ///
    /// "Last request wins": the response is discarded unless its sequence
    /// number still matches the latest issued request.
    pub fn apply_response(
        &mut self,
        seq: u64,
        result: Result<Page<ListingItem>, EngineError>,
    ) -> ResponseOutcome {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "discarding stale response");
            return ResponseOutcome::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(EngineError::MalformedResponse { detail }) => {
                // Recovered locally: the UI gets an empty state, not a crash.
                warn!("malformed response recovered as empty page: {}", detail);
                Page::empty(self.pager.page_size())
            }
            Err(err) => {
                warn!("listing fetch failed: {}", err);
                self.state = ViewState::Failed;
                return ResponseOutcome::Applied {
                    page_corrected: false,
                };
            }
        };

        if !self.bounds_seeded && self.filter.is_unconstrained() && !page.items.is_empty() {
            self.filter.derive_bounds(&page.items);
            self.bounds_seeded = true;
        }

        let corrected = self.pager.on_new_data(page);
        self.recompute_visible();
        ResponseOutcome::Applied {
            page_corrected: corrected,
        }
    }

    /// Run one full fetch cycle, re-fetching once if the pagination
    /// clamp corrected the requested page
    pub async fn refresh(&mut self) -> ViewState {
        for _ in 0..2 {
            let (seq, query) = self.begin_request();
            let result = self.source.fetch_page(&query).await;
            match self.apply_response(seq, result) {
                ResponseOutcome::Applied {
                    page_corrected: true,
                } => {
                    info!(page = self.pager.current_page(), "re-fetching at corrected page");
                    continue;
                }
                _ => break,
            }
        }
        self.state
    }

    fn build_query(&self) -> ListingQuery {
        let mut query = ListingQuery::new(self.kind, self.pager.page_size(), self.locale.clone());
        query.page = self.pager.current_page();
        query.search_text = self.filter.search_text.clone();
        if let Some((min, max)) = self.filter.price_range {
            query.min_price = Some(min).filter(|m| m.is_finite());
            query.max_price = Some(max).filter(|m| m.is_finite());
        }
        if let Some((min, max)) = self.filter.duration_range {
            query.min_duration = Some(min);
            query.max_duration = Some(max);
        }
        query.min_rating = self.filter.min_rating;
        query.city = self.filter.city.clone();
        query.sort = Some(self.sort.key);
        query
    }

    fn recompute_visible(&mut self) {
        let items = self
            .pager
            .last()
            .map(|page| page.items.as_slice())
            .unwrap_or_default();
        let filtered = filter::apply(items, &self.filter);
        self.visible = sort::apply(&filtered, &self.sort);
        self.state = if self.visible.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready
        };
    }
}

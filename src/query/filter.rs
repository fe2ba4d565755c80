use serde::{Deserialize, Serialize};

use crate::models::ListingItem;

/// Filter state for one listing view
///
/// `None` on any constraint means "no constraint". The `*_bounds`
/// fields are observations, not constraints: hosts read them to place
/// range-widget endpoints, and write the widget's position back into
/// the corresponding `*_range`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: Option<String>,
    pub price_range: Option<(f64, f64)>,
    pub duration_range: Option<(u32, u32)>,
    pub min_rating: Option<f32>,
    pub city: Option<String>,
    /// Observed price min/max from the first unfiltered page
    pub price_bounds: Option<(f64, f64)>,
    /// Observed duration min/max from the first unfiltered page
    pub duration_bounds: Option<(u32, u32)>,
}

impl FilterState {
    /// Seed the range-widget bounds from the observed min/max of an
    /// unfiltered page. An empty observation set leaves them unset (full
    /// domain) — derived `[0, 0]` bounds fed back into a range would
    /// vacuously filter everything out.
    pub fn derive_bounds(&mut self, items: &[ListingItem]) {
        let prices: Vec<f64> = items.iter().filter_map(|i| i.price).collect();
        if !prices.is_empty() {
            let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            self.price_bounds = Some((min, max));
        }

        let durations: Vec<u32> = items.iter().filter_map(|i| i.duration_days).collect();
        if let (Some(&min), Some(&max)) = (durations.iter().min(), durations.iter().max()) {
            self.duration_bounds = Some((min, max));
        }
    }

    /// Drop every constraint (the explicit "clear filters" action);
    /// observed bounds survive, they describe the data rather than the
    /// user's intent
    pub fn clear(&mut self) {
        *self = Self {
            price_bounds: self.price_bounds,
            duration_bounds: self.duration_bounds,
            ..Self::default()
        };
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_text.as_deref().map_or(true, str::is_empty)
            && self.price_range.is_none()
            && self.duration_range.is_none()
            && self.min_rating.is_none()
            && self.city.is_none()
    }
}

/// Apply all active predicates (logical AND), preserving input order
///
/// Pure function: no side effects, the input slice is left untouched.
/// An item missing a numeric field counts as "worst" (+inf), so it fails
/// any range with a finite upper bound and passes unbounded ranges.
pub fn apply(items: &[ListingItem], state: &FilterState) -> Vec<ListingItem> {
    items
        .iter()
        .filter(|item| matches(item, state))
        .cloned()
        .collect()
}

fn matches(item: &ListingItem, state: &FilterState) -> bool {
    if let Some(text) = state.search_text.as_deref().filter(|t| !t.is_empty()) {
        let needle = text.to_lowercase();
        let in_name = item.name.to_lowercase().contains(&needle);
        let in_description = item
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle));
        if !in_name && !in_description {
            return false;
        }
    }

    if let Some((min, max)) = state.price_range {
        if !in_range(item.price_key(), min, max) {
            return false;
        }
    }

    if let Some((min, max)) = state.duration_range {
        if !in_range(item.duration_key(), f64::from(min), f64::from(max)) {
            return false;
        }
    }

    if let Some(floor) = state.min_rating {
        if item.rating_key() < floor {
            return false;
        }
    }

    if let Some(city) = state.city.as_deref() {
        let matches_city = item
            .city
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(city));
        if !matches_city {
            return false;
        }
    }

    true
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    // A missing value is +inf; it still passes a range whose upper bound
    // is itself unbounded.
    value >= min && value <= max
}

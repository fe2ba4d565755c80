use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, ListingItem};
use crate::query::geo;

/// Active sort key for a listing view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    DurationAsc,
    DurationDesc,
    RatingDesc,
    DistanceAsc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// Wire representation used in listing query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::DurationAsc => "duration_asc",
            SortKey::DurationDesc => "duration_desc",
            SortKey::RatingDesc => "rating_desc",
            SortKey::DistanceAsc => "distance_asc",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
        }
    }
}

/// Sort key plus the reference point distance ordering needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    /// Only consulted when `key` is `DistanceAsc`
    pub reference: Option<GeoPoint>,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::NameAsc,
            reference: None,
        }
    }
}

impl SortState {
    /// Keys a host may offer; distance ordering needs a reference point
    pub fn available_keys(has_reference: bool) -> Vec<SortKey> {
        let mut keys = vec![
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::DurationAsc,
            SortKey::DurationDesc,
            SortKey::RatingDesc,
            SortKey::NameAsc,
            SortKey::NameDesc,
        ];
        if has_reference {
            keys.insert(5, SortKey::DistanceAsc);
        }
        keys
    }

    /// Key actually used: distance without a reference degrades to name
    fn effective_key(&self) -> SortKey {
        if self.key == SortKey::DistanceAsc && self.reference.is_none() {
            SortKey::NameAsc
        } else {
            self.key
        }
    }
}

/// Stable sort with an id-ascending final tie-break
///
/// Equal keys keep their relative input order first; ids disambiguate
/// only genuinely identical keys so repeated calls on identical input
/// are reproducible.
pub fn apply(items: &[ListingItem], state: &SortState) -> Vec<ListingItem> {
    let mut sorted = items.to_vec();
    let key = state.effective_key();
    sorted.sort_by(|a, b| compare(a, b, key, state.reference.as_ref()).then_with(|| a.id.cmp(&b.id)));
    sorted
}

fn compare(a: &ListingItem, b: &ListingItem, key: SortKey, reference: Option<&GeoPoint>) -> Ordering {
    match key {
        SortKey::PriceAsc => total_cmp(a.price_key(), b.price_key()),
        SortKey::PriceDesc => total_cmp(b.price_key(), a.price_key()),
        SortKey::DurationAsc => total_cmp(a.duration_key(), b.duration_key()),
        SortKey::DurationDesc => total_cmp(b.duration_key(), a.duration_key()),
        SortKey::RatingDesc => b
            .rating_key()
            .partial_cmp(&a.rating_key())
            .unwrap_or(Ordering::Equal),
        SortKey::DistanceAsc => total_cmp(
            geo::distance_km(reference, a.location.as_ref()),
            geo::distance_km(reference, b.location.as_ref()),
        ),
        SortKey::NameAsc => name_cmp(a, b),
        SortKey::NameDesc => name_cmp(b, a),
    }
}

fn total_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn name_cmp(a: &ListingItem, b: &ListingItem) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingKind;

    fn item(id: &str, name: &str, price: Option<f64>) -> ListingItem {
        ListingItem {
            id: id.into(),
            kind: ListingKind::Package,
            name: name.into(),
            description: None,
            price,
            duration_days: None,
            rating: None,
            location: None,
            city: None,
            is_featured: false,
        }
    }

    fn state(key: SortKey) -> SortState {
        SortState {
            key,
            reference: None,
        }
    }

    #[test]
    fn missing_prices_sink_last_in_input_order() {
        let items = vec![
            item("a", "A", None),
            item("b", "B", Some(300.0)),
            item("c", "C", None),
            item("d", "D", Some(100.0)),
            item("e", "E", Some(200.0)),
        ];
        let ids: Vec<String> = apply(&items, &state(SortKey::PriceAsc))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["d", "e", "b", "a", "c"]);
    }

    #[test]
    fn sorting_sorted_input_is_noop() {
        let items = vec![
            item("1", "A", Some(10.0)),
            item("2", "B", Some(20.0)),
            item("3", "C", Some(30.0)),
        ];
        let sorted = apply(&items, &state(SortKey::PriceAsc));
        let ids: Vec<&str> = sorted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn id_breaks_exact_ties_deterministically() {
        let items = vec![
            item("z", "Same", Some(50.0)),
            item("a", "Same", Some(50.0)),
        ];
        let ids: Vec<String> = apply(&items, &state(SortKey::PriceAsc))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    #[test]
    fn distance_sorts_colocated_first_and_unlocated_last() {
        let reference = GeoPoint { lat: 24.0, lng: 39.0 };
        let mut near = item("near", "Near", None);
        near.location = Some(GeoPoint { lat: 24.0, lng: 39.0 });
        let mut far = item("far", "Far", None);
        far.location = Some(GeoPoint { lat: 26.0, lng: 41.0 });
        let unlocated = item("none", "None", None);

        let sort = SortState {
            key: SortKey::DistanceAsc,
            reference: Some(reference),
        };
        let ids: Vec<String> = apply(&[unlocated, far, near], &sort)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["near", "far", "none"]);
    }

    #[test]
    fn distance_without_reference_degrades_to_name() {
        let items = vec![item("1", "Zebra", None), item("2", "Alpha", None)];
        let ids: Vec<String> = apply(&items, &state(SortKey::DistanceAsc))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn available_keys_hide_distance_without_reference() {
        assert!(!SortState::available_keys(false).contains(&SortKey::DistanceAsc));
        assert!(SortState::available_keys(true).contains(&SortKey::DistanceAsc));
    }

    #[test]
    fn rating_desc_puts_unrated_last() {
        let mut a = item("a", "A", None);
        a.rating = Some(4.0);
        let b = item("b", "B", None);
        let mut c = item("c", "C", None);
        c.rating = Some(5.0);

        let ids: Vec<String> = apply(&[a, b, c], &state(SortKey::RatingDesc))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}

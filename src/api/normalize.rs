use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{GeoPoint, ListingItem, ListingKind, Page};

/// Recognized paginated response shapes, in detection priority order
///
/// Real backends have been observed to use all three, varying per
/// endpoint, so detection is an explicit ordered list with first match
/// winning rather than ad-hoc duck typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The payload is itself an array of records
    BareArray,
    /// Laravel-style paginator: records at `.data.data`, totals beside them
    NestedData,
    /// Records at `.data`, no pagination metadata
    FlatData,
}

impl ResponseShape {
    pub fn detect(raw: &Value) -> Option<ResponseShape> {
        if raw.is_array() {
            return Some(ResponseShape::BareArray);
        }
        if raw.pointer("/data/data").is_some_and(Value::is_array) {
            return Some(ResponseShape::NestedData);
        }
        if raw.get("data").is_some_and(Value::is_array) {
            return Some(ResponseShape::FlatData);
        }
        None
    }
}

/// Normalize an arbitrary listing payload into a canonical page
///
/// `requested_page` and `page_size` fill in whatever pagination metadata
/// the payload does not carry itself. Returns `MalformedResponse` when
/// no shape matches; callers recover with [`Page::empty`] so the UI
/// degrades to an empty state instead of crashing.
pub fn normalize_page(
    raw: &Value,
    kind: ListingKind,
    requested_page: u32,
    page_size: u32,
    locale: &str,
) -> Result<Page<ListingItem>, EngineError> {
    let shape = ResponseShape::detect(raw).ok_or_else(|| {
        warn!("unrecognized listing payload shape");
        EngineError::malformed("no recognized pagination shape")
    })?;

    let (records, meta) = match shape {
        ResponseShape::BareArray => (raw.as_array(), None),
        ResponseShape::NestedData => (
            raw.pointer("/data/data").and_then(Value::as_array),
            raw.get("data"),
        ),
        ResponseShape::FlatData => (raw.get("data").and_then(Value::as_array), None),
    };
    let records = records.ok_or_else(|| EngineError::malformed("record array vanished"))?;

    let items: Vec<ListingItem> = records
        .iter()
        .filter_map(|record| map_record(record, kind, locale))
        .collect();

    debug!(
        shape = ?shape,
        records = records.len(),
        mapped = items.len(),
        "normalized listing payload"
    );

    let total_items = meta
        .and_then(|m| field_u64(m, &["total"]))
        .unwrap_or(items.len() as u64);
    let page_size = meta
        .and_then(|m| field_u64(m, &["per_page"]))
        .map(|n| n as u32)
        .unwrap_or(page_size)
        .max(1);
    let current_page = meta
        .and_then(|m| field_u64(m, &["current_page"]))
        .map(|n| n as u32)
        .unwrap_or(requested_page);

    // Trust a supplied last_page; derive it with ceil division otherwise.
    let total_pages = meta
        .and_then(|m| field_u64(m, &["last_page"]))
        .map(|n| n as u32)
        .unwrap_or_else(|| total_items.div_ceil(u64::from(page_size)) as u32);

    Ok(Page {
        items,
        total_items,
        page_size,
        current_page: current_page.clamp(1, total_pages.max(1)),
        total_pages,
        fetched_at: Utc::now(),
    })
}

/// Map one raw record into a `ListingItem`, skipping records without the
/// minimum of an id and a name
fn map_record(raw: &Value, kind: ListingKind, locale: &str) -> Option<ListingItem> {
    let translation = locale_translation(raw, locale);

    let id = field_string(raw, &["id"])?;
    let name = translation
        .and_then(|t| field_string(t, &["name", "title"]))
        .or_else(|| field_string(raw, &["name", "title"]))?;
    let description = translation
        .and_then(|t| field_string(t, &["description"]))
        .or_else(|| field_string(raw, &["description"]));

    let rating = field_f64(raw, &["rating", "stars"]).map(|r| (r as f32).clamp(0.0, 5.0));
    let duration_days = field_f64(raw, &["duration_days", "days", "duration"])
        .filter(|d| d.is_finite() && *d >= 0.0)
        .map(|d| d as u32);

    Some(ListingItem {
        id,
        kind,
        name,
        description,
        price: field_f64(raw, &["price"]),
        duration_days,
        rating,
        location: location_of(raw),
        city: field_string(raw, &["city"]),
        is_featured: field_bool(raw, &["is_featured", "featured"]).unwrap_or(false),
    })
}

/// Translation sub-object for the active locale, if the record has one
///
/// Accepts both an array of `{locale, ...}` entries and an object keyed
/// by locale code.
fn locale_translation<'a>(raw: &'a Value, locale: &str) -> Option<&'a Value> {
    let translations = raw.get("translations")?;
    match translations {
        Value::Array(entries) => entries.iter().find(|entry| {
            entry
                .get("locale")
                .and_then(Value::as_str)
                .is_some_and(|l| l.eq_ignore_ascii_case(locale))
        }),
        Value::Object(map) => map.get(locale),
        _ => None,
    }
}

/// Both coordinates must be present and finite to form a point; the
/// backend nulls them independently.
fn location_of(raw: &Value) -> Option<GeoPoint> {
    let lat = field_f64(raw, &["lat", "latitude"])?;
    let lng = field_f64(raw, &["lng", "longitude"])?;
    if lat.is_finite() && lng.is_finite() {
        Some(GeoPoint { lat, lng })
    } else {
        None
    }
}

/// First non-null string under any of the candidate keys; numbers are
/// rendered to strings (ids arrive both ways)
fn field_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numeric field that may arrive as a JSON number or a numeric string.
/// Unparsable or missing resolves to `None`, never `0` — zero is a valid
/// price and a valid rating.
fn field_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match raw.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn field_u64(raw: &Value, keys: &[&str]) -> Option<u64> {
    field_f64(raw, keys).filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u64)
}

fn field_bool(raw: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| match raw.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

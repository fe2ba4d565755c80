use crate::models::GeoPoint;

/// Mean Earth radius in kilometers (spherical model)
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers
///
/// Returns `f64::INFINITY` when either point is absent or carries a
/// non-finite coordinate, so incomplete records sink to the bottom of a
/// distance sort instead of crashing it.
pub fn distance_km(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return f64::INFINITY,
    };
    if !a.lat.is_finite() || !a.lng.is_finite() || !b.lat.is_finite() || !b.lng.is_finite() {
        return f64::INFINITY;
    }

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn identity_is_zero() {
        let medina = p(24.0, 39.0);
        assert!(distance_km(Some(&medina), Some(&medina)).abs() < 1e-9);
    }

    #[test]
    fn symmetry() {
        let a = p(24.4672, 39.6111);
        let b = p(21.4225, 39.8262);
        let ab = distance_km(Some(&a), Some(&b));
        let ba = distance_km(Some(&b), Some(&a));
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn medina_to_mecca_roughly_340km() {
        let medina = p(24.4672, 39.6111);
        let mecca = p(21.4225, 39.8262);
        let d = distance_km(Some(&medina), Some(&mecca));
        assert!((300.0..380.0).contains(&d), "got {d}");
    }

    #[test]
    fn missing_point_is_infinite() {
        let a = p(24.0, 39.0);
        assert_eq!(distance_km(Some(&a), None), f64::INFINITY);
        assert_eq!(distance_km(None, Some(&a)), f64::INFINITY);
        assert_eq!(distance_km(None, None), f64::INFINITY);
    }

    #[test]
    fn non_finite_coordinate_is_infinite() {
        let a = p(f64::NAN, 39.0);
        let b = p(24.0, 39.0);
        assert_eq!(distance_km(Some(&a), Some(&b)), f64::INFINITY);
    }
}

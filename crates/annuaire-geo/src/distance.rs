//! Great-circle distance and radius-filtered proximity ranking.

use annuaire_core::{Business, GeoPoint};
use serde::Serialize;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two degree-valued points, in kilometers.
///
/// No datum or projection correction is applied; accuracy is ample at city
/// scale.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Anything that may carry a position.
pub trait Located {
    fn location(&self) -> Option<GeoPoint>;
}

impl Located for Business {
    fn location(&self) -> Option<GeoPoint> {
        self.coordinates.map(|c| c.point())
    }
}

impl Located for GeoPoint {
    fn location(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

/// An entity paired with its distance from the query origin.
///
/// Serializes as the entity's own fields plus `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked<'a, T> {
    #[serde(flatten)]
    pub item: &'a T,
    /// Kilometers from the origin.
    pub distance: f64,
}

/// Entities within `max_distance_km` of `origin`, closest first.
///
/// Entities without a location are skipped. Equal distances keep their
/// input order.
pub fn nearest<'a, T, I>(origin: GeoPoint, entities: I, max_distance_km: f64) -> Vec<Ranked<'a, T>>
where
    T: Located + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut ranked: Vec<Ranked<'a, T>> = entities
        .into_iter()
        .filter_map(|item| {
            let point = item.location()?;
            let distance = distance_km(origin, point);
            (distance <= max_distance_km).then_some(Ranked { item, distance })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

//! Coordinate types shared by the resolver, the ranker and stored records.

use serde::{Deserialize, Serialize};

/// How a stored coordinate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// The address matched a known locality.
    High,
    /// Fallback estimate around the city center.
    Medium,
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::High => write!(f, "high"),
            Precision::Medium => write!(f, "medium"),
        }
    }
}

/// Coordinates attached to a business record. Always carry a precision tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
    pub precision: Precision,
}

impl Coordinates {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A plain degree-valued position.
///
/// `accuracy` (meters) is only set when the point comes from a live device fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy: None,
        }
    }

    #[must_use]
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }
}

impl From<Coordinates> for GeoPoint {
    fn from(coords: Coordinates) -> Self {
        coords.point()
    }
}

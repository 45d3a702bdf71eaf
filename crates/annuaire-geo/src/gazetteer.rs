//! Offline address resolution against a static table of Conakry localities.
//!
//! The first locality whose folded name occurs in the folded address wins, so
//! neighbourhoods are listed before the communes that contain them. Resolved
//! points are jittered so businesses in the same locality do not stack on a
//! single map pin.

use annuaire_core::text::fold;
use annuaire_core::{Coordinates, GeoPoint, Precision};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Jitter applied to a matched locality, in degrees (about ±55 m).
const LOCALITY_JITTER_DEG: f64 = 0.0005;

/// Jitter applied to the fallback center, in degrees (about ±550 m).
const FALLBACK_JITTER_DEG: f64 = 0.005;

/// Fallback when nothing in the address is recognized.
const CONAKRY_CENTER: GeoPoint = GeoPoint {
    lat: 9.537_0,
    lng: -13.678_5,
    accuracy: None,
};

/// `(min_lat, max_lat, min_lng, max_lng)` enclosing every point the default
/// gazetteer can produce, jitter included.
pub const SERVICE_AREA: (f64, f64, f64, f64) = (9.40, 9.80, -13.85, -13.45);

/// Neighbourhoods first, communes last.
const CONAKRY_LOCALITIES: &[(&str, f64, f64)] = &[
    // Kaloum
    ("almamya", 9.511_0, -13.711_0),
    ("boulbinet", 9.507_0, -13.718_0),
    ("sandervalia", 9.515_0, -13.708_0),
    ("coronthie", 9.518_0, -13.704_0),
    ("manquepas", 9.509_0, -13.714_0),
    // Dixinn
    ("camayenne", 9.540_0, -13.690_0),
    ("belle vue", 9.542_0, -13.682_0),
    ("miniere", 9.555_0, -13.676_0),
    ("dixinn port", 9.533_0, -13.688_0),
    ("landreah", 9.550_0, -13.681_0),
    ("corniche nord", 9.548_0, -13.692_0),
    // Matam
    ("coleah", 9.525_0, -13.688_0),
    ("madina", 9.543_0, -13.661_0),
    ("bonfi", 9.532_0, -13.667_0),
    ("hafia", 9.546_0, -13.672_0),
    // Ratoma
    ("hamdallaye", 9.558_0, -13.650_0),
    ("bambeto", 9.572_0, -13.635_0),
    ("taouyah", 9.570_0, -13.666_0),
    ("kipe", 9.590_0, -13.660_0),
    ("kaporo", 9.613_0, -13.653_0),
    ("nongo", 9.635_0, -13.645_0),
    ("lambanyi", 9.630_0, -13.625_0),
    ("sonfonia", 9.653_0, -13.600_0),
    ("cosa", 9.584_0, -13.625_0),
    ("koloma", 9.593_0, -13.610_0),
    ("simbaya", 9.618_0, -13.592_0),
    // Matoto
    ("gbessia", 9.572_0, -13.614_0),
    ("dabompa", 9.595_0, -13.585_0),
    ("tombolia", 9.612_0, -13.575_0),
    // After "tombolia", which contains it.
    ("tombo", 9.513_0, -13.700_0),
    // Communes
    ("kaloum", 9.509_2, -13.712_2),
    ("dixinn", 9.544_7, -13.678_6),
    ("matam", 9.535_0, -13.652_0),
    ("ratoma", 9.587_0, -13.648_0),
    ("matoto", 9.576_0, -13.611_0),
];

/// A named place and its approximate center.
#[derive(Debug, Clone, PartialEq)]
pub struct Locality {
    /// Folded (lowercase, accent-free) name matched against addresses.
    pub name: String,
    pub point: GeoPoint,
}

impl Locality {
    #[must_use]
    pub fn new(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: fold(name),
            point: GeoPoint::new(lat, lng),
        }
    }
}

/// Ordered locality table plus the fallback center used when nothing matches.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    localities: Vec<Locality>,
    fallback: GeoPoint,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::conakry()
    }
}

impl Gazetteer {
    /// The built-in table of Conakry communes and neighbourhoods.
    #[must_use]
    pub fn conakry() -> Self {
        Self::new(
            CONAKRY_LOCALITIES
                .iter()
                .map(|&(name, lat, lng)| Locality::new(name, lat, lng))
                .collect(),
            CONAKRY_CENTER,
        )
    }

    #[must_use]
    pub fn new(localities: Vec<Locality>, fallback: GeoPoint) -> Self {
        Self {
            localities,
            fallback,
        }
    }

    #[must_use]
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }

    #[must_use]
    pub fn fallback(&self) -> GeoPoint {
        self.fallback
    }

    /// First locality whose name occurs in `address`, without jitter.
    #[must_use]
    pub fn lookup(&self, address: &str) -> Option<&Locality> {
        let folded = fold(address);
        if folded.is_empty() {
            return None;
        }
        self.localities
            .iter()
            .find(|loc| !loc.name.is_empty() && folded.contains(&loc.name))
    }

    /// Resolve `address` to jittered coordinates. Never fails: unrecognized
    /// or empty input falls back to the city center at medium precision.
    pub fn resolve_with<R: Rng + ?Sized>(&self, rng: &mut R, address: &str) -> Coordinates {
        if let Some(locality) = self.lookup(address) {
            return jitter(rng, locality.point, LOCALITY_JITTER_DEG, Precision::High);
        }

        tracing::debug!(address, "no known locality in address, using city center");
        jitter(rng, self.fallback, FALLBACK_JITTER_DEG, Precision::Medium)
    }
}

fn jitter<R: Rng + ?Sized>(
    rng: &mut R,
    center: GeoPoint,
    spread: f64,
    precision: Precision,
) -> Coordinates {
    Coordinates {
        lat: center.lat + rng.random_range(-spread..=spread),
        lng: center.lng + rng.random_range(-spread..=spread),
        precision,
    }
}

/// A gazetteer bundled with its own random source.
///
/// Tests inject a seeded generator through [`GeoResolver::with_rng`] to get
/// reproducible coordinates.
#[derive(Debug)]
pub struct GeoResolver<R = StdRng> {
    gazetteer: Gazetteer,
    rng: R,
}

impl GeoResolver<StdRng> {
    /// Resolver over the Conakry gazetteer, seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for GeoResolver<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GeoResolver<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            gazetteer: Gazetteer::conakry(),
            rng,
        }
    }

    #[must_use]
    pub fn with_gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    #[must_use]
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn resolve(&mut self, address: &str) -> Coordinates {
        self.gazetteer.resolve_with(&mut self.rng, address)
    }
}

/// Resolve `address` against the Conakry gazetteer using thread-local randomness.
#[must_use]
pub fn resolve_address(address: &str) -> Coordinates {
    Gazetteer::conakry().resolve_with(&mut rand::rng(), address)
}

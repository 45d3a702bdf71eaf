//! Address resolution and proximity ranking.
//!
//! [`gazetteer`] turns free-text addresses into approximate coordinates
//! without any network call; [`distance`] ranks located entities around an
//! origin by great-circle distance.

pub mod distance;
pub mod gazetteer;

pub use distance::{distance_km, nearest, Located, Ranked, EARTH_RADIUS_KM};
pub use gazetteer::{resolve_address, Gazetteer, GeoResolver, Locality, SERVICE_AREA};

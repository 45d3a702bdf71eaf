//! Turn-by-turn deep links for a business location.

use annuaire_core::GeoPoint;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NavigationLinks {
    pub google: String,
    pub waze: String,
    pub apple: String,
}

impl NavigationLinks {
    pub(crate) fn to(point: GeoPoint) -> Self {
        let ll = format!("{:.6},{:.6}", point.lat, point.lng);
        Self {
            google: format!("https://www.google.com/maps/dir/?api=1&destination={ll}"),
            waze: format!("https://waze.com/ul?ll={ll}&navigate=yes"),
            apple: format!("https://maps.apple.com/?daddr={ll}&dirflg=d"),
        }
    }
}

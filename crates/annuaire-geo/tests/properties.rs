use annuaire_core::GeoPoint;
use annuaire_geo::{distance_km, nearest, Gazetteer, GeoResolver, SERVICE_AREA};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn point() -> impl Strategy<Value = GeoPoint> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

fn conakry_point() -> impl Strategy<Value = GeoPoint> {
    (9.45f64..9.70, -13.75f64..-13.55).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

fn in_service_area(lat: f64, lng: f64) -> bool {
    let (min_lat, max_lat, min_lng, max_lng) = SERVICE_AREA;
    (min_lat..=max_lat).contains(&lat) && (min_lng..=max_lng).contains(&lng)
}

proptest! {
    #[test]
    fn distance_is_symmetric(p in point(), q in point()) {
        let forward = distance_km(p, q);
        let backward = distance_km(q, p);
        prop_assert!((forward - backward).abs() < 1e-9, "{forward} vs {backward}");
    }

    #[test]
    fn distance_to_self_is_zero(p in point()) {
        prop_assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_non_negative(p in point(), q in point()) {
        prop_assert!(distance_km(p, q) >= 0.0);
    }

    #[test]
    fn resolved_addresses_stay_in_service_area(address in ".{0,60}", seed in any::<u64>()) {
        let mut resolver = GeoResolver::with_rng(StdRng::seed_from_u64(seed));
        let coords = resolver.resolve(&address);
        prop_assert!(in_service_area(coords.lat, coords.lng), "{coords:?} for {address:?}");
    }

    #[test]
    fn known_locality_names_stay_in_service_area(index in 0usize..64, seed in any::<u64>()) {
        let gazetteer = Gazetteer::conakry();
        let localities = gazetteer.localities();
        let name = localities[index % localities.len()].name.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let coords = gazetteer.resolve_with(&mut rng, &name);
        prop_assert!(in_service_area(coords.lat, coords.lng));
    }

    #[test]
    fn nearest_respects_radius_and_order(
        origin in conakry_point(),
        points in prop::collection::vec(conakry_point(), 0..40),
        radius in 0.1f64..15.0,
    ) {
        let ranked = nearest(origin, &points, radius);
        for entry in &ranked {
            prop_assert!(distance_km(origin, *entry.item) <= radius);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
        let expected = points.iter().filter(|p| distance_km(origin, **p) <= radius).count();
        prop_assert_eq!(ranked.len(), expected);
    }
}

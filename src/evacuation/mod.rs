//! Static evacuation center list and nearest-center lookup.

mod centers;

pub use centers::EVACUATION_CENTERS;

use serde::Serialize;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvacuationCenter {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub capacity: &'static str,
    pub phone: &'static str,
    pub facilities: &'static [&'static str],
    pub city: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearbyCenter {
    #[serde(flatten)]
    pub center: EvacuationCenter,
    pub distance_km: f64,
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

pub fn nearest_from(centers: &[EvacuationCenter], lat: f64, lng: f64, limit: usize) -> Vec<NearbyCenter> {
    let mut nearby: Vec<NearbyCenter> = centers
        .iter()
        .map(|center| NearbyCenter {
            center: *center,
            distance_km: haversine_km(lat, lng, center.lat, center.lng),
        })
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);
    nearby
}

pub fn nearest(lat: f64, lng: f64, limit: usize) -> Vec<NearbyCenter> {
    nearest_from(&EVACUATION_CENTERS, lat, lng, limit)
}

pub fn in_city(city: &str) -> Vec<EvacuationCenter> {
    EVACUATION_CENTERS
        .iter()
        .filter(|center| center.city.eq_ignore_ascii_case(city.trim()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A center due north of (0, 0) at the given distance.
    fn center_at_km(id: &'static str, km: f64) -> EvacuationCenter {
        EvacuationCenter {
            id,
            name: id,
            address: "",
            lat: (km / EARTH_RADIUS_KM).to_degrees(),
            lng: 0.0,
            capacity: "",
            phone: "",
            facilities: &[],
            city: "Test",
        }
    }

    #[test]
    fn results_are_sorted_by_distance() {
        let centers = [
            center_at_km("a", 5.2),
            center_at_km("b", 1.1),
            center_at_km("c", 9.8),
        ];

        let result = nearest_from(&centers, 0.0, 0.0, 3);

        let ids: Vec<_> = result.iter().map(|n| n.center.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        for (got, want) in result.iter().zip([1.1, 5.2, 9.8]) {
            assert!((got.distance_km - want).abs() < 1e-6, "{} vs {}", got.distance_km, want);
        }
    }

    #[test]
    fn distances_are_non_decreasing_from_anywhere_in_metro_manila() {
        for (lat, lng) in [(14.5995, 120.9842), (14.4081, 121.0415), (14.7753, 121.0449)] {
            let result = nearest(lat, lng, EVACUATION_CENTERS.len());
            assert!(result.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        }
    }

    #[test]
    fn large_limit_returns_every_center() {
        assert_eq!(nearest(14.6, 121.0, 100).len(), 15);
        assert_eq!(nearest(14.6, 121.0, 15).len(), 15);
        assert!(nearest(14.6, 121.0, 0).is_empty());
    }

    #[test]
    fn distance_to_own_coordinate_is_zero() {
        for center in EVACUATION_CENTERS {
            let result = nearest(center.lat, center.lng, 1);
            assert_eq!(result[0].center.id, center.id);
            assert!(result[0].distance_km.abs() < 1e-9);
        }
    }

    #[test]
    fn known_distance_manila_to_quezon_city() {
        // Manila City Hall to Quezon Memorial Circle, roughly 10 km.
        let km = haversine_km(14.5896, 120.9812, 14.6515, 121.0493);
        assert!((km - 10.1).abs() < 1.0, "{km}");
    }

    #[test]
    fn city_filter_is_case_insensitive() {
        let qc = in_city("quezon city");
        assert_eq!(qc.len(), 2);
        assert!(in_city("Cebu").is_empty());
    }

    #[test]
    fn center_ids_are_unique() {
        let mut ids: Vec<_> = EVACUATION_CENTERS.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EVACUATION_CENTERS.len());
    }
}

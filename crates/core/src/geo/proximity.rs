//! Arrival detection by proximity to the home fix

use wayhome_domain::Coordinate;

use super::estimator::distance_km;

/// True when `point` lies within `radius_km` of the home fix.
///
/// An unset home never reports arrival.
#[must_use]
pub fn is_near_home(point: Coordinate, home: Option<Coordinate>, radius_km: f64) -> bool {
    home.is_some_and(|home| distance_km(point, home) < radius_km)
}

#[cfg(test)]
mod tests {
    use wayhome_domain::constants::ARRIVAL_RADIUS_KM;

    use super::*;

    const HOME: Coordinate = Coordinate::new(40.4168, -3.7038);

    #[test]
    fn point_at_home_is_near() {
        assert!(is_near_home(HOME, Some(HOME), ARRIVAL_RADIUS_KM));
    }

    #[test]
    fn point_500_meters_away_is_not_near() {
        // ~0.0045 degrees of latitude is ~500 m
        let point = Coordinate::new(HOME.latitude + 0.0045, HOME.longitude);
        assert!(!is_near_home(point, Some(HOME), ARRIVAL_RADIUS_KM));
    }

    #[test]
    fn point_50_meters_away_is_near() {
        let point = Coordinate::new(HOME.latitude + 0.00045, HOME.longitude);
        assert!(is_near_home(point, Some(HOME), ARRIVAL_RADIUS_KM));
    }

    #[test]
    fn unset_home_never_reports_arrival() {
        assert!(!is_near_home(HOME, None, ARRIVAL_RADIUS_KM));
    }
}

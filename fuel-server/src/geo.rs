//! Geodesic distance between coordinates.
//!
//! Forecourt filtering works on great-circle distance; at the radii the
//! API serves (a few tens of kilometres) the haversine formula on a
//! spherical Earth is more than accurate enough.

use serde::Serialize;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Construction through [`Coordinate::new`] guarantees both components
/// are finite and within range, so code receiving a `Coordinate` can
/// trust its validity.
///
/// # Examples
///
/// ```
/// use fuel_server::geo::Coordinate;
///
/// let westminster = Coordinate::new(51.50, -0.12).unwrap();
/// assert_eq!(westminster.latitude, 51.50);
///
/// // Out-of-range latitude is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating range and finiteness.
    ///
    /// Latitude must be within [-90, 90] and longitude within
    /// [-180, 180]; NaN and infinities are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Haversine great-circle distance between two coordinates, in kilometres.
///
/// Pure and total: any pair of valid coordinates produces a finite,
/// non-negative distance. No rounding is applied; callers round for
/// display.
pub fn distance_km(origin: Coordinate, target: Coordinate) -> f64 {
    let lat1 = origin.latitude.to_radians();
    let lat2 = target.latitude.to_radians();
    let d_lat = (target.latitude - origin.latitude).to_radians();
    let d_lon = (target.longitude - origin.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Half the Earth's circumference: no two points are further apart.
    const MAX_DISTANCE_KM: f64 = std::f64::consts::PI * 6371.0;

    fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(a in coordinate_strategy()) {
            prop_assert_eq!(distance_km(a, a), 0.0);
        }

        #[test]
        fn symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
            prop_assert_eq!(distance_km(a, b), distance_km(b, a));
        }

        #[test]
        fn non_negative_and_bounded(a in coordinate_strategy(), b in coordinate_strategy()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= MAX_DISTANCE_KM + 1.0);
        }

        #[test]
        fn valid_inputs_always_construct(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(Coordinate::new(lat, lon).is_ok());
        }
    }
}

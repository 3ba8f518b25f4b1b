//! Forecourt station records.

/// A fuel station as ingested from the upstream provider.
///
/// Coordinates are kept as raw degrees; records with non-finite
/// coordinates are dropped at ingestion, and the ranking engine
/// re-checks before a station can enter a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Stable station identifier, unique within the feed.
    pub id: String,

    /// Display name of the forecourt.
    pub name: String,

    /// Brand, where the feed provides one.
    pub brand: Option<String>,

    /// Postal code of the site.
    pub postcode: String,

    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Station {
    /// Whether both coordinates are finite real numbers.
    pub fn has_valid_location(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(lat: f64, lon: f64) -> Station {
        Station {
            id: "site-1".to_string(),
            name: "Test Forecourt".to_string(),
            brand: None,
            postcode: "SW1A 1AA".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn finite_location_is_valid() {
        assert!(station(51.5, -0.12).has_valid_location());
    }

    #[test]
    fn non_finite_location_is_invalid() {
        assert!(!station(f64::NAN, -0.12).has_valid_location());
        assert!(!station(51.5, f64::INFINITY).has_valid_location());
        assert!(!station(f64::NEG_INFINITY, f64::NAN).has_valid_location());
    }
}

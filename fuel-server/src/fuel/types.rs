//! Fuel-data API response DTOs.
//!
//! These types map directly to the provider's JSON feeds. They use
//! `Option` liberally because the feeds omit fields rather than sending
//! null in many cases; conversion into domain records decides what is
//! usable.

use serde::Deserialize;

use crate::domain::{FuelPrice, PriceRecord, Station};

/// One station record from the station-metadata feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    /// Stable site identifier.
    pub site_id: Option<String>,

    /// Display name of the forecourt.
    pub name: Option<String>,

    /// Brand (e.g. supermarket chain), if published.
    pub brand: Option<String>,

    /// Postal code of the site.
    pub postcode: Option<String>,

    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
}

impl StationDto {
    /// Convert into a domain record.
    ///
    /// Returns `None` for records without an identifier or with
    /// missing/non-finite coordinates; such records are dropped at
    /// ingestion and never cached.
    pub fn into_station(self) -> Option<Station> {
        let id = self.site_id.filter(|id| !id.is_empty())?;

        let latitude = self.latitude.filter(|v| v.is_finite())?;
        let longitude = self.longitude.filter(|v| v.is_finite())?;

        let name = self.name.unwrap_or_else(|| id.clone());

        Some(Station {
            id,
            name,
            brand: self.brand,
            postcode: self.postcode.unwrap_or_default(),
            latitude,
            longitude,
        })
    }
}

/// One station's entry in the price feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDto {
    /// Identifier of the station the prices belong to.
    pub site_id: Option<String>,

    /// Quotes for this station.
    #[serde(default)]
    pub prices: Vec<FuelPriceDto>,
}

/// A single quote within a price record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelPriceDto {
    /// Fuel-type label (e.g. "E10").
    pub fuel_type: Option<String>,

    /// Price per unit; absent when the pump is out of service.
    pub price: Option<f64>,
}

impl PriceDto {
    /// Convert into a domain record, dropping quotes without a label or
    /// price. Returns `None` for records without a station identifier.
    pub fn into_record(self) -> Option<PriceRecord> {
        let station_id = self.site_id.filter(|id| !id.is_empty())?;

        let fuels = self
            .prices
            .into_iter()
            .filter_map(|quote| {
                let fuel_type = quote.fuel_type.filter(|t| !t.is_empty())?;
                let price = quote.price?;
                Some(FuelPrice { fuel_type, price })
            })
            .collect();

        Some(PriceRecord { station_id, fuels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_decodes_from_feed_json() {
        let json = r#"{
            "siteId": "gfs-001",
            "name": "Westminster Services",
            "brand": "Acme Fuels",
            "postcode": "SW1A 1AA",
            "latitude": 51.50,
            "longitude": -0.12
        }"#;

        let dto: StationDto = serde_json::from_str(json).unwrap();
        let station = dto.into_station().unwrap();

        assert_eq!(station.id, "gfs-001");
        assert_eq!(station.name, "Westminster Services");
        assert_eq!(station.brand.as_deref(), Some("Acme Fuels"));
        assert_eq!(station.postcode, "SW1A 1AA");
        assert_eq!(station.latitude, 51.50);
    }

    #[test]
    fn station_without_id_is_dropped() {
        let dto: StationDto = serde_json::from_str(r#"{"latitude": 51.5, "longitude": 0.0}"#).unwrap();
        assert!(dto.into_station().is_none());
    }

    #[test]
    fn station_without_coordinates_is_dropped() {
        let dto: StationDto = serde_json::from_str(r#"{"siteId": "gfs-002"}"#).unwrap();
        assert!(dto.into_station().is_none());

        let dto: StationDto =
            serde_json::from_str(r#"{"siteId": "gfs-002", "latitude": 51.5}"#).unwrap();
        assert!(dto.into_station().is_none());
    }

    #[test]
    fn station_name_falls_back_to_id() {
        let json = r#"{"siteId": "gfs-003", "latitude": 51.5, "longitude": -0.1}"#;
        let dto: StationDto = serde_json::from_str(json).unwrap();
        let station = dto.into_station().unwrap();

        assert_eq!(station.name, "gfs-003");
        assert_eq!(station.postcode, "");
    }

    #[test]
    fn price_record_decodes_from_feed_json() {
        let json = r#"{
            "siteId": "gfs-001",
            "prices": [
                {"fuelType": "E10", "price": 140.9},
                {"fuelType": "B7", "price": 148.5}
            ]
        }"#;

        let dto: PriceDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record().unwrap();

        assert_eq!(record.station_id, "gfs-001");
        assert_eq!(record.fuels.len(), 2);
        assert_eq!(record.price_for("E10"), Some(140.9));
    }

    #[test]
    fn quotes_without_price_are_dropped() {
        let json = r#"{
            "siteId": "gfs-001",
            "prices": [
                {"fuelType": "E10"},
                {"price": 140.9},
                {"fuelType": "B7", "price": 148.5}
            ]
        }"#;

        let dto: PriceDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record().unwrap();

        assert_eq!(record.fuels.len(), 1);
        assert_eq!(record.fuels[0].fuel_type, "B7");
    }

    #[test]
    fn price_record_without_station_id_is_dropped() {
        let dto: PriceDto = serde_json::from_str(r#"{"prices": []}"#).unwrap();
        assert!(dto.into_record().is_none());
    }

    #[test]
    fn missing_prices_array_defaults_to_empty() {
        let dto: PriceDto = serde_json::from_str(r#"{"siteId": "gfs-001"}"#).unwrap();
        let record = dto.into_record().unwrap();
        assert!(record.fuels.is_empty());
    }
}

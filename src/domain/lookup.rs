// src/domain/lookup.rs
//! Contracts for the third-party geocoding and weather service.

use serde::Serialize;

use crate::domain::city::CityRecord;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("no match")]
    NoMatch,
    #[error("unexpected response: {0}")]
    BadResponse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLookup {
    pub lat: f64,
    pub lon: f64,
    /// Two-letter country as reported by the service.
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
    pub city_id: i64,
    pub city_name: String,
    /// Whole degrees Fahrenheit.
    pub temp_current: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub conditions: String,
}

pub trait Geocoder {
    /// First match for `city[,state],country`.
    fn locate(
        &self,
        city_name: &str,
        state_code: Option<&str>,
        country_code: &str,
    ) -> Result<GeoLookup, LookupError>;
}

pub trait WeatherSource {
    fn current(&self, city: &CityRecord) -> Result<CityWeather, LookupError>;
}

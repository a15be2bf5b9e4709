// src/import/validate.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::city::{normalize_state_code, title_case, NewCity};
use crate::import::row::ImportRow;

// One to three alphabetic words separated by single spaces.
static CITY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+){0,2}$").expect("city name pattern"));

// Signed decimal, no leading zeros except a bare "0".
static COORDINATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?$").expect("coordinate pattern"));

/// One failed field rule. The message is what lands in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("City name is not alphabetic or was not entered. Use one to three words of letters only.")]
    CityName,

    #[error("State code '{0}' is not numeric. Use digits only, or leave it empty.")]
    StateCode(String),

    #[error("Country code '{0}' is not numeric or was not entered. Use digits only.")]
    CountryCode(String),

    #[error("Lat '{0}' is not numeric or was not entered. Only digits, '-' and '.' are allowed.")]
    Lat(String),

    #[error("Lon '{0}' is not numeric or was not entered. Only digits, '-' and '.' are allowed.")]
    Lon(String),

    #[error("Country '{0}' is not alphabetic or was not entered. Use letters only.")]
    CountryNotAlphabetic(String),

    #[error("Country '{0}' is not 2 letters long. Use its 2 letter abbreviation.")]
    CountryLength(String),
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    if COORDINATE.is_match(raw) {
        raw.parse().ok()
    } else {
        None
    }
}

/// Check every field rule of one row.
///
/// On success returns the normalized insert payload: title-cased name,
/// upper-cased country, empty state code as `None`.
pub fn validate_row(row: &ImportRow) -> Result<NewCity, Vec<Violation>> {
    let mut violations = Vec::new();

    if !CITY_NAME.is_match(&row.city_name) {
        violations.push(Violation::CityName);
    }

    if !row.state_code.is_empty() && !is_digits(&row.state_code) {
        violations.push(Violation::StateCode(row.state_code.clone()));
    }

    if !is_digits(&row.country_code) {
        violations.push(Violation::CountryCode(row.country_code.clone()));
    }

    let lat = parse_coordinate(&row.lat);
    if lat.is_none() {
        violations.push(Violation::Lat(row.lat.clone()));
    }

    let lon = parse_coordinate(&row.lon);
    if lon.is_none() {
        violations.push(Violation::Lon(row.lon.clone()));
    }

    // Two independent rules: an empty country breaks both.
    if row.country.is_empty() || !row.country.chars().all(|c| c.is_ascii_alphabetic()) {
        violations.push(Violation::CountryNotAlphabetic(row.country.clone()));
    }
    if row.country.chars().count() != 2 {
        violations.push(Violation::CountryLength(row.country.clone()));
    }

    match (lat, lon) {
        (Some(lat), Some(lon)) if violations.is_empty() => Ok(NewCity {
            city_name: title_case(&row.city_name),
            state_code: normalize_state_code(&row.state_code),
            country_code: row.country_code.clone(),
            lat,
            lon,
            country: row.country.to_ascii_uppercase(),
        }),
        _ => Err(violations),
    }
}

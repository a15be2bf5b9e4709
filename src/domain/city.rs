// src/domain/city.rs

use serde::Serialize;

/// Two records of the same place closer than this (in decimal degrees, on
/// both axes) are the same city. 0.5° is roughly 30 miles.
pub const DUPLICATE_TOLERANCE_DEG: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRecord {
    pub city_id: i64,
    pub city_name: String,
    pub state_code: Option<String>,
    pub country_code: String,
    pub lat: f64,
    pub lon: f64,
    /// Two-letter country, upper-cased.
    pub country: String,
}

/// Insert payload for the cities table. Names are already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCity {
    pub city_name: String,
    pub state_code: Option<String>,
    pub country_code: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

impl NewCity {
    pub fn lat_bucket(&self) -> i64 {
        coordinate_bucket(self.lat)
    }

    pub fn lon_bucket(&self) -> i64 {
        coordinate_bucket(self.lon)
    }
}

/// Cell index used by the unique proximity index.
///
/// Two coordinates that round to the same cell differ by less than
/// `DUPLICATE_TOLERANCE_DEG`, so a cell collision is always also a range match.
pub fn coordinate_bucket(coord: f64) -> i64 {
    (coord / DUPLICATE_TOLERANCE_DEG).round() as i64
}

/// "new YORK" -> "New York". Every alphabetic run starts upper-case, the rest is lower.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// Empty form/CSV values mean "no state code".
pub fn normalize_state_code(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_mixed_input() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SALT LAKE city"), "Salt Lake City");
        assert_eq!(title_case("o'fallon"), "O'Fallon");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn buckets_only_collide_within_tolerance() {
        assert_eq!(coordinate_bucket(40.0), coordinate_bucket(40.2));
        assert_ne!(coordinate_bucket(40.0), coordinate_bucket(40.51));
        assert_eq!(coordinate_bucket(-74.006), coordinate_bucket(-73.9));
    }

    #[test]
    fn empty_state_code_is_absent() {
        assert_eq!(normalize_state_code(""), None);
        assert_eq!(normalize_state_code("36"), Some("36".to_string()));
    }
}

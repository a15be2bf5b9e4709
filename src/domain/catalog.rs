// src/domain/catalog.rs
use rusqlite::Connection;

use crate::db::cities::{find_by_name_and_code, get_city, insert_city, InsertOutcome};
use crate::db::dashboard::list_dashboard;
use crate::domain::city::{normalize_state_code, title_case, CityRecord, NewCity};
use crate::domain::lookup::{CityWeather, Geocoder, WeatherSource};
use crate::errors::ServerError;

/// The single-city form.
#[derive(Debug, Clone, Default)]
pub struct NewCityForm {
    pub city_name: String,
    pub state_code: String,
    pub country_code: String,
}

const LOOKUP_APOLOGY: &str = "api call failed, please try correcting city name and country code";
const ALREADY_EXISTS: &str = "city already exists in database";

/// Geocode and save one city.
///
/// Lookup failures come back as `ServerError::Lookup` for the user; they are
/// not part of any import audit log.
pub fn add_city(
    conn: &mut Connection,
    geocoder: &dyn Geocoder,
    form: &NewCityForm,
) -> Result<CityRecord, ServerError> {
    let city_name = title_case(form.city_name.trim());
    let country_code = form.country_code.trim();

    if city_name.is_empty() {
        return Err(ServerError::BadRequest("must provide a city name".into()));
    }
    if country_code.is_empty() {
        return Err(ServerError::BadRequest("must provide country code".into()));
    }
    let state_code = normalize_state_code(form.state_code.trim());

    let geo = geocoder
        .locate(&city_name, state_code.as_deref(), country_code)
        .map_err(|e| {
            tracing::warn!(city = %city_name, error = %e, "geocoding failed");
            ServerError::Lookup(LOOKUP_APOLOGY.into())
        })?;

    if find_by_name_and_code(conn, &city_name, country_code)?.is_some() {
        return Err(ServerError::Conflict(ALREADY_EXISTS.into()));
    }

    let new_city = NewCity {
        city_name,
        state_code,
        country_code: country_code.to_string(),
        lat: geo.lat,
        lon: geo.lon,
        country: geo.country.to_ascii_uppercase(),
    };

    match insert_city(conn, &new_city)? {
        InsertOutcome::Inserted(id) => get_city(conn, id)?.ok_or(ServerError::InternalError),
        InsertOutcome::Conflict => Err(ServerError::Conflict(ALREADY_EXISTS.into())),
    }
}

/// Current weather for every city on a user's dashboard, in dashboard order.
/// Cities whose lookup fails are left out.
pub fn dashboard_weather(
    conn: &Connection,
    user_id: i64,
    source: &dyn WeatherSource,
) -> Result<Vec<CityWeather>, ServerError> {
    let cities = list_dashboard(conn, user_id)?;

    let mut out = Vec::with_capacity(cities.len());
    for city in &cities {
        match source.current(city) {
            Ok(w) => out.push(w),
            Err(e) => {
                tracing::warn!(
                    city_id = city.city_id,
                    city = %city.city_name,
                    error = %e,
                    "weather lookup failed"
                )
            }
        }
    }
    Ok(out)
}

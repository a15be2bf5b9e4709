// src/import/duplicates.rs
use crate::db::cities::CityStore;
use crate::domain::city::{NewCity, DUPLICATE_TOLERANCE_DEG};
use crate::errors::ServerError;

/// True when the store already holds this place: same name, country code and
/// country, with lat and lon each within the tolerance (bounds inclusive).
pub fn is_near_duplicate<S>(store: &S, candidate: &NewCity) -> Result<bool, ServerError>
where
    S: CityStore + ?Sized,
{
    let tol = DUPLICATE_TOLERANCE_DEG;
    let hits = store.find(
        &candidate.city_name,
        &candidate.country_code,
        &candidate.country,
        (candidate.lat - tol)..=(candidate.lat + tol),
        (candidate.lon - tol)..=(candidate.lon + tol),
    )?;
    Ok(!hits.is_empty())
}

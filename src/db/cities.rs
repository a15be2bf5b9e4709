// src/db/cities.rs
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::ops::RangeInclusive;

use crate::domain::city::{CityRecord, NewCity, DUPLICATE_TOLERANCE_DEG};
use crate::errors::ServerError;

const CITY_COLUMNS: &str = "city_id, city_name, state_code, country_code, lat, lon, country";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    /// A record for the same place already exists.
    Conflict,
}

/// Persistence contract the import pipeline writes through.
pub trait CityStore {
    fn find(
        &self,
        city_name: &str,
        country_code: &str,
        country: &str,
        lat_range: RangeInclusive<f64>,
        lon_range: RangeInclusive<f64>,
    ) -> Result<Vec<CityRecord>, ServerError>;

    /// Insert unless a record for the same place exists; never errors on a duplicate.
    fn insert(&mut self, city: &NewCity) -> Result<InsertOutcome, ServerError>;
}

impl CityStore for Connection {
    fn find(
        &self,
        city_name: &str,
        country_code: &str,
        country: &str,
        lat_range: RangeInclusive<f64>,
        lon_range: RangeInclusive<f64>,
    ) -> Result<Vec<CityRecord>, ServerError> {
        find_in_range(self, city_name, country_code, country, lat_range, lon_range)
    }

    fn insert(&mut self, city: &NewCity) -> Result<InsertOutcome, ServerError> {
        insert_city(self, city)
    }
}

fn city_from_row(row: &Row<'_>) -> rusqlite::Result<CityRecord> {
    Ok(CityRecord {
        city_id: row.get(0)?,
        city_name: row.get(1)?,
        state_code: row.get(2)?,
        country_code: row.get(3)?,
        lat: row.get(4)?,
        lon: row.get(5)?,
        country: row.get(6)?,
    })
}

pub fn find_in_range(
    conn: &Connection,
    city_name: &str,
    country_code: &str,
    country: &str,
    lat_range: RangeInclusive<f64>,
    lon_range: RangeInclusive<f64>,
) -> Result<Vec<CityRecord>, ServerError> {
    let sql = format!(
        "select {CITY_COLUMNS} from cities
         where city_name = ? and country_code = ? and country = ?
           and lat between ? and ?
           and lon between ? and ?
         order by city_id"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare city range query failed: {e}")))?;

    let rows = stmt
        .query_map(
            params![
                city_name,
                country_code,
                country,
                lat_range.start(),
                lat_range.end(),
                lon_range.start(),
                lon_range.end()
            ],
            city_from_row,
        )
        .map_err(|e| ServerError::DbError(format!("city range query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Insert a city, detecting duplicates at insert time.
///
/// The proximity re-check and the insert share one IMMEDIATE transaction, so
/// two concurrent imports cannot both insert the same place. The unique
/// bucket index turns anything that slips through into `Conflict`.
pub fn insert_city(conn: &mut Connection, city: &NewCity) -> Result<InsertOutcome, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let existing = find_in_range(
        &tx,
        &city.city_name,
        &city.country_code,
        &city.country,
        (city.lat - DUPLICATE_TOLERANCE_DEG)..=(city.lat + DUPLICATE_TOLERANCE_DEG),
        (city.lon - DUPLICATE_TOLERANCE_DEG)..=(city.lon + DUPLICATE_TOLERANCE_DEG),
    )?;
    if !existing.is_empty() {
        tx.rollback().ok();
        return Ok(InsertOutcome::Conflict);
    }

    let inserted = tx
        .execute(
            "insert or ignore into cities
               (city_name, state_code, country_code, lat, lon, country, lat_bucket, lon_bucket)
             values (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                city.city_name,
                city.state_code,
                city.country_code,
                city.lat,
                city.lon,
                city.country,
                city.lat_bucket(),
                city.lon_bucket()
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert city failed: {e}")))?;

    if inserted != 1 {
        tx.rollback().ok();
        return Ok(InsertOutcome::Conflict);
    }

    let id = tx.last_insert_rowid();
    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(InsertOutcome::Inserted(id))
}

/// Exact name + country code match, used by the single-city form.
pub fn find_by_name_and_code(
    conn: &Connection,
    city_name: &str,
    country_code: &str,
) -> Result<Option<CityRecord>, ServerError> {
    let sql = format!(
        "select {CITY_COLUMNS} from cities where city_name = ? and country_code = ? limit 1"
    );
    conn.query_row(&sql, params![city_name, country_code], city_from_row)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select city by name failed: {e}")))
}

pub fn get_city(conn: &Connection, city_id: i64) -> Result<Option<CityRecord>, ServerError> {
    let sql = format!("select {CITY_COLUMNS} from cities where city_id = ?");
    conn.query_row(&sql, params![city_id], city_from_row)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select city failed: {e}")))
}

/// All cities, for the "add to dashboard" picker.
pub fn list_cities(conn: &Connection) -> Result<Vec<CityRecord>, ServerError> {
    let sql = format!("select {CITY_COLUMNS} from cities order by city_name, city_id");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], city_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn count_cities(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from cities", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count cities failed: {e}")))
}

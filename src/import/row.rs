// src/import/row.rs
use csv::StringRecord;
use std::io::Write;

use crate::db::cities::{CityStore, InsertOutcome};
use crate::import::audit::AuditLog;
use crate::import::duplicates::is_near_duplicate;
use crate::import::validate::validate_row;

/// One data line of an upload, fields still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// Line in the uploaded file; the header is line 1.
    pub line: usize,
    pub city_name: String,
    pub state_code: String,
    pub country_code: String,
    pub lat: String,
    pub lon: String,
    pub country: String,
}

impl ImportRow {
    /// Missing trailing fields read as empty strings.
    pub fn from_record(line: usize, record: &StringRecord) -> Self {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        Self {
            line,
            city_name: field(0),
            state_code: field(1),
            country_code: field(2),
            lat: field(3),
            lon: field(4),
            country: field(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Success { city_id: i64 },
    Warning,
    Failure { errors: usize },
}

/// Validate, duplicate-check and persist one row.
///
/// Writes at most one city; logs the row's own findings but not the
/// per-line marker/summary, which belong to the batch.
pub fn process_row<S, W>(store: &mut S, row: &ImportRow, log: &mut AuditLog<W>) -> RowOutcome
where
    S: CityStore + ?Sized,
    W: Write,
{
    let city = match validate_row(row) {
        Ok(city) => city,
        Err(violations) => {
            for v in &violations {
                log.error(v.to_string());
            }
            return RowOutcome::Failure {
                errors: violations.len(),
            };
        }
    };

    let label = format!("{}, {}", city.city_name, city.country);
    let already_exists = format!(
        "{label} already exists in the database! This line will not be submitted to the database."
    );

    match is_near_duplicate(&*store, &city) {
        Ok(true) => {
            log.warning(already_exists);
            return RowOutcome::Warning;
        }
        Ok(false) => {}
        Err(e) => {
            log.error(format!("Could not check {label} against the database: {e}"));
            return RowOutcome::Failure { errors: 1 };
        }
    }

    match store.insert(&city) {
        Ok(InsertOutcome::Inserted(city_id)) => {
            log.info(format!("{label} entered into DB successfully"));
            RowOutcome::Success { city_id }
        }
        // Another import inserted the same place after our check.
        Ok(InsertOutcome::Conflict) => {
            log.warning(already_exists);
            RowOutcome::Warning
        }
        Err(e) => {
            log.error(format!("Could not save {label}: {e}"));
            RowOutcome::Failure { errors: 1 }
        }
    }
}

//! Bulk CSV import of cities.
//!
//! `batch::run_import` drives the pipeline: template check, then per row
//! `validate` -> `duplicates` -> store insert, with every step written to an
//! `AuditLog` owned by the caller.

pub mod audit;
pub mod batch;
pub mod duplicates;
pub mod outcome;
pub mod row;
pub mod validate;

pub use audit::AuditLog;
pub use batch::{run_import, template_csv, Upload};
pub use outcome::ImportOutcome;

// src/import/batch.rs
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use std::io::Write;

use crate::db::cities::CityStore;
use crate::import::audit::AuditLog;
use crate::import::outcome::ImportOutcome;
use crate::import::row::{process_row, ImportRow, RowOutcome};

/// Column titles of the upload template, in order.
pub const TEMPLATE_COLUMNS: [&str; 6] = [
    "city_name",
    "state_code",
    "country_code",
    "lat",
    "lon",
    "country (2 letter)",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An uploaded file, handed over whole.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub content: &'a [u8],
}

/// The downloadable template: just the header line.
pub fn template_csv() -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TEMPLATE_COLUMNS)?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn parse_csv(content: &[u8]) -> Result<(StringRecord, Vec<StringRecord>), csv::Error> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let header = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok((header, rows))
}

fn matches_template(header: &StringRecord) -> bool {
    header.iter().eq(TEMPLATE_COLUMNS.iter().copied())
}

/// Run one bulk import.
///
/// Nothing is written (neither cities nor log lines) unless the header matches
/// the template exactly. Rows are processed in file order; cities saved by
/// earlier rows stay saved whatever later rows do.
pub fn run_import<S, W>(store: &mut S, upload: Upload<'_>, log: &mut AuditLog<W>) -> ImportOutcome
where
    S: CityStore + ?Sized,
    W: Write,
{
    let (header, records) = match parse_csv(upload.content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::info!(file = %upload.file_name, error = %e, "upload is not readable CSV");
            return ImportOutcome::WrongTemplate;
        }
    };

    if !matches_template(&header) {
        tracing::info!(
            file = %upload.file_name,
            header = ?header,
            "upload does not match template"
        );
        return ImportOutcome::WrongTemplate;
    }

    let digest = Sha256::digest(upload.content);
    log.debug(format!(
        "Attempting DB upload for {} ({} bytes, sha256 {:x})",
        upload.file_name,
        upload.content.len(),
        digest
    ));

    if records.is_empty() {
        log.error("No data in upload file");
        return ImportOutcome::Empty;
    }

    let (mut success, mut warning, mut failure) = (0usize, 0usize, 0usize);

    for (i, record) in records.iter().enumerate() {
        let row = ImportRow::from_record(i + 2, record);
        log.info(format!("Processing line {} of upload file", row.line));

        match process_row(store, &row, log) {
            RowOutcome::Success { .. } => {
                success += 1;
                log.info(format!("No errors or warnings found in line {}", row.line));
            }
            RowOutcome::Warning => {
                warning += 1;
                log.info(format!("1 warning found in line {}", row.line));
            }
            RowOutcome::Failure { errors } => {
                failure += 1;
                log.warning(format!("{errors} error(s) found in line {}", row.line));
            }
        }
    }

    tracing::info!(
        file = %upload.file_name,
        success,
        warning,
        failure,
        "import finished"
    );

    ImportOutcome::Processed {
        success,
        warning,
        failure,
    }
}

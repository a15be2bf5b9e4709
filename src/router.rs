use crate::errors::{ResultResp, ServerError};
use crate::import::{run_import, template_csv, AuditLog, ImportOutcome, Upload};
use crate::responses::{attachment_response, error_response, json_response, text_response};
use crate::state::AppState;
use astra::{Request, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

const LOG_DOWNLOAD_NAME: &str = "log.txt";
const TEMPLATE_DOWNLOAD_NAME: &str = "uploadtemplate.csv";
const ALLOWED_EXTENSION: &str = "csv";

/// Entry point used by the server: never fails, errors become responses.
pub fn respond(req: Request, state: &AppState) -> Response {
    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            error_response(err)
        }
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => text_response(200, "ok"),
        ("POST", "/fileupload") => upload(req, state),
        ("GET", "/downloadlogs") => download_log(state),
        ("GET", "/downloadtemplate") => download_template(),
        _ => Err(ServerError::NotFound),
    }
}

#[derive(Debug, Serialize)]
struct UploadSummary {
    status: &'static str,
    success: i64,
    warning: i64,
    failure: i64,
    message: String,
    /// False when the rows were processed but the audit log could not be written.
    log_saved: bool,
}

impl From<ImportOutcome> for UploadSummary {
    fn from(outcome: ImportOutcome) -> Self {
        let (success, warning, failure) = outcome.as_triple();
        Self {
            status: outcome.status(),
            success,
            warning,
            failure,
            message: outcome.summary(),
            log_saved: true,
        }
    }
}

fn no_file_selected() -> ServerError {
    ServerError::BadRequest("No file selected! Please select a .csv file for upload.".into())
}

fn upload(req: Request, state: &AppState) -> ResultResp {
    let params = parse_query(&req);

    // Keep only the final path component of whatever the client sent.
    let file_name = params
        .get("filename")
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(no_file_selected)?;

    let extension = Path::new(&file_name).extension().and_then(|e| e.to_str());
    if extension != Some(ALLOWED_EXTENSION) {
        return Err(ServerError::BadRequest(
            "File extension not allowed! Please upload .csv files only!".into(),
        ));
    }

    let content = read_body(req, state.config.max_upload_bytes)?;
    if content.is_empty() {
        return Err(no_file_selected());
    }

    let mut log = AuditLog::in_memory();
    let outcome = state.db.with_conn(|conn| {
        Ok(run_import(
            conn,
            Upload {
                file_name: &file_name,
                content: &content,
            },
            &mut log,
        ))
    })?;

    let mut summary = UploadSummary::from(outcome);

    // A rejected template leaves the previous run's log in place.
    if outcome != ImportOutcome::WrongTemplate {
        let path = &state.config.audit_log_path;
        if let Err(e) = save_audit_log(path, log) {
            tracing::error!(path = %path.display(), error = %e, "writing audit log failed");
            summary.log_saved = false;
        }
    }

    json_response(200, &summary)
}

fn read_body(req: Request, limit: u64) -> Result<Vec<u8>, ServerError> {
    let declared = req
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(ServerError::PayloadTooLarge { limit });
    }

    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read upload: {e}")))?;

    if buf.len() as u64 > limit {
        return Err(ServerError::PayloadTooLarge { limit });
    }
    Ok(buf)
}

fn save_audit_log(path: &Path, log: AuditLog<Vec<u8>>) -> io::Result<()> {
    let bytes = log.finish()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)
}

fn download_log(state: &AppState) -> ResultResp {
    let bytes = match fs::read(&state.config.audit_log_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(ServerError::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "reading audit log failed");
            return Err(ServerError::InternalError);
        }
    };
    attachment_response(bytes, LOG_DOWNLOAD_NAME, &mime::TEXT_PLAIN_UTF_8)
}

fn download_template() -> ResultResp {
    let bytes = template_csv().map_err(|e| {
        tracing::error!(error = %e, "building template failed");
        ServerError::InternalError
    })?;
    attachment_response(bytes, TEMPLATE_DOWNLOAD_NAME, &mime::TEXT_CSV_UTF_8)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

// responses/files.rs
use crate::errors::{ResultResp, ServerError};
use astra::Body;
use mime::Mime;

use super::builder;

/// Return a file as a download.
pub fn attachment_response(buffer: Vec<u8>, filename: &str, content_type: &Mime) -> ResultResp {
    builder(200)
        .header("Content-Type", content_type.as_ref())
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}

pub fn text_response(status: u16, text: &str) -> ResultResp {
    builder(status)
        .header("Content-Type", mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(Body::from(text.to_string()))
        .map_err(|_| ServerError::InternalError)
}

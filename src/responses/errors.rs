use crate::errors::ServerError;
use astra::{Body, Response};

use super::builder;

const MIB: u64 = 1024 * 1024;

/// Whole megabytes when the limit is at least 1 MiB, bytes otherwise.
fn size_label(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Convert a ServerError into a plain-text response with the matching status.
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::BadRequest(msg) | ServerError::Conflict(msg) | ServerError::Lookup(msg) => {
            msg.clone()
        }
        ServerError::PayloadTooLarge { limit } => {
            format!("File size is larger than the max {}!", size_label(*limit))
        }
        // Don't leak SQL details to the client.
        ServerError::DbError(msg) => {
            tracing::error!(error = %msg, "database error");
            "Internal Server Error".to_string()
        }
        other => other.to_string(),
    };

    builder(status)
        .header("Content-Type", mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(Body::from(message))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn body(err: ServerError) -> (u16, String) {
        let mut resp = error_response(err);
        let mut text = String::new();
        resp.body_mut().reader().read_to_string(&mut text).unwrap();
        (resp.status().as_u16(), text)
    }

    #[test]
    fn upload_limit_message_keeps_its_unit() {
        assert_eq!(
            body(ServerError::PayloadTooLarge { limit: 16 * MIB }),
            (413, "File size is larger than the max 16MB!".to_string())
        );
        assert_eq!(
            body(ServerError::PayloadTooLarge { limit: 64 }).1,
            "File size is larger than the max 64 bytes!"
        );
    }

    #[test]
    fn database_details_stay_hidden() {
        let (status, text) = body(ServerError::DbError("no such table: cities".into()));
        assert_eq!(status, 500);
        assert_eq!(text, "Internal Server Error");
    }
}

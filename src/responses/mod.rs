pub mod errors;
pub mod files;
pub mod json;

pub use errors::error_response;
pub use files::{attachment_response, text_response};
pub use json::json_response;

use astra::ResponseBuilder;

/// Every response goes out uncacheable.
pub(crate) fn builder(status: u16) -> ResponseBuilder {
    ResponseBuilder::new()
        .status(status)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Expires", "0")
        .header("Pragma", "no-cache")
}

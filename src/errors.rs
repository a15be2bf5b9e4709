// errors.rs
use astra::Response;

/// Errors originating from either the server logic
/// (routing, uploads, lookups) or downstream layers (DB).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload Too Large: limit is {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    /// The geocoding / weather collaborator could not answer.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Conflict(_) => 409,
            ServerError::PayloadTooLarge { .. } => 413,
            ServerError::Lookup(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}

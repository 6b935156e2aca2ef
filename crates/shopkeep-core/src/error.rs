// ── Core error types ──
//
// User-facing errors from shopkeep-core. Stores record the `Display`
// form of these as `last_error`, so every variant must read as a single
// sentence a dashboard can show verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The backend rejected the request. `message` is the server's own
    /// message when the error body was structured.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// The request never produced a response (connection refused, DNS,
    /// timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The response arrived but could not be understood.
    #[error("Unexpected response: {0}")]
    BadResponse(String),

    /// Client-side validation failure. Never reaches the transport and
    /// never mutates store error state.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<shopkeep_api::Error> for CoreError {
    fn from(err: shopkeep_api::Error) -> Self {
        match err {
            shopkeep_api::Error::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            shopkeep_api::Error::Transport(e) => Self::Network(e.to_string()),
            shopkeep_api::Error::InvalidUrl(e) => Self::Network(e.to_string()),
            shopkeep_api::Error::Deserialization { message, .. } => Self::BadResponse(message),
            shopkeep_api::Error::Serialization(e) => Self::BadResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_display_as_the_server_message() {
        let err = CoreError::Api {
            message: "Category not found".into(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "Category not found");
    }
}

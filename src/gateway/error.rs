//! Gateway error taxonomy and its mapping onto store-level errors.

use thiserror::Error;

use crate::store::FetchError;

/// Errors returned by a `Gateway`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Backend answered 404 for this path
    #[error("Resource '{path}' not found")]
    NotFound { path: String },

    /// Backend answered 401: no session or the token expired
    #[error("Not authorized for '{path}'")]
    Unauthorized { path: String },

    /// Any other non-2xx answer
    #[error("Unexpected status {status} from '{path}'")]
    Status { status: u16, path: String },

    /// Connection or transport failure
    #[error("Request to '{path}' failed: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not the expected JSON shape
    #[error("Failed to decode response from '{path}': {message}")]
    Decode { path: String, message: String },

    /// The call did not settle in time
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Client could not be built or the request was malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Short machine-readable kind, used in log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "not_found",
            GatewayError::Unauthorized { .. } => "unauthorized",
            GatewayError::Status { .. } => "status",
            GatewayError::Network { .. } => "network",
            GatewayError::Decode { .. } => "decode",
            GatewayError::Timeout { .. } => "timeout",
            GatewayError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl From<&GatewayError> for FetchError {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::NotFound { .. } => FetchError::NotFound,
            GatewayError::Unauthorized { .. } => FetchError::Unauthorized,
            other => FetchError::transient(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found() {
        let err = GatewayError::NotFound {
            path: "/offers/99".to_string(),
        };
        assert_eq!(FetchError::from(&err), FetchError::NotFound);
        assert_eq!(err.error_type(), "not_found");
    }

    #[test]
    fn other_failures_are_transient() {
        let err = GatewayError::Status {
            status: 503,
            path: "/offers".to_string(),
        };
        assert_eq!(
            FetchError::from(&err),
            FetchError::transient("Unexpected status 503 from '/offers'")
        );

        let err = GatewayError::Decode {
            path: "/comments/1".to_string(),
            message: "missing field `date`".to_string(),
        };
        assert!(matches!(FetchError::from(&err), FetchError::Transient { .. }));

        let err = GatewayError::Timeout { seconds: 5 };
        assert!(matches!(FetchError::from(&err), FetchError::Transient { .. }));
    }

    #[test]
    fn unauthorized_is_kept_distinct() {
        let err = GatewayError::Unauthorized {
            path: "/login".to_string(),
        };
        assert_eq!(FetchError::from(&err), FetchError::Unauthorized);
    }
}

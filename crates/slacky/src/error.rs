//! Client error types.

use std::time::Duration;

use thiserror::Error;

/// Slack error codes that mean the referenced object does not exist.
const NOT_FOUND_ERRORS: &[&str] = &[
    "channel_not_found",
    "user_not_found",
    "message_not_found",
    "thread_not_found",
];

/// Slack error codes that mean the token was rejected.
const AUTH_ERRORS: &[&str] = &[
    "not_authed",
    "invalid_auth",
    "token_revoked",
    "token_expired",
    "account_inactive",
];

/// Client error type.
///
/// Every failed call surfaces as one of these variants. Slack's own error
/// string is carried verbatim by [`Error::Api`].
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Slack answered with `"ok": false`.
    #[error("{method} failed: {error}")]
    Api {
        /// Slack method that was called.
        method: String,
        /// Error string from Slack (e.g. `channel_not_found`).
        error: String,
    },

    /// Slack answered with a non-success HTTP status.
    #[error("{method} returned HTTP {status}")]
    Status {
        /// Slack method that was called.
        method: String,
        /// HTTP status code.
        status: u16,
    },

    /// Slack throttled the request.
    #[error("{method} was rate limited")]
    RateLimited {
        /// Slack method that was called.
        method: String,
        /// Delay requested through the `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// A required parameter was not set on an endpoint.
    #[error("{method} requires parameter '{param}'")]
    MissingParameter {
        /// Slack method being prepared.
        method: &'static str,
        /// Name of the missing parameter.
        param: &'static str,
    },

    /// No endpoint is registered under this method name.
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// A model was read before being loaded and has no client to load with.
    #[error("{object} '{id}' is not loaded and has no client attached")]
    Detached {
        /// Object kind (`user`, `channel`, ...).
        object: &'static str,
        /// Object id.
        id: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The Slack error string, if Slack rejected the call.
    pub fn slack_error(&self) -> Option<&str> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.slack_error()
            .is_some_and(|e| NOT_FOUND_ERRORS.contains(&e))
            || matches!(self, Error::Status { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.slack_error().is_some_and(|e| AUTH_ERRORS.contains(&e))
            || matches!(self, Error::Status { status: 401, .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. }) || self.slack_error() == Some("ratelimited")
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Status { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(error: &str) -> Error {
        Error::Api {
            method: "conversations.kick".to_string(),
            error: error.to_string(),
        }
    }

    #[test]
    fn test_api_error_message_carries_slack_error() {
        let err = api("cant_kick_self");
        assert_eq!(err.to_string(), "conversations.kick failed: cant_kick_self");
        assert_eq!(err.slack_error(), Some("cant_kick_self"));
    }

    #[test]
    fn test_classification() {
        assert!(api("channel_not_found").is_not_found());
        assert!(api("invalid_auth").is_auth_error());
        assert!(!api("not_archived").is_not_found());
        assert!(api("ratelimited").is_rate_limited());

        let limited = Error::RateLimited {
            method: "users.list".to_string(),
            retry_after: Some(Duration::from_secs(3)),
        };
        assert!(limited.is_rate_limited());
        assert_eq!(limited.slack_error(), None);

        let status = Error::Status {
            method: "users.list".to_string(),
            status: 503,
        };
        assert!(status.is_server_error());
    }
}

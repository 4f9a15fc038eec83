//! Error types for ExampleCloud API operations.
//!
//! Failures fall into four groups: transport failures (the network call
//! itself failed), provider errors (the API answered with status >= 400),
//! decode failures (a 2xx body did not match the expected shape), and
//! validation failures (bad arguments caught before any request is made).
//! Nothing is retried or recovered; every failure propagates to the caller.

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Specialized result type for ExampleCloud operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ExampleCloud operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP call itself failed (DNS, connect, TLS, timeout,
    /// cancellation). No response was received to classify.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with status >= 400.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response body failed to parse as the expected type. This is a
    /// client/provider contract mismatch, not a provider-reported failure.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body failed to serialize.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A 2xx response arrived with an empty body where the endpoint
    /// contract guarantees one.
    #[error("unexpected empty response body")]
    EmptyResponse,

    /// A URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required call parameter was missing or empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A caller-supplied string could not be encoded as an HTTP header
    /// value.
    #[error("invalid header value for {0}")]
    InvalidHeaderValue(&'static str),

    /// A string did not name one of the eight service families.
    #[error("unknown service family: {0}")]
    UnknownService(String),

    /// Temp URL generation was called with an empty HTTP method.
    #[error("temp URL method is required")]
    TempUrlMissingMethod,

    /// Temp URL generation was called with an empty container name.
    #[error("temp URL container is required")]
    TempUrlMissingContainer,

    /// Temp URL generation was called with an empty object name.
    #[error("temp URL object name is required")]
    TempUrlMissingObject,

    /// Temp URL generation was called with an empty signing key.
    #[error("temp URL signing key is required")]
    TempUrlMissingKey,

    /// Temp URL generation was called with a non-positive expiry.
    #[error("temp URL expiry must be a positive Unix timestamp")]
    TempUrlInvalidExpiry,
}

impl Error {
    /// HTTP status code of the provider error, when this is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// True when the provider answered 404. The documented pattern for
    /// delete-and-poll loops branches on this.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// True when the provider answered 409 (conflict / locked resource).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

/// Error response from the ExampleCloud API.
///
/// `body` always holds the raw response body. When the body is a standard
/// OpenStack-style JSON error (`{"badRequest": {"message": "...", "code": 400}}`),
/// `message` and `code` carry the parsed values; otherwise they stay empty.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: StatusCode,
    /// Status line text, e.g. `404 Not Found`.
    pub status_text: String,
    /// Raw response body, preserved verbatim.
    pub body: String,
    /// Parsed error message from the JSON body, if available.
    pub message: String,
    /// Parsed error code from the JSON body, if available.
    pub code: i64,
}

impl ApiError {
    /// Build an `ApiError` from a response, attempting to parse the body as
    /// a single-key OpenStack error envelope.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let status_text = match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        let mut err = Self {
            status,
            status_text,
            body: String::from_utf8_lossy(body).into_owned(),
            message: String::new(),
            code: 0,
        };

        #[derive(Deserialize)]
        struct Inner {
            #[serde(default)]
            message: String,
            #[serde(default)]
            code: i64,
        }

        // {"errorType": {"message": "...", "code": N}} - the first key whose
        // inner object carries a non-empty message wins.
        if let Ok(parsed) = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(body) {
            for (_, raw) in parsed {
                let Ok(inner) = serde_json::from_value::<Inner>(raw) else {
                    continue;
                };
                if !inner.message.is_empty() {
                    err.message = inner.message;
                    err.code = inner.code;
                    break;
                }
            }
        }
        err
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "api error: {} (body: {})", self.status_text, self.body)
        } else {
            write!(f, "api error: {}: {}", self.status_text, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_parses_openstack_envelope() {
        let body = br#"{"badRequest":{"message":"Invalid input","code":400}}"#;
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.status_text, "400 Bad Request");
        assert_eq!(err.message, "Invalid input");
        assert_eq!(err.code, 400);
        assert_eq!(err.body, String::from_utf8_lossy(body));
    }

    #[test]
    fn from_response_item_not_found() {
        let body = br#"{"itemNotFound":{"message":"Server not found","code":404}}"#;
        let err = ApiError::from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(err.message, "Server not found");
        assert_eq!(err.code, 404);
    }

    #[test]
    fn from_response_plain_text_body() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"Internal Server Error");

        assert_eq!(err.message, "");
        assert_eq!(err.code, 0);
        assert_eq!(err.body, "Internal Server Error");
    }

    #[test]
    fn from_response_empty_body() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, b"");

        assert_eq!(err.status_text, "401 Unauthorized");
        assert_eq!(err.message, "");
        assert_eq!(err.body, "");
    }

    #[test]
    fn from_response_skips_inner_without_message() {
        let body = br#"{"meta":{"code":1},"conflict":{"message":"Busy","code":409}}"#;
        let err = ApiError::from_response(StatusCode::CONFLICT, body);

        assert_eq!(err.message, "Busy");
        assert_eq!(err.code, 409);
    }

    #[test]
    fn display_with_and_without_message() {
        let with = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"badRequest":{"message":"Invalid input","code":400}}"#,
        );
        assert!(with.to_string().contains("Invalid input"));

        let without = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"raw body");
        assert!(without.to_string().contains("raw body"));
    }

    #[test]
    fn error_status_helpers() {
        let not_found: Error = ApiError::from_response(StatusCode::NOT_FOUND, b"").into();
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());
        assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));

        let conflict: Error = ApiError::from_response(StatusCode::CONFLICT, b"").into();
        assert!(conflict.is_conflict());

        assert_eq!(Error::EmptyResponse.status(), None);
    }

    #[test]
    fn from_url_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}

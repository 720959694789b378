//! Error types reported by the OAuth2 client collaborator
//!
//! `TransportError` is what a client reports when the provider call does not yield a
//! usable body. `InternalOAuthError` is what the strategy turns it into before handing
//! it to the host.

use thiserror::Error;

/// Failure reported by an [`OAuth2Client`](super::OAuth2Client) for a protected resource request
#[derive(Debug, Error)]
pub enum TransportError {
    /// The provider answered with a non-success status; `data` is the response body
    #[error("provider responded with status {status_code}")]
    Status { status_code: u16, data: String },

    /// The request never produced a response (connect failure, TLS, timeout, ...)
    #[error("request to provider failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other client-side failure, mainly used by non-reqwest clients and stubs
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// HTTP status returned by the provider, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Other(_) => None,
        }
    }

    /// Response body carried by the error, if any
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        match self {
            Self::Status { data, .. } => Some(data.as_str()),
            Self::Request(_) | Self::Other(_) => None,
        }
    }
}

/// Hard failure talking to the identity provider.
///
/// `message` is Yahoo's own `error.description` when the error payload could be read,
/// otherwise `"Failed to fetch user profile"` with the transport error kept as `source`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InternalOAuthError {
    pub message: String,
    pub status_code: Option<u16>,
    #[source]
    pub source: Option<TransportError>,
}

impl InternalOAuthError {
    pub const FETCH_PROFILE_FAILED: &'static str = "Failed to fetch user profile";

    /// Build from a transport error, preferring the description embedded in Yahoo's error body
    #[must_use]
    pub fn from_transport(error: TransportError) -> Self {
        if let Some(description) = error.data().and_then(provider_error_description) {
            return Self {
                message: description,
                status_code: error.status_code(),
                source: None,
            };
        }

        Self {
            message: Self::FETCH_PROFILE_FAILED.to_string(),
            status_code: error.status_code(),
            source: Some(error),
        }
    }
}

/// Read `error.description` out of a Yahoo error payload
fn provider_error_description(data: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(data).ok()?;
    json.get("error")?
        .get("description")?
        .as_str()
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_description_extracted_from_error_payload() {
        let error = InternalOAuthError::from_transport(TransportError::Status {
            status_code: 401,
            data: r#"{"error":{"description":"Please provide valid credentials"}}"#.to_string(),
        });

        assert_eq!(error.to_string(), "Please provide valid credentials");
        assert_eq!(error.status_code, Some(401));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_unstructured_payload_falls_back_to_generic_message() {
        let error = InternalOAuthError::from_transport(TransportError::Status {
            status_code: 503,
            data: "<html>Service Unavailable</html>".to_string(),
        });

        assert_eq!(error.to_string(), InternalOAuthError::FETCH_PROFILE_FAILED);
        assert_eq!(error.status_code, Some(503));
        assert!(matches!(
            error.source,
            Some(TransportError::Status {
                status_code: 503,
                ..
            })
        ));
    }

    #[test]
    fn test_payload_without_description_falls_back() {
        let error = InternalOAuthError::from_transport(TransportError::Status {
            status_code: 400,
            data: r#"{"error":{"lang":"en-US"}}"#.to_string(),
        });

        assert_eq!(error.message, InternalOAuthError::FETCH_PROFILE_FAILED);
    }

    #[test]
    fn test_bodyless_error_keeps_source() {
        let error = InternalOAuthError::from_transport(TransportError::Other(
            "connection reset".to_string(),
        ));

        assert_eq!(error.status_code, None);
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("connection reset")
        );
    }
}

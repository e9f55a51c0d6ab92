//! Error types for the Candlepin binding.
//!
//! # Design
//! Any status outside {200, 204} becomes `Http`, which keeps the whole
//! response so callers can read the machine-readable body Candlepin sends
//! with rule failures (e.g. `rulefailed.virt.ents.only.for.physical.systems`).
//! Network failures are not reinterpreted; they surface as `Transport`.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by `Rest` and `CandlepinApi`.
#[derive(Debug, Error)]
pub enum CandlepinError {
    /// The server answered with a status other than 200 or 204.
    #[error("{status} - {reason}")]
    Http {
        status: u16,
        reason: String,
        response: Box<HttpResponse>,
    },

    /// Connection, TLS or protocol failure below HTTP.
    #[error("transport failure: {0}")]
    Transport(#[from] ureq::Error),

    /// A JSON body could not be encoded or decoded.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A list element did not carry the expected `{"<key>": {...}}` wrapper.
    #[error("response element is missing the '{key}' envelope")]
    MissingEnvelope { key: &'static str },

    /// The response decoded fine but had the wrong shape for the operation.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),

    /// A client certificate or key file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Certificate {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CandlepinError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CandlepinError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The complete response behind an `Http` error.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            CandlepinError::Http { response, .. } => Some(response),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CandlepinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_status_and_reason() {
        let response = HttpResponse::new(403, "rulefailed.virt.ents.only.for.physical.systems");
        let err = CandlepinError::Http {
            status: 403,
            reason: response.reason.clone(),
            response: Box::new(response),
        };
        assert_eq!(err.to_string(), "403 - Forbidden");
        assert_eq!(err.status(), Some(403));
        assert_eq!(
            err.response().map(|r| r.body.as_str()),
            Some("rulefailed.virt.ents.only.for.physical.systems")
        );
    }

    #[test]
    fn non_http_errors_have_no_response() {
        let err = CandlepinError::MissingEnvelope { key: "pool" };
        assert!(err.status().is_none());
        assert!(err.response().is_none());
        assert_eq!(err.to_string(), "response element is missing the 'pool' envelope");
    }
}

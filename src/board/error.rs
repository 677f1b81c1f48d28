//! Errors returned by [`BoardClient`](super::BoardClient).

use std::fmt;

use reqwest::StatusCode;

/// Remote service a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Board read/write service.
    Board,
    /// Compose (templating) service.
    Compose,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => write!(f, "vestaboard"),
            Self::Compose => write!(f, "vbml"),
        }
    }
}

/// Transport failures, split so callers can tell "could not reach the
/// service" from "service rejected us" from "service gave us nothing".
#[derive(Debug)]
pub enum BoardError {
    /// No access token was configured.
    MissingToken,
    /// The request could not be built or serialized.
    Request(String),
    /// Connect, DNS, timeout or I/O failure talking to the service.
    Network {
        /// Service that could not be reached.
        service: Service,
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    Status {
        /// Service that rejected the request.
        service: Service,
        /// HTTP status.
        status: StatusCode,
        /// Trimmed response body.
        body: String,
    },
    /// A success response did not contain a usable payload.
    Decode(String),
    /// The request was aborted before the service answered.
    Cancelled,
}

impl BoardError {
    /// HTTP status for [`BoardError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "{} is not set", crate::constants::ENV_TOKEN),
            Self::Request(msg) => write!(f, "build request: {msg}"),
            Self::Network { service, source } => {
                write!(f, "could not reach {service} API: {source}")
            }
            Self::Status {
                service,
                status,
                body,
            } => write!(f, "{service} API returned {status}: {body}"),
            Self::Decode(msg) => write!(f, "malformed response: {msg}"),
            Self::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = BoardError::Status {
            service: Service::Board,
            status: StatusCode::BAD_REQUEST,
            body: "{\"message\":\"bad\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "vestaboard API returned 400 Bad Request: {\"message\":\"bad\"}"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_missing_token_display() {
        assert_eq!(BoardError::MissingToken.to_string(), "VESTABOARD_TOKEN is not set");
        assert_eq!(BoardError::MissingToken.status(), None);
    }

    #[test]
    fn test_decode_display() {
        let err = BoardError::Decode("vbml API returned no characters".to_string());
        assert_eq!(err.to_string(), "malformed response: vbml API returned no characters");
    }
}

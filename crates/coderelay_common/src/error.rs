use serde_json::Value;
use thiserror::Error;

/// Field-level validation failures for an inbound verification request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The phone number does not match `^\+?[1-9]\d{7,14}$`.
    #[error("phone number is not a valid international number")]
    PhoneInvalid,

    /// The authorization code is outside the accepted 4..=16 characters.
    #[error("authCode must be between 4 and 16 characters, got {len}")]
    AuthCodeLength { len: usize },

    /// The body could not be parsed into a verification request.
    #[error("request body rejected: {0}")]
    Body(String),
}

/// Every failure the relay can report to a caller.
///
/// Each variant carries a stable machine-readable code (see [`RelayError::code`])
/// which is what callers match on; the `Display` text is for logs.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or mismatched bearer credential
    #[error("missing or invalid bearer credential")]
    Unauthorized,

    /// Malformed body or a field failing validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The destination answered with a non-success status
    #[error("destination {dest} responded with status {status}")]
    Downstream { dest: String, status: u16, detail: Value },

    /// The destination could not be reached (connect error, timeout, ...)
    #[error("forwarding failed: {0}")]
    Transport(String),
}

impl RelayError {
    /// The `error` field of the JSON body returned to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Unauthorized => "UNAUTHORIZED",
            RelayError::Validation(ValidationError::PhoneInvalid) => "PHONE_INVALID",
            RelayError::Validation(_) => "BODY_INVALID",
            RelayError::Downstream { .. } => "WATI_ERROR",
            RelayError::Transport(_) => "FETCH_FAILED",
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RelayError {
    fn status_code(&self) -> u16 {
        match self {
            RelayError::Unauthorized => 401,
            RelayError::Validation(_) => 400,
            RelayError::Downstream { .. } => 502,
            RelayError::Transport(_) => 500,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::Unauthorized.status_code(), 401);
        assert_eq!(RelayError::from(ValidationError::PhoneInvalid).status_code(), 400);
        assert_eq!(
            RelayError::from(ValidationError::AuthCodeLength { len: 2 }).status_code(),
            400
        );
        assert_eq!(
            RelayError::Downstream {
                dest: "https://a.example".into(),
                status: 500,
                detail: json!({}),
            }
            .status_code(),
            502
        );
        assert_eq!(RelayError::Transport("refused".into()).status_code(), 500);
    }

    #[test]
    fn test_codes() {
        assert_eq!(RelayError::Unauthorized.code(), "UNAUTHORIZED");
        assert_eq!(RelayError::from(ValidationError::PhoneInvalid).code(), "PHONE_INVALID");
        assert_eq!(
            RelayError::from(ValidationError::Body("missing field".into())).code(),
            "BODY_INVALID"
        );
        assert_eq!(RelayError::Transport("x".into()).code(), "FETCH_FAILED");
    }

    #[test]
    fn test_validation_message_is_transparent() {
        let err = RelayError::from(ValidationError::AuthCodeLength { len: 20 });
        assert_eq!(err.to_string(), "authCode must be between 4 and 16 characters, got 20");
    }
}

use thiserror::Error;

/// Classified transport failure.
///
/// Carries only owned data so callers can keep the most recent kind in
/// their own state and compare against it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    #[error("request timed out")]
    Timeout,
    #[error("service returned HTTP {0}")]
    HttpStatus(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Classify a reqwest failure. Timeouts are distinguished from plain
    /// connectivity loss so logs can tell them apart.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            TransportError::MalformedResponse(err.to_string())
        } else {
            TransportError::NetworkUnavailable(err.to_string())
        }
    }
}

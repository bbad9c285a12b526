use std::time::Duration;

use thiserror::Error;

/// Reasons a test submission or attempt did not succeed.
///
/// None of these are fatal: every variant leaves the runner ready for
/// another submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// The draft has no URL; nothing was dispatched.
    #[error("Please enter a URL")]
    MissingUrl,

    /// The attempt was dispatched but failed underway.
    #[error("{0}")]
    Transport(String),

    /// The attempt exceeded its allotted duration.
    #[error("Test timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The user abandoned the attempt.
    #[error("Test cancelled")]
    Cancelled,
}

impl TestError {
    /// Timeouts count as transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, TestError::Transport(_) | TestError::Timeout(_))
    }
}

impl From<reqwest::Error> for TestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            TestError::Transport(format!("Connection failed: {}", e))
        } else {
            TestError::Transport(format!("Request failed: {}", e))
        }
    }
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, TestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_message_matches_notice() {
        assert_eq!(TestError::MissingUrl.to_string(), crate::constants::MSG_MISSING_URL);
    }

    #[test]
    fn timeout_is_a_transport_error() {
        let err = TestError::Timeout(Duration::from_secs(30));
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Test timed out after 30s");
        assert!(!TestError::MissingUrl.is_transport());
        assert!(!TestError::Cancelled.is_transport());
    }
}

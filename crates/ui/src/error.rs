//! Error types for admin-UI interaction.

use std::time::Duration;

use thiserror::Error;

use shopkit_core::DomainError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The caller asked for something that cannot work (e.g. locating a
    /// variation that was never persisted). A test-authoring bug.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An element did not reach the awaited state in time.
    #[error("element not ready after {timeout:?}: {selector}")]
    Timeout { selector: String, timeout: Duration },

    /// The page rendered something this code does not understand.
    #[error("unexpected DOM shape: {0}")]
    UnexpectedDom(String),

    #[error("assertion failed: expected {expected:?}, got {actual:?}")]
    Assertion { expected: String, actual: String },

    /// The browser driver itself failed.
    #[error("driver error: {0}")]
    Driver(String),
}

impl UiError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn timeout(selector: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            selector: selector.into(),
            timeout,
        }
    }

    pub fn unexpected_dom(msg: impl Into<String>) -> Self {
        Self::UnexpectedDom(msg.into())
    }

    /// Environment/UI failures (slow page, broken driver) as opposed to
    /// logic failures in the test or the code under test.
    pub fn is_environment(&self) -> bool {
        matches!(self, UiError::Timeout { .. } | UiError::Driver(_))
    }
}

impl From<DomainError> for UiError {
    fn from(err: DomainError) -> Self {
        UiError::InvalidState(err.to_string())
    }
}

pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_environment_failures() {
        assert!(UiError::timeout("//div", Duration::from_secs(15)).is_environment());
        assert!(UiError::Driver("socket closed".into()).is_environment());
        assert!(!UiError::unexpected_dom("no name").is_environment());
        assert!(!UiError::invalid_state("unsaved").is_environment());
    }

    #[test]
    fn timeout_message_names_the_selector() {
        let err = UiError::timeout("//div[@id='x']", Duration::from_secs(2));
        assert_eq!(err.to_string(), "element not ready after 2s: //div[@id='x']");
    }
}

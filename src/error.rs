//! Error types for log source reconciliation.

use thiserror::Error;

/// Errors that can occur while reconciling a log source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The identity backend has not yet propagated a freshly created or
    /// modified principal. The only retryable error class.
    #[error("AWS authentication not yet propagated: {0}")]
    TransientAuth(String),

    /// The log source does not exist on the remote side.
    #[error("Log source not found: {0}")]
    NotFound(String),

    /// Required nested configuration data is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other remote API or transport failure. Terminal, never retried.
    #[error("API error: {0}")]
    Api(String),
}

/// Coarse classification of a [`SourceError`], used to decide retry and
/// not-found handling without matching on the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Retryable identity-propagation delay.
    TransientAuth,
    /// Resource absent on the remote side.
    NotFound,
    /// Declared configuration violates the resource contract.
    Configuration,
    /// Everything else: terminal.
    Other,
}

impl SourceError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TransientAuth(_) => ErrorKind::TransientAuth,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Serialization(_) | Self::Api(_) => ErrorKind::Other,
        }
    }

    /// Whether this error is the retryable transient-auth class.
    pub fn is_transient_auth(&self) -> bool {
        self.kind() == ErrorKind::TransientAuth
    }

    /// Whether this error reports the resource as absent.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::NotFound("source 987".to_string());
        assert_eq!(format!("{}", err), "Log source not found: source 987");

        let err = SourceError::Configuration("third_party_ref is required".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: third_party_ref is required"
        );

        let err = SourceError::TransientAuth("role not yet visible".to_string());
        assert_eq!(
            format!("{}", err),
            "AWS authentication not yet propagated: role not yet visible"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SourceError::TransientAuth("x".into()).kind(),
            ErrorKind::TransientAuth
        );
        assert_eq!(SourceError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            SourceError::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(SourceError::Api("x".into()).kind(), ErrorKind::Other);
    }

    #[test]
    fn test_kind_helpers() {
        assert!(SourceError::TransientAuth("x".into()).is_transient_auth());
        assert!(!SourceError::Api("x".into()).is_transient_auth());
        assert!(SourceError::NotFound("x".into()).is_not_found());
        assert!(!SourceError::TransientAuth("x".into()).is_not_found());
    }
}

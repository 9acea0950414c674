//! Store error types

use rollgate_types::JobKeyValidationError;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid job key: {0}")]
    InvalidJobKey(#[from] JobKeyValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl StoreError {
    /// True for errors caused by the arguments of the failing call.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidArgument(_) | StoreError::InvalidJobKey(_)
        )
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_classification() {
        assert!(StoreError::InvalidArgument("role".into()).is_invalid_argument());
        assert!(
            StoreError::from(JobKeyValidationError::EmptyComponent("name")).is_invalid_argument()
        );
        assert!(!StoreError::Config(::config::ConfigError::Message("bad".into()))
            .is_invalid_argument());
    }

    #[test]
    fn test_display() {
        let err = StoreError::from(JobKeyValidationError::EmptyComponent("role"));
        assert_eq!(err.to_string(), "invalid job key: job key role cannot be empty");
    }
}

//! Job key validation seam
//!
//! The store never decides on its own what a well-formed job key is. It asks
//! a [`JobKeyValidator`], which either rejects the candidate or hands back a
//! canonical copy owned by the caller.

use crate::config::ValidationConfig;
use rollgate_types::{DeepCopy, JobKey, JobKeyValidationError};

/// Validates and canonicalizes job keys.
pub trait JobKeyValidator: Send + Sync {
    /// Return a canonical, independently owned copy of `candidate`, or the
    /// reason it is malformed.
    fn validate(&self, candidate: &JobKey) -> Result<JobKey, JobKeyValidationError>;
}

/// Default validator enforcing the identifier character and length rules.
#[derive(Debug, Clone)]
pub struct StrictJobKeyValidator {
    max_identifier_length: usize,
    allow_dots: bool,
}

impl StrictJobKeyValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            max_identifier_length: config.max_identifier_length,
            allow_dots: config.allow_dots,
        }
    }
}

impl Default for StrictJobKeyValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl JobKeyValidator for StrictJobKeyValidator {
    fn validate(&self, candidate: &JobKey) -> Result<JobKey, JobKeyValidationError> {
        candidate.validate(self.max_identifier_length, self.allow_dots)?;
        Ok(candidate.deep_copy())
    }
}

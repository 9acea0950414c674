//! Job keys
//!
//! A job is named by its role (the owning account), the environment it runs
//! in, and a job name.

use crate::copy::DeepCopy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default upper bound on the length of a single key component.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 255;

/// Composite identifier of a job
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    pub role: String,
    pub environment: String,
    pub name: String,
}

impl JobKey {
    pub fn new(
        role: impl Into<String>,
        environment: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            environment: environment.into(),
            name: name.into(),
        }
    }

    /// Check every component against the identifier rules.
    ///
    /// Components must be non-empty, at most `max_len` characters, and made of
    /// ASCII alphanumerics, `_` and `-`. Dots are accepted when `allow_dots`
    /// is set.
    pub fn validate(
        &self,
        max_len: usize,
        allow_dots: bool,
    ) -> Result<(), JobKeyValidationError> {
        for (component, value) in [
            ("role", &self.role),
            ("environment", &self.environment),
            ("name", &self.name),
        ] {
            validate_component(component, value, max_len, allow_dots)?;
        }
        Ok(())
    }

    /// Validate with default rules.
    pub fn is_valid(&self) -> bool {
        self.validate(DEFAULT_MAX_IDENTIFIER_LENGTH, true).is_ok()
    }
}

impl DeepCopy for JobKey {}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.role, self.environment, self.name)
    }
}

fn validate_component(
    component: &'static str,
    value: &str,
    max_len: usize,
    allow_dots: bool,
) -> Result<(), JobKeyValidationError> {
    if value.is_empty() {
        return Err(JobKeyValidationError::EmptyComponent(component));
    }

    let len = value.chars().count();
    if len > max_len {
        return Err(JobKeyValidationError::TooLong {
            component,
            len,
            max: max_len,
        });
    }

    let allowed = |c: &char| {
        c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || (allow_dots && *c == '.')
    };
    if let Some(ch) = value.chars().find(|c| !allowed(c)) {
        return Err(JobKeyValidationError::InvalidCharacter { component, ch });
    }

    Ok(())
}

/// Job key validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobKeyValidationError {
    #[error("job key {0} cannot be empty")]
    EmptyComponent(&'static str),

    #[error("job key {component} contains invalid character {ch:?}")]
    InvalidCharacter { component: &'static str, ch: char },

    #[error("job key {component} is {len} characters long, max is {max}")]
    TooLong {
        component: &'static str,
        len: usize,
        max: usize,
    },
}

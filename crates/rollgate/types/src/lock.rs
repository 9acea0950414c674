//! Mutation locks
//!
//! A lock names the actor allowed to change a scope until it is released.

use crate::copy::DeepCopy;
use crate::job::JobKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Scope protected by a lock
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockKey {
    /// All mutations of a single job
    Job(JobKey),
}

impl LockKey {
    pub fn job(&self) -> Option<&JobKey> {
        match self {
            LockKey::Job(key) => Some(key),
        }
    }
}

impl From<JobKey> for LockKey {
    fn from(key: JobKey) -> Self {
        LockKey::Job(key)
    }
}

impl DeepCopy for LockKey {}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockKey::Job(key) => write!(f, "lock:job:{}", key),
        }
    }
}

/// An active mutation lock
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lock {
    /// Scope the lock protects
    pub key: LockKey,

    /// Opaque token handed to the holder
    pub token: String,

    /// User that acquired the lock
    pub user: String,

    /// Acquisition timestamp
    pub timestamp: DateTime<Utc>,

    /// Optional reason given by the holder
    pub message: Option<String>,
}

impl Lock {
    /// Create a lock acquired now, with a freshly generated token.
    pub fn new(key: LockKey, user: impl Into<String>) -> Self {
        Self {
            key,
            token: Uuid::new_v4().to_string(),
            user: user.into(),
            timestamp: Utc::now(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_held_by(&self, token: &str) -> bool {
        self.token == token
    }
}

impl DeepCopy for Lock {}

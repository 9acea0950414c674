//! Rollgate Types - Records shared by the mutation control subsystem
//!
//! A cluster scheduler gates changes to running jobs through two kinds of
//! records, both defined here:
//!
//! - **JobKey**: `(role, environment, name)` triple naming a job
//! - **JobUpdateConfiguration**: parameters of an in-flight rolling update
//! - **LockKey / Lock**: which actor currently owns the right to mutate a scope
//!
//! ## Ownership
//!
//! Every record holds only owned data. The [`DeepCopy`] trait marks the types
//! that may cross a storage boundary; copying one never shares mutable state
//! with its source.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod copy;
pub mod job;
pub mod lock;
pub mod update;

// Re-export main types
pub use copy::{deep_copier, DeepCopy};
pub use job::{JobKey, JobKeyValidationError, DEFAULT_MAX_IDENTIFIER_LENGTH};
pub use lock::{Lock, LockKey};
pub use update::{JobUpdateConfiguration, TaskConfig, TaskUpdateConfiguration};

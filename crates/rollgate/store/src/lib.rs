//! Rollgate Store - In-memory storage for update configurations and locks
//!
//! This crate holds the two collections a scheduler consults before mutating
//! a job:
//!
//! - **Job update configurations**: one in-flight rolling update per job
//! - **Locks**: which actor currently owns the right to mutate a scope
//!
//! ## Copy isolation
//!
//! The store owns a private copy of every record it holds. Records are deep
//! copied when saved and again when fetched, so callers can freely mutate
//! what they passed in or got back.
//!
//! ## Concurrency
//!
//! Both collections are sharded concurrent maps. Single-key operations are
//! atomic per key; scans over a collection are best-effort and may observe
//! writes that land while the scan is running.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod error;
pub mod memory;
pub mod telemetry;
pub mod traits;
pub mod validation;

// Re-exports
pub use crate::config::{LoggingConfig, StoreConfig, ValidationConfig};
pub use error::{Result, StoreError};
pub use memory::{InMemoryUpdateStore, StoreStats};
pub use traits::{MutableUpdateStore, UpdateStore};
pub use validation::{JobKeyValidator, StrictJobKeyValidator};

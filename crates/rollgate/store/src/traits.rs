//! Store trait definitions.
//!
//! Read and mutation surfaces are split so a hosting layer can hand out
//! read-only access where no writes are expected.

use std::collections::HashSet;

use rollgate_types::{JobKey, JobUpdateConfiguration, Lock, LockKey};

use crate::error::Result;

/// Read surface of the update store.
///
/// Every returned record is a private copy of what the store holds.
pub trait UpdateStore: Send + Sync {
    /// Fetch the update configuration for a job.
    ///
    /// Fails if `job_key` does not pass validation.
    fn fetch_job_update_config(&self, job_key: &JobKey) -> Result<Option<JobUpdateConfiguration>>;

    /// Fetch every update configuration whose job belongs to `role`.
    ///
    /// An empty `role` stands for a missing argument and fails with
    /// `InvalidArgument`; it never matches a stored job.
    fn fetch_job_update_configs_by_role(&self, role: &str)
        -> Result<HashSet<JobUpdateConfiguration>>;

    /// Roles with at least one update configuration stored.
    fn fetch_distinct_updating_roles(&self) -> HashSet<String>;

    /// Fetch all locks.
    fn fetch_locks(&self) -> HashSet<Lock>;

    /// Fetch the lock for a scope.
    fn fetch_lock(&self, lock_key: &LockKey) -> Option<Lock>;
}

/// Mutation surface of the update store.
pub trait MutableUpdateStore: UpdateStore {
    /// Save an update configuration, replacing any existing one for the job.
    ///
    /// Fails without changing state if the embedded job key does not pass
    /// validation.
    fn save_job_update_config(&self, config: &JobUpdateConfiguration) -> Result<()>;

    /// Remove the update configuration for a job.
    ///
    /// The key is canonicalized like on save. Unknown or malformed keys are
    /// ignored.
    fn remove_job_update_configs(&self, job_key: &JobKey);

    /// Remove all update configurations.
    fn clear_job_update_configs(&self);

    /// Save a lock, replacing any existing lock for the same key.
    fn save_lock(&self, lock: &Lock);

    /// Remove the lock for a scope. Unknown keys are ignored.
    fn remove_lock(&self, lock_key: &LockKey);

    /// Remove all locks.
    fn clear_locks(&self);
}

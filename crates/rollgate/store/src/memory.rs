//! In-memory update store
//!
//! Backed by two sharded concurrent maps. Nothing here is persisted; a
//! hosting storage layer is expected to replay its own log into a fresh store
//! on startup.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use rollgate_types::{deep_copier, DeepCopy, JobKey, JobUpdateConfiguration, Lock, LockKey};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::traits::{MutableUpdateStore, UpdateStore};
use crate::validation::{JobKeyValidator, StrictJobKeyValidator};

/// Entry counts at a point during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub job_update_configs: usize,
    pub locks: usize,
}

/// In-memory update store
pub struct InMemoryUpdateStore {
    /// Update configurations indexed by canonical job key
    configs: DashMap<JobKey, JobUpdateConfiguration>,

    /// Locks indexed by the scope they protect
    locks: DashMap<LockKey, Lock>,

    validator: Arc<dyn JobKeyValidator>,
}

impl InMemoryUpdateStore {
    /// Create a store using the default job key validator.
    pub fn new() -> Self {
        Self::with_validator(Arc::new(StrictJobKeyValidator::default()))
    }

    /// Create a store with validation rules taken from `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_validator(Arc::new(StrictJobKeyValidator::new(&config.validation)))
    }

    pub fn with_validator(validator: Arc<dyn JobKeyValidator>) -> Self {
        Self {
            configs: DashMap::new(),
            locks: DashMap::new(),
            validator,
        }
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            job_update_configs: self.configs.len(),
            locks: self.locks.len(),
        }
    }

    /// Canonical copy of `job_key`, or an invalid-argument error.
    fn key(&self, job_key: &JobKey) -> Result<JobKey> {
        self.validator.validate(job_key).map_err(|e| {
            warn!(job = %job_key, error = %e, "Rejected job key");
            StoreError::from(e)
        })
    }
}

impl Default for InMemoryUpdateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateStore for InMemoryUpdateStore {
    fn fetch_job_update_config(&self, job_key: &JobKey) -> Result<Option<JobUpdateConfiguration>> {
        let key = self.key(job_key)?;
        Ok(self.configs.get(&key).map(|c| c.value().deep_copy()))
    }

    fn fetch_job_update_configs_by_role(
        &self,
        role: &str,
    ) -> Result<HashSet<JobUpdateConfiguration>> {
        if role.is_empty() {
            warn!("Rejected empty role filter");
            return Err(StoreError::InvalidArgument("role must not be empty".to_string()));
        }

        Ok(self
            .configs
            .iter()
            .filter(|entry| entry.value().role() == role)
            .map(|entry| entry.value().deep_copy())
            .collect())
    }

    fn fetch_distinct_updating_roles(&self) -> HashSet<String> {
        self.configs
            .iter()
            .map(|entry| entry.value().role().to_string())
            .collect()
    }

    fn fetch_locks(&self) -> HashSet<Lock> {
        let copy = deep_copier::<Lock>();
        self.locks.iter().map(|entry| copy(entry.value())).collect()
    }

    fn fetch_lock(&self, lock_key: &LockKey) -> Option<Lock> {
        self.locks.get(lock_key).map(|l| l.value().deep_copy())
    }
}

impl MutableUpdateStore for InMemoryUpdateStore {
    fn save_job_update_config(&self, config: &JobUpdateConfiguration) -> Result<()> {
        let key = self.key(&config.job_key)?;

        // Build the full copy before touching the map.
        let mut stored = config.deep_copy();
        stored.job_key = key.deep_copy();

        let replaced = self.configs.insert(key.deep_copy(), stored).is_some();
        debug!(
            job = %key,
            update_token = %config.update_token,
            replaced,
            "Saved job update config"
        );
        Ok(())
    }

    fn remove_job_update_configs(&self, job_key: &JobKey) {
        // A key the validator rejects can never have been stored.
        let Ok(key) = self.validator.validate(job_key) else {
            debug!(job = %job_key, "Ignored removal of invalid job key");
            return;
        };
        let removed = self.configs.remove(&key).is_some();
        debug!(job = %key, removed, "Removed job update config");
    }

    fn clear_job_update_configs(&self) {
        let count = self.configs.len();
        self.configs.clear();
        info!(count, "Cleared job update configs");
    }

    fn save_lock(&self, lock: &Lock) {
        let stored = lock.deep_copy();
        let replaced = self.locks.insert(lock.key.deep_copy(), stored).is_some();
        debug!(lock = %lock.key, user = %lock.user, replaced, "Saved lock");
    }

    fn remove_lock(&self, lock_key: &LockKey) {
        let removed = self.locks.remove(lock_key).is_some();
        debug!(lock = %lock_key, removed, "Removed lock");
    }

    fn clear_locks(&self) {
        let count = self.locks.len();
        self.locks.clear();
        info!(count, "Cleared locks");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollgate_types::{JobKeyValidationError, TaskConfig, TaskUpdateConfiguration};

    fn job(role: &str, name: &str) -> JobKey {
        JobKey::new(role, "prod", name)
    }

    fn update_for(key: JobKey, token: &str) -> JobUpdateConfiguration {
        let task = TaskConfig::new(&key, 0);
        JobUpdateConfiguration::new(
            key,
            token,
            vec![TaskUpdateConfiguration::new(None, Some(task))],
        )
    }

    /// Lowercases every component, to check that the store keys by the
    /// validator's canonical form.
    struct LowercasingValidator;

    impl JobKeyValidator for LowercasingValidator {
        fn validate(
            &self,
            candidate: &JobKey,
        ) -> std::result::Result<JobKey, JobKeyValidationError> {
            candidate.validate(64, true)?;
            Ok(JobKey::new(
                candidate.role.to_lowercase(),
                candidate.environment.to_lowercase(),
                candidate.name.to_lowercase(),
            ))
        }
    }

    #[test]
    fn test_save_and_fetch() {
        let store = InMemoryUpdateStore::new();
        let config = update_for(job("www-data", "hello"), "t1");

        store.save_job_update_config(&config).unwrap();

        assert_eq!(
            store.fetch_job_update_config(&config.job_key).unwrap(),
            Some(config)
        );
        assert_eq!(store.stats().job_update_configs, 1);
    }

    #[test]
    fn test_fetch_missing_is_none() {
        let store = InMemoryUpdateStore::new();
        assert_eq!(
            store.fetch_job_update_config(&job("www-data", "hello")).unwrap(),
            None
        );
    }

    #[test]
    fn test_fetch_rejects_invalid_key() {
        let store = InMemoryUpdateStore::new();
        let err = store
            .fetch_job_update_config(&JobKey::new("", "prod", "hello"))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_role_filter_rejected() {
        let store = InMemoryUpdateStore::new();
        let err = store.fetch_job_update_configs_by_role("").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_keys_are_canonicalized() {
        let store = InMemoryUpdateStore::with_validator(Arc::new(LowercasingValidator));
        let config = update_for(JobKey::new("WWW-data", "Prod", "Hello"), "t1");

        store.save_job_update_config(&config).unwrap();

        let fetched = store
            .fetch_job_update_config(&JobKey::new("www-data", "prod", "hello"))
            .unwrap()
            .unwrap();
        assert_eq!(fetched.job_key, JobKey::new("www-data", "prod", "hello"));
        assert_eq!(fetched.update_token, "t1");
        assert_eq!(
            store.fetch_distinct_updating_roles(),
            HashSet::from(["www-data".to_string()])
        );
    }

    #[test]
    fn test_remove_uses_canonical_key() {
        let store = InMemoryUpdateStore::with_validator(Arc::new(LowercasingValidator));
        let key = JobKey::new("WWW", "Prod", "Hello");
        store
            .save_job_update_config(&update_for(key.clone(), "t1"))
            .unwrap();
        assert!(store.fetch_job_update_config(&key).unwrap().is_some());

        store.remove_job_update_configs(&key);

        assert_eq!(store.fetch_job_update_config(&key).unwrap(), None);
        assert_eq!(
            store
                .fetch_job_update_config(&JobKey::new("www", "prod", "hello"))
                .unwrap(),
            None
        );
        assert_eq!(store.stats().job_update_configs, 0);
    }

    #[test]
    fn test_remove_invalid_key_is_noop() {
        let store = InMemoryUpdateStore::with_validator(Arc::new(LowercasingValidator));
        store
            .save_job_update_config(&update_for(job("www", "hello"), "t1"))
            .unwrap();

        store.remove_job_update_configs(&JobKey::new("", "prod", "hello"));

        assert_eq!(store.stats().job_update_configs, 1);
    }

    #[test]
    fn test_from_config_applies_validation_rules() {
        let mut config = StoreConfig::default();
        config.validation.allow_dots = false;
        let store = InMemoryUpdateStore::from_config(&config);

        let err = store
            .save_job_update_config(&update_for(job("www-data", "hello.v2"), "t1"))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(store.stats(), StoreStats::default());
    }

    #[test]
    fn test_clear_reports_empty_stats() {
        let store = InMemoryUpdateStore::new();
        store
            .save_job_update_config(&update_for(job("www-data", "hello"), "t1"))
            .unwrap();
        store.save_lock(&Lock::new(job("www-data", "hello").into(), "alice"));

        store.clear_job_update_configs();
        assert_eq!(
            store.stats(),
            StoreStats {
                job_update_configs: 0,
                locks: 1
            }
        );

        store.clear_locks();
        assert_eq!(store.stats(), StoreStats::default());
    }
}

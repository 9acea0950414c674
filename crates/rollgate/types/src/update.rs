//! Rolling update configuration types
//!
//! A `JobUpdateConfiguration` describes an update in flight for one job: the
//! token of the client driving it and, per shard, the task configuration being
//! replaced and the one replacing it.

use crate::copy::DeepCopy;
use crate::job::JobKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-flight rolling update for a single job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobUpdateConfiguration {
    /// Job being updated
    pub job_key: JobKey,

    /// Token identifying the update session
    pub update_token: String,

    /// Per-shard old/new task configurations
    pub configs: Vec<TaskUpdateConfiguration>,
}

impl JobUpdateConfiguration {
    pub fn new(
        job_key: JobKey,
        update_token: impl Into<String>,
        configs: Vec<TaskUpdateConfiguration>,
    ) -> Self {
        Self {
            job_key,
            update_token: update_token.into(),
            configs,
        }
    }

    /// Role of the job being updated
    pub fn role(&self) -> &str {
        &self.job_key.role
    }

    /// Shards that this update touches, in configuration order.
    pub fn shard_ids(&self) -> Vec<u32> {
        self.configs.iter().filter_map(|c| c.shard_id()).collect()
    }
}

impl DeepCopy for JobUpdateConfiguration {}

/// Old and new configuration of one shard.
///
/// `old_config` is absent when the update adds the shard; `new_config` is
/// absent when the update removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskUpdateConfiguration {
    pub old_config: Option<TaskConfig>,
    pub new_config: Option<TaskConfig>,
}

impl TaskUpdateConfiguration {
    pub fn new(old_config: Option<TaskConfig>, new_config: Option<TaskConfig>) -> Self {
        Self {
            old_config,
            new_config,
        }
    }

    pub fn shard_id(&self) -> Option<u32> {
        self.new_config
            .as_ref()
            .or(self.old_config.as_ref())
            .map(|c| c.shard_id)
    }
}

impl DeepCopy for TaskUpdateConfiguration {}

/// Task configuration for one shard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskConfig {
    pub owner: String,
    pub environment: String,
    pub job_name: String,
    pub shard_id: u32,

    /// CPU request in millicores
    pub cpu_millis: u32,
    pub ram_mb: u64,
    pub disk_mb: u64,

    /// Free-form task metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl TaskConfig {
    /// Minimal task config for a shard of `job`.
    pub fn new(job: &JobKey, shard_id: u32) -> Self {
        Self {
            owner: job.role.clone(),
            environment: job.environment.clone(),
            job_name: job.name.clone(),
            shard_id,
            cpu_millis: 1000,
            ram_mb: 128,
            disk_mb: 256,
            metadata: BTreeMap::new(),
        }
    }
}

impl DeepCopy for TaskConfig {}

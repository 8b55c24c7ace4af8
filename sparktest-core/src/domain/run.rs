//! Test run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::{Record, RecordKind};

/// One executed (or pending) instance of a test
///
/// `definition_id` is a back-reference only. It is checked when the run is
/// created and never afterwards, so it may dangle once the definition is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(alias = "commands")]
    pub command: Vec<String>,
    pub status: RunStatus,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "definition_id", skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
    #[serde(default, alias = "executor_id", skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<String>,
    #[serde(default, alias = "suite_id", skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,
    /// Wall-clock duration in milliseconds, once finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
    #[serde(default, alias = "k8s_job_name", skip_serializing_if = "Option::is_none")]
    pub k8s_job_name: Option<String>,
}

impl Run {
    /// Name of the Kubernetes job the backend schedules for this run
    pub fn job_name(&self) -> String {
        job_name_for(&self.id)
    }
}

/// Derive the Kubernetes job name for a run id
pub fn job_name_for(run_id: &str) -> String {
    format!("test-run-{}", run_id)
}

/// Run execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    #[serde(alias = "completed")]
    Succeeded,
    Failed,
}

impl RunStatus {
    /// Whether the run has reached a final state
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "pending"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

impl Record for Run {
    const KIND: RecordKind = RecordKind::Run;

    fn id(&self) -> &str {
        &self.id
    }
}

//! Kubernetes DTOs
//!
//! Payloads of the backend's cluster endpoints. The backend emits these in
//! snake_case, unlike the persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /api/k8s/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesHealth {
    pub kubernetes_connected: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `GET /api/k8s/logs/{job_name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLogs {
    pub job_name: String,
    pub pod_name: String,
    pub logs: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

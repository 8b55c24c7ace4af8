//! Kubernetes API endpoints

use crate::BackendClient;
use crate::error::Result;
use sparktest_core::domain::run::job_name_for;
use sparktest_core::dto::kubernetes::{JobLogs, KubernetesHealth};
use tracing::debug;

impl BackendClient {
    // =============================================================================
    // Cluster
    // =============================================================================

    /// Check whether the backend can reach its Kubernetes cluster
    pub async fn kubernetes_health(&self) -> Result<KubernetesHealth> {
        let url = self.url("/api/k8s/health");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get the logs of a Kubernetes job
    ///
    /// # Arguments
    /// * `job_name` - The job name (e.g. "test-run-{run id}")
    pub async fn job_logs(&self, job_name: &str) -> Result<JobLogs> {
        let url = self.url(&format!("/api/k8s/logs/{}", job_name));
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get the logs of the job backing a run
    pub async fn run_logs(&self, run_id: &str) -> Result<JobLogs> {
        self.job_logs(&job_name_for(run_id)).await
    }
}

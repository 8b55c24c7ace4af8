//! Run-related API endpoints

use crate::BackendClient;
use crate::error::Result;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, Run};
use sparktest_core::dto::run::RunOverrides;
use tracing::debug;

impl BackendClient {
    // =============================================================================
    // Run Triggering
    // =============================================================================

    /// Trigger a run of a definition
    ///
    /// `POST /api/test-definitions/{id}/run`. The backend creates the run
    /// record and schedules its Kubernetes job.
    ///
    /// # Arguments
    /// * `definition_id` - The definition to run
    /// * `overrides` - Optional name, image and command overrides
    ///
    /// # Returns
    /// The created run
    pub async fn run_definition(
        &self,
        definition_id: &str,
        overrides: &RunOverrides,
    ) -> Result<Run> {
        let url = format!(
            "{}/{}/run",
            self.url(Definition::KIND.api_path()),
            definition_id
        );
        debug!("POST {}", url);
        let response = self.client.post(&url).json(overrides).send().await?;

        self.handle_response(response).await
    }
}

//! Storage service traits
//!
//! `RecordStore<T>` is the uniform list/get/save/delete contract for one record
//! type. `StorageService` groups the four record stores with the run and
//! cluster operations, and is what the facade hands out.
//!
//! All methods are async even where the backing medium is synchronous, so the
//! local and remote implementations are interchangeable.

use async_trait::async_trait;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, Executor, Run, TestSuite};
use sparktest_core::dto::kubernetes::{JobLogs, KubernetesHealth};
use sparktest_core::dto::run::{CreateRun, RunOverrides};
use tracing::info;

use crate::error::{Result, StorageError};

/// Which implementation backs a [`StorageService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Local,
    Remote,
    Hybrid,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Local => write!(f, "local"),
            StoreKind::Remote => write!(f, "remote"),
            StoreKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Persistence operations for one record type
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Returns every record of the type
    async fn list(&self) -> Result<Vec<T>>;

    /// Returns the record with the given id, or `None` if there is none
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Inserts the record, or replaces the one with the same id
    ///
    /// # Returns
    /// The record as stored
    async fn save(&self, record: T) -> Result<T>;

    /// Removes the record with the given id
    ///
    /// Deleting an id that does not exist succeeds.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// The data-access interface the dashboard is written against
#[async_trait]
pub trait StorageService: Send + Sync {
    /// The backend behind this instance
    fn kind(&self) -> StoreKind;

    /// Prepares the backing medium (e.g. seeds empty local collections)
    async fn initialize(&self) -> Result<()>;

    fn executors(&self) -> &dyn RecordStore<Executor>;

    fn definitions(&self) -> &dyn RecordStore<Definition>;

    fn runs(&self) -> &dyn RecordStore<Run>;

    fn suites(&self) -> &dyn RecordStore<TestSuite>;

    /// Creates a new running record
    ///
    /// The request must carry a name, an image and at least one command. When
    /// it references a definition, that definition must exist now.
    async fn create_run(&self, req: CreateRun) -> Result<Run> {
        req.validate().map_err(StorageError::InvalidRequest)?;

        if let Some(definition_id) = &req.definition_id {
            if self.definitions().get_by_id(definition_id).await?.is_none() {
                return Err(StorageError::DefinitionNotFound(definition_id.clone()));
            }
        }

        let run = req.into_run();
        info!("Creating run {} ({})", run.id, run.name);
        self.runs().save(run).await
    }

    /// Launches a run from a stored definition
    async fn run_definition(&self, definition_id: &str, overrides: RunOverrides) -> Result<Run> {
        let definition = self
            .definitions()
            .get_by_id(definition_id)
            .await?
            .ok_or_else(|| StorageError::DefinitionNotFound(definition_id.to_string()))?;

        self.create_run(CreateRun::from_definition(&definition, overrides))
            .await
    }

    /// Reports whether the backend can reach its cluster
    async fn kubernetes_health(&self) -> Result<KubernetesHealth>;

    /// Fetches the logs of the Kubernetes job backing a run
    async fn run_logs(&self, run_id: &str) -> Result<JobLogs>;
}

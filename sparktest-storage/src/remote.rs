//! Remote store
//!
//! Forwards every operation to the backend API through [`BackendClient`].
//! There is no cache and no retry: a network error or a non-2xx status
//! surfaces as [`StorageError::Request`].

use async_trait::async_trait;
use sparktest_client::BackendClient;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, Executor, Run, TestSuite};
use sparktest_core::dto::kubernetes::{JobLogs, KubernetesHealth};
use sparktest_core::dto::run::{CreateRun, RunOverrides};
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::service::{RecordStore, StorageService, StoreKind};

/// One record type's collection on the backend
pub struct RemoteRecords<T: Record> {
    client: BackendClient,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for RemoteRecords<T> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<T: Record> RemoteRecords<T> {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for RemoteRecords<T> {
    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.client.list_records::<T>().await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.client.get_record::<T>(id).await?)
    }

    /// Updates the record if the backend knows its id, creates it otherwise
    async fn save(&self, record: T) -> Result<T> {
        let exists = self.client.get_record::<T>(record.id()).await?.is_some();

        let saved = if exists {
            debug!("Updating {} {}", T::KIND, record.id());
            self.client.update_record(&record).await?
        } else {
            debug!("Creating {} {}", T::KIND, record.id());
            self.client.create_record(&record).await?
        };

        Ok(saved)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Ok(self.client.delete_record::<T>(id).await?)
    }
}

/// Store backed by the backend HTTP API
#[derive(Clone)]
pub struct RemoteStore {
    client: BackendClient,
    pub(crate) executors: RemoteRecords<Executor>,
    pub(crate) definitions: RemoteRecords<Definition>,
    pub(crate) runs: RemoteRecords<Run>,
    pub(crate) suites: RemoteRecords<TestSuite>,
}

impl RemoteStore {
    pub fn new(client: BackendClient) -> Self {
        Self {
            executors: RemoteRecords::new(client.clone()),
            definitions: RemoteRecords::new(client.clone()),
            runs: RemoteRecords::new(client.clone()),
            suites: RemoteRecords::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl StorageService for RemoteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn executors(&self) -> &dyn RecordStore<Executor> {
        &self.executors
    }

    fn definitions(&self) -> &dyn RecordStore<Definition> {
        &self.definitions
    }

    fn runs(&self) -> &dyn RecordStore<Run> {
        &self.runs
    }

    fn suites(&self) -> &dyn RecordStore<TestSuite> {
        &self.suites
    }

    /// Posts the new run straight to the collection; its id is fresh, so
    /// there is nothing to probe for.
    async fn create_run(&self, req: CreateRun) -> Result<Run> {
        req.validate().map_err(StorageError::InvalidRequest)?;

        if let Some(definition_id) = &req.definition_id {
            if self.definitions.get_by_id(definition_id).await?.is_none() {
                return Err(StorageError::DefinitionNotFound(definition_id.clone()));
            }
        }

        let run = req.into_run();
        info!("Creating run {} ({}) on backend", run.id, run.name);
        Ok(self.client.create_record(&run).await?)
    }

    async fn run_definition(&self, definition_id: &str, overrides: RunOverrides) -> Result<Run> {
        match self.client.run_definition(definition_id, &overrides).await {
            Ok(run) => Ok(run),
            Err(e) if e.is_not_found() => {
                Err(StorageError::DefinitionNotFound(definition_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn kubernetes_health(&self) -> Result<KubernetesHealth> {
        Ok(self.client.kubernetes_health().await?)
    }

    async fn run_logs(&self, run_id: &str) -> Result<JobLogs> {
        Ok(self.client.run_logs(run_id).await?)
    }
}

//! Hybrid store
//!
//! Tries the backend first and answers from the local store when the backend
//! request fails. The decision is made per call: the next call tries the
//! backend again. Successful backend results are returned as they are, with
//! no merge against local data and no write-back.

use async_trait::async_trait;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, Executor, Run, TestSuite};
use sparktest_core::dto::kubernetes::{JobLogs, KubernetesHealth};
use sparktest_core::dto::run::{CreateRun, RunOverrides};
use std::future::Future;
use tracing::warn;

use crate::error::{Result, StorageError};
use crate::local::{LocalRecords, LocalStore};
use crate::remote::{RemoteRecords, RemoteStore};
use crate::service::{RecordStore, StorageService, StoreKind};

/// Runs `remote`, falling back to `local` if it fails with a request failure
///
/// Any other error from the remote side (e.g. an invalid request) is returned
/// as is. After a fallback, the local answer stands, errors included; only a
/// failing local medium is reported as [`StorageError::FallbackFailed`].
async fn with_fallback<R, RF, LF>(operation: &str, remote: RF, local: LF) -> Result<R>
where
    RF: Future<Output = Result<R>>,
    LF: Future<Output = Result<R>>,
{
    match remote.await {
        Ok(value) => Ok(value),
        Err(remote_err) if remote_err.is_request_failure() => {
            warn!(
                "Backend {} failed, using local storage: {}",
                operation, remote_err
            );
            match local.await {
                Err(local_err) if local_err.is_local_failure() => {
                    Err(StorageError::FallbackFailed {
                        remote: Box::new(remote_err),
                        local: Box::new(local_err),
                    })
                }
                answer => answer,
            }
        }
        Err(e) => Err(e),
    }
}

/// One record type, remote first
pub struct HybridRecords<T: Record> {
    remote: RemoteRecords<T>,
    local: LocalRecords<T>,
}

impl<T: Record> HybridRecords<T> {
    pub fn new(remote: RemoteRecords<T>, local: LocalRecords<T>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for HybridRecords<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let operation = format!("list of {}", T::KIND);
        with_fallback(&operation, self.remote.list(), self.local.list()).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let operation = format!("lookup of {} {}", T::KIND, id);
        with_fallback(
            &operation,
            self.remote.get_by_id(id),
            self.local.get_by_id(id),
        )
        .await
    }

    async fn save(&self, record: T) -> Result<T> {
        let operation = format!("save of {} {}", T::KIND, record.id());
        with_fallback(
            &operation,
            self.remote.save(record.clone()),
            self.local.save(record),
        )
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let operation = format!("delete of {} {}", T::KIND, id);
        with_fallback(&operation, self.remote.delete(id), self.local.delete(id)).await
    }
}

/// Store that prefers the backend and degrades to local storage
pub struct HybridStore {
    remote: RemoteStore,
    local: LocalStore,
    executors: HybridRecords<Executor>,
    definitions: HybridRecords<Definition>,
    runs: HybridRecords<Run>,
    suites: HybridRecords<TestSuite>,
}

impl HybridStore {
    pub fn new(remote: RemoteStore, local: LocalStore) -> Self {
        Self {
            executors: HybridRecords::new(remote.executors.clone(), local.executors.clone()),
            definitions: HybridRecords::new(remote.definitions.clone(), local.definitions.clone()),
            runs: HybridRecords::new(remote.runs.clone(), local.runs.clone()),
            suites: HybridRecords::new(remote.suites.clone(), local.suites.clone()),
            remote,
            local,
        }
    }

    pub fn remote(&self) -> &RemoteStore {
        &self.remote
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }
}

#[async_trait]
impl StorageService for HybridStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Hybrid
    }

    /// Seeds the local fallback; the backend needs no preparation
    async fn initialize(&self) -> Result<()> {
        self.remote.initialize().await?;
        self.local.initialize().await
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

    async fn create_run(&self, req: CreateRun) -> Result<Run> {
        with_fallback(
            "run creation",
            self.remote.create_run(req.clone()),
            self.local.create_run(req),
        )
        .await
    }

    async fn run_definition(&self, definition_id: &str, overrides: RunOverrides) -> Result<Run> {
        with_fallback(
            "run launch",
            self.remote.run_definition(definition_id, overrides.clone()),
            self.local.run_definition(definition_id, overrides),
        )
        .await
    }

    // Cluster state only exists on the backend
    async fn kubernetes_health(&self) -> Result<KubernetesHealth> {
        self.remote.kubernetes_health().await
    }

    async fn run_logs(&self, run_id: &str) -> Result<JobLogs> {
        self.remote.run_logs(run_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::Medium;
    use crate::test_support::{FakeBackend, UNREACHABLE_URL, sample_definition, sample_executor};
    use sparktest_client::BackendClient;
    use sparktest_core::domain::RunStatus;
    use std::io;
    use std::sync::Arc;

    struct BrokenMedium;

    impl Medium for BrokenMedium {
        fn read(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::other("disk unavailable"))
        }

        fn write(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("disk unavailable"))
        }
    }

    fn offline_store() -> HybridStore {
        HybridStore::new(
            RemoteStore::new(BackendClient::new(UNREACHABLE_URL)),
            LocalStore::in_memory(),
        )
    }

    fn request(definition_id: Option<&str>) -> CreateRun {
        CreateRun {
            name: "Smoke".to_string(),
            image: "alpine".to_string(),
            command: vec!["echo smoke".to_string()],
            definition_id: definition_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_falls_back_to_local() {
        let store = offline_store();

        let executors = store.executors().list().await.unwrap();
        let ids: Vec<_> = executors.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["kubernetes", "docker"]);
    }

    #[tokio::test]
    async fn test_remote_result_is_not_merged() {
        let backend = FakeBackend::start().await;
        backend.insert(&sample_executor("pytest", "Pytest Runner"));
        let store = HybridStore::new(RemoteStore::new(backend.client()), LocalStore::in_memory());

        let executors = store.executors().list().await.unwrap();
        assert_eq!(executors.len(), 1);
        assert_eq!(executors[0].id, "pytest");
    }

    #[tokio::test]
    async fn test_remote_miss_is_not_a_failure() {
        let backend = FakeBackend::start().await;
        let store = HybridStore::new(RemoteStore::new(backend.client()), LocalStore::in_memory());

        // "docker" exists in the local samples but not on the backend
        let found = store.executors().get_by_id("docker").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_run_while_offline() {
        let store = offline_store();

        let run = store.create_run(request(None)).await.unwrap();
        assert_eq!(run.status, RunStatus::Running);

        let stored = store.runs().get_by_id(&run.id).await.unwrap();
        assert_eq!(stored, Some(run));
    }

    #[tokio::test]
    async fn test_invalid_request_does_not_fall_back() {
        let backend = FakeBackend::start().await;
        let store = HybridStore::new(RemoteStore::new(backend.client()), LocalStore::in_memory());

        let mut req = request(None);
        req.command.clear();
        let err = store.create_run(req).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidRequest(_)));
        assert_eq!(store.local().runs.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fallback_is_decided_per_call() {
        let backend = FakeBackend::start().await;
        backend.insert(&sample_definition("smoke"));
        let store = HybridStore::new(RemoteStore::new(backend.client()), LocalStore::in_memory());

        backend.set_failing(true);
        let offline = store.definitions().list().await.unwrap();
        assert_eq!(offline.len(), 4);

        backend.set_failing(false);
        let online = store.definitions().list().await.unwrap();
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].id, "smoke");
    }

    #[tokio::test]
    async fn test_run_definition_prefers_backend() {
        let backend = FakeBackend::start().await;
        backend.insert(&sample_definition("smoke"));
        let store = HybridStore::new(RemoteStore::new(backend.client()), LocalStore::in_memory());

        let run = store
            .run_definition("smoke", RunOverrides::default())
            .await
            .unwrap();

        assert_eq!(run.name, "Smoke Tests Run");
        assert_eq!(backend.records::<Run>().len(), 1);
        assert_eq!(store.local().runs.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_run_definition_offline_uses_local_definitions() {
        let store = offline_store();

        let run = store
            .run_definition("e2e-tests", RunOverrides::default())
            .await
            .unwrap();
        assert_eq!(run.definition_id.as_deref(), Some("e2e-tests"));

        let err = store
            .run_definition("missing", RunOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DefinitionNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_run_offline_with_unknown_definition() {
        let store = offline_store();

        let err = store
            .create_run(request(Some("missing")))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DefinitionNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_both_sides_failing() {
        let store = HybridStore::new(
            RemoteStore::new(BackendClient::new(UNREACHABLE_URL)),
            LocalStore::new(Arc::new(BrokenMedium)),
        );

        let err = store.executors().list().await.unwrap_err();
        match err {
            StorageError::FallbackFailed { remote, local } => {
                assert!(remote.is_request_failure());
                assert!(local.is_local_failure());
            }
            other => panic!("expected FallbackFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cluster_calls_do_not_fall_back() {
        let store = offline_store();

        let err = store.kubernetes_health().await.unwrap_err();
        assert!(err.is_request_failure());
    }
}

//! Local store
//!
//! Persists each record type as one JSON array under its own key in a
//! [`Medium`]. Every mutation rewrites the whole collection; collections are
//! expected to hold dozens of records, not thousands.
//!
//! The first time a collection is read and its key does not exist yet, the
//! built-in sample records are written and returned, so callers never see an
//! uninitialized collection.

mod medium;
mod samples;

pub use medium::{FileMedium, Medium, MemoryMedium};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, Executor, Run, TestSuite};
use sparktest_core::dto::kubernetes::{JobLogs, KubernetesHealth};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError};
use crate::service::{RecordStore, StorageService, StoreKind};

/// Decodes a persisted collection, treating malformed content as empty
///
/// Corrupt local state must never take the dashboard down. The next write
/// replaces the unreadable value.
pub fn parse_or_empty<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("Discarding unreadable local collection {}: {}", key, e);
            Vec::new()
        }
    }
}

/// One record type's collection in a medium
pub struct LocalRecords<T: Record> {
    medium: Arc<dyn Medium>,
    seed: Arc<Vec<T>>,
    /// Serializes read-modify-write cycles on this collection
    lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for LocalRecords<T> {
    fn clone(&self) -> Self {
        Self {
            medium: Arc::clone(&self.medium),
            seed: Arc::clone(&self.seed),
            lock: Arc::clone(&self.lock),
            _record: PhantomData,
        }
    }
}

impl<T: Record> LocalRecords<T> {
    pub fn new(medium: Arc<dyn Medium>, seed: Vec<T>) -> Self {
        Self {
            medium,
            seed: Arc::new(seed),
            lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    fn key() -> &'static str {
        T::KIND.storage_key()
    }

    /// Writes the sample records if the key does not exist yet
    async fn initialize(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        if self.medium.read(Self::key())?.is_none() {
            self.seed_collection()?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<T>> {
        match self.medium.read(Self::key())? {
            Some(raw) => Ok(parse_or_empty(Self::key(), &raw)),
            None => self.seed_collection(),
        }
    }

    fn seed_collection(&self) -> Result<Vec<T>> {
        info!(
            "Seeding {} with {} sample record(s)",
            Self::key(),
            self.seed.len()
        );
        let records = self.seed.as_ref().clone();
        self.store(&records)?;
        Ok(records)
    }

    fn store(&self, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.medium.write(Self::key(), &raw)?;
        Ok(())
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for LocalRecords<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.load()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let _guard = self.lock.lock().await;
        Ok(self.load()?.into_iter().find(|r| r.id() == id))
    }

    async fn save(&self, record: T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;

        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => records[index] = record.clone(),
            None => records.push(record.clone()),
        }

        if let Some(limit) = T::KIND.retention_limit() {
            if records.len() > limit {
                let excess = records.len() - limit;
                debug!("Dropping {} oldest record(s) from {}", excess, Self::key());
                records.drain(..excess);
            }
        }

        self.store(&records)?;
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() != before {
            self.store(&records)?;
        }
        Ok(())
    }
}

/// Store backed by a local key-value medium
#[derive(Clone)]
pub struct LocalStore {
    pub(crate) executors: LocalRecords<Executor>,
    pub(crate) definitions: LocalRecords<Definition>,
    pub(crate) runs: LocalRecords<Run>,
    pub(crate) suites: LocalRecords<TestSuite>,
}

impl LocalStore {
    /// Creates a store over any medium, seeded with the built-in samples
    pub fn new(medium: Arc<dyn Medium>) -> Self {
        Self {
            executors: LocalRecords::new(Arc::clone(&medium), samples::executors()),
            definitions: LocalRecords::new(Arc::clone(&medium), samples::definitions()),
            runs: LocalRecords::new(Arc::clone(&medium), samples::runs()),
            suites: LocalRecords::new(medium, samples::suites()),
        }
    }

    /// Creates a store that keeps its collections as files in `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileMedium::new(dir)))
    }

    /// Creates a store that lives only as long as the value
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()))
    }
}

#[async_trait]
impl StorageService for LocalStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    async fn initialize(&self) -> Result<()> {
        self.executors.initialize().await?;
        self.definitions.initialize().await?;
        self.runs.initialize().await?;
        self.suites.initialize().await
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

    async fn kubernetes_health(&self) -> Result<KubernetesHealth> {
        Err(StorageError::Unavailable("Kubernetes health".to_string()))
    }

    async fn run_logs(&self, _run_id: &str) -> Result<JobLogs> {
        Err(StorageError::Unavailable("Kubernetes job logs".to_string()))
    }
}

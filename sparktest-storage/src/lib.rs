//! SparkTest Storage
//!
//! The data-access layer of the dashboard. Call sites talk to one
//! [`StorageService`] and never learn which backend answers:
//!
//! - Configuration: [`config::settings`] resolves the backend-selection flag once
//! - Local store: JSON collections in a key-value medium, seeded with samples
//! - Remote store: the backend HTTP API, no cache
//! - Hybrid store: remote first, local fallback per call
//! - Facade: [`storage`] hands out the process-wide instance
//!
//! ```no_run
//! # async fn example() -> sparktest_storage::Result<()> {
//! use sparktest_core::dto::run::CreateRun;
//!
//! let storage = sparktest_storage::storage();
//! let executors = storage.executors().list().await?;
//!
//! let run = storage
//!     .create_run(CreateRun {
//!         name: "smoke".to_string(),
//!         image: "alpine".to_string(),
//!         command: vec!["echo hi".to_string()],
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod hybrid;
pub mod local;
pub mod remote;
pub mod service;
pub mod watch;

#[cfg(test)]
mod test_support;

pub use error::{Result, StorageError};
pub use facade::{create_storage, storage};
pub use hybrid::HybridStore;
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use service::{RecordStore, StorageService, StoreKind};

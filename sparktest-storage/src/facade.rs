//! Storage facade
//!
//! The one place that decides which backend serves the process. The choice
//! follows [`Settings::use_remote_api`] and is made on first access.

use std::sync::{Arc, LazyLock};

use sparktest_client::BackendClient;
use tracing::info;

use crate::config::{Settings, settings};
use crate::hybrid::HybridStore;
use crate::local::LocalStore;
use crate::remote::RemoteStore;
use crate::service::StorageService;

static STORAGE: LazyLock<Arc<dyn StorageService>> = LazyLock::new(|| create_storage(settings()));

/// Builds a fresh storage service for the given settings
///
/// - `use_remote_api == false`: local store in `data_dir`
/// - `use_remote_api == true`: hybrid store over `api_base_url`, falling back
///   to the local store in `data_dir`
pub fn create_storage(settings: &Settings) -> Arc<dyn StorageService> {
    let local = LocalStore::open(&settings.data_dir);

    if !settings.use_remote_api {
        info!("Using local storage in {}", settings.data_dir.display());
        return Arc::new(local);
    }

    info!(
        "Using backend API at {} with local fallback in {}",
        settings.api_base_url,
        settings.data_dir.display()
    );
    let remote = RemoteStore::new(BackendClient::new(settings.api_base_url.clone()));
    Arc::new(HybridStore::new(remote, local))
}

/// Returns the process-wide storage service
///
/// Every call returns a handle to the same instance.
pub fn storage() -> Arc<dyn StorageService> {
    Arc::clone(&STORAGE)
}

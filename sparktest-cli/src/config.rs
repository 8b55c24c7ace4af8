//! Configuration module
//!
//! Combines the storage settings from the environment with command-line
//! overrides.

use sparktest_storage::config::{Settings, settings};
use sparktest_storage::{StorageService, create_storage, storage};
use std::path::PathBuf;
use std::sync::Arc;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,

    /// Whether any flag changed the environment settings
    overridden: bool,
}

impl Config {
    pub fn new(api_url: Option<String>, data_dir: Option<PathBuf>, local: bool) -> Self {
        Self::with_base(settings().clone(), api_url, data_dir, local)
    }

    fn with_base(
        mut settings: Settings,
        api_url: Option<String>,
        data_dir: Option<PathBuf>,
        local: bool,
    ) -> Self {
        let overridden = api_url.is_some() || data_dir.is_some() || local;

        if let Some(url) = api_url {
            settings.use_remote_api = true;
            settings.api_base_url = url;
        }
        if let Some(dir) = data_dir {
            settings.data_dir = dir;
        }
        if local {
            settings.use_remote_api = false;
        }

        Self {
            settings,
            overridden,
        }
    }

    /// The storage service for this invocation
    ///
    /// Without overrides this is the process-wide facade instance.
    pub fn storage(&self) -> Arc<dyn StorageService> {
        if self.overridden {
            create_storage(&self.settings)
        } else {
            storage()
        }
    }
}

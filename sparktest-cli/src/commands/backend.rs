//! Backend command handlers

use anyhow::Result;
use colored::*;
use sparktest_storage::{StorageService, StoreKind};

use crate::config::Config;

/// Print the selected backend and where it keeps data
pub fn show_backend(storage: &dyn StorageService, config: &Config) -> Result<()> {
    let settings = &config.settings;

    println!("{}", "Storage:".bold());
    println!("  Backend:    {}", storage.kind().to_string().cyan());
    if storage.kind() != StoreKind::Local {
        println!("  API URL:    {}", settings.api_base_url);
    }
    println!("  Local data: {}", settings.data_dir.display());

    Ok(())
}

/// Seed the local collections that do not exist yet
pub async fn initialize(storage: &dyn StorageService) -> Result<()> {
    storage.initialize().await?;
    println!("{}", "✓ Storage initialized".green().bold());
    Ok(())
}

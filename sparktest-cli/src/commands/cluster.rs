//! Cluster command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use sparktest_storage::StorageService;

use super::format_time;

/// Cluster subcommands
#[derive(Subcommand)]
pub enum ClusterCommands {
    /// Check whether the backend can reach Kubernetes
    Health,
}

pub async fn handle_cluster_command(
    command: ClusterCommands,
    storage: &dyn StorageService,
) -> Result<()> {
    match command {
        ClusterCommands::Health => health(storage).await,
    }
}

async fn health(storage: &dyn StorageService) -> Result<()> {
    let health = storage.kubernetes_health().await?;

    let connected = if health.kubernetes_connected {
        "✓ connected".green()
    } else {
        "✗ disconnected".red()
    };

    println!("{}", "Kubernetes:".bold());
    println!("  Status:  {}", connected);
    println!("  Checked: {}", format_time(&health.timestamp).dimmed());
    if let Some(error) = &health.error {
        println!("  Error:   {}", error.red());
    }

    Ok(())
}

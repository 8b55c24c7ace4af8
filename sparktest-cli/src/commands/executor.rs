//! Executor command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use sparktest_core::domain::Executor;
use sparktest_storage::StorageService;

use super::format_time;
use crate::id_resolver::resolve_id;

/// Executor subcommands
#[derive(Subcommand)]
pub enum ExecutorCommands {
    /// List all executors
    List,
    /// Get executor details
    Get {
        /// Executor ID or unambiguous prefix
        id: String,
    },
    /// Delete an executor
    Delete {
        /// Executor ID or unambiguous prefix
        id: String,
    },
}

pub async fn handle_executor_command(
    command: ExecutorCommands,
    storage: &dyn StorageService,
) -> Result<()> {
    match command {
        ExecutorCommands::List => list_executors(storage).await,
        ExecutorCommands::Get { id } => get_executor(storage, &id).await,
        ExecutorCommands::Delete { id } => delete_executor(storage, &id).await,
    }
}

async fn list_executors(storage: &dyn StorageService) -> Result<()> {
    let executors = storage.executors().list().await?;

    if executors.is_empty() {
        println!("{}", "No executors found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} executor(s):", executors.len()).bold()
        );
        println!();
        for executor in executors {
            println!("  {} {}", "▸".cyan(), executor.name.bold());
            println!("    ID:    {}", executor.id.dimmed());
            println!("    Image: {}", executor.image.dimmed());
            println!();
        }
    }

    Ok(())
}

async fn get_executor(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.executors(), id).await?;

    match storage.executors().get_by_id(&id).await? {
        Some(executor) => print_executor_details(&executor),
        None => println!("{}", format!("Executor {} not found.", id).yellow()),
    }

    Ok(())
}

async fn delete_executor(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.executors(), id).await?;

    storage.executors().delete(&id).await?;

    println!(
        "{}",
        format!("✓ Executor {} deleted successfully!", id)
            .green()
            .bold()
    );

    Ok(())
}

fn print_executor_details(executor: &Executor) {
    println!("{}", "Executor Details:".bold());
    println!("  ID:          {}", executor.id.cyan());
    println!("  Name:        {}", executor.name.bold());
    if !executor.description.is_empty() {
        println!("  Description: {}", executor.description);
    }
    println!("  Image:       {}", executor.image);
    println!("  Command:     {}", executor.command.join(" "));
    println!("  Created:     {}", format_time(&executor.created_at));
    if !executor.supported_file_types.is_empty() {
        println!(
            "  File Types:  {}",
            executor.supported_file_types.join(", ")
        );
    }

    if !executor.env.is_empty() {
        println!("\n{}", "Environment:".bold());
        for (key, value) in &executor.env {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

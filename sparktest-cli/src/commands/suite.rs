//! Test suite command handlers
//!
//! Listing, viewing and deleting suites, and launching every definition of a
//! suite in order.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use sparktest_core::domain::TestSuite;
use sparktest_core::dto::run::RunOverrides;
use sparktest_storage::StorageService;

use super::format_time;
use super::run::print_run_created;
use crate::id_resolver::resolve_id;

/// Suite subcommands
#[derive(Subcommand)]
pub enum SuiteCommands {
    /// List all test suites
    List,
    /// Get suite details
    Get {
        /// Suite ID or unambiguous prefix
        id: String,
    },
    /// Delete a suite
    Delete {
        /// Suite ID or unambiguous prefix
        id: String,
    },
    /// Start one run per definition of the suite
    Launch {
        /// Suite ID or unambiguous prefix
        id: String,
    },
}

pub async fn handle_suite_command(
    command: SuiteCommands,
    storage: &dyn StorageService,
) -> Result<()> {
    match command {
        SuiteCommands::List => list_suites(storage).await,
        SuiteCommands::Get { id } => get_suite(storage, &id).await,
        SuiteCommands::Delete { id } => delete_suite(storage, &id).await,
        SuiteCommands::Launch { id } => launch_suite(storage, &id).await,
    }
}

async fn list_suites(storage: &dyn StorageService) -> Result<()> {
    let suites = storage.suites().list().await?;

    if suites.is_empty() {
        println!("{}", "No test suites found.".yellow());
    } else {
        println!("{}", format!("Found {} suite(s):", suites.len()).bold());
        println!();
        for suite in suites {
            println!("  {} {}", "▸".cyan(), suite.name.bold());
            println!("    ID:          {}", suite.id.dimmed());
            println!(
                "    Definitions: {} ({})",
                suite.test_definition_ids.len(),
                suite.execution_mode.to_string().dimmed()
            );
            println!();
        }
    }

    Ok(())
}

async fn get_suite(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.suites(), id).await?;

    match storage.suites().get_by_id(&id).await? {
        Some(suite) => print_suite_details(&suite),
        None => println!("{}", format!("Suite {} not found.", id).yellow()),
    }

    Ok(())
}

async fn delete_suite(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.suites(), id).await?;

    storage.suites().delete(&id).await?;

    println!(
        "{}",
        format!("✓ Suite {} deleted successfully!", id).green().bold()
    );

    Ok(())
}

async fn launch_suite(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.suites(), id).await?;
    let Some(suite) = storage.suites().get_by_id(&id).await? else {
        println!("{}", format!("Suite {} not found.", id).yellow());
        return Ok(());
    };

    println!(
        "{}",
        format!(
            "Launching {} definition(s) of {}:",
            suite.test_definition_ids.len(),
            suite.name
        )
        .bold()
    );

    for definition_id in &suite.test_definition_ids {
        let run = storage
            .run_definition(definition_id, RunOverrides::default())
            .await?;
        println!();
        print_run_created(&run);
    }

    Ok(())
}

fn print_suite_details(suite: &TestSuite) {
    println!("{}", "Suite Details:".bold());
    println!("  ID:          {}", suite.id.cyan());
    println!("  Name:        {}", suite.name.bold());
    if !suite.description.is_empty() {
        println!("  Description: {}", suite.description);
    }
    println!("  Mode:        {}", suite.execution_mode);
    println!("  Created:     {}", format_time(&suite.created_at));
    if !suite.labels.is_empty() {
        println!("  Labels:      {}", suite.labels.join(", "));
    }

    println!("\n{}", "Definitions:".bold());
    for definition_id in &suite.test_definition_ids {
        println!("  - {}", definition_id);
    }
}

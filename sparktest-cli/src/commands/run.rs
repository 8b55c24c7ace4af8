//! Run command handlers
//!
//! Handles all run-related CLI commands including creation, listing,
//! viewing details, logs and following the run list.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use sparktest_core::domain::{Run, RunStatus};
use sparktest_core::dto::run::CreateRun;
use sparktest_storage::StorageService;
use sparktest_storage::watch::{ChangeEvent, ChangeTracker};
use std::time::Duration;

use super::format_time;
use crate::id_resolver::resolve_id;

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// List all runs
    List,
    /// Get run details
    Get {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Start a run from an image and commands
    Create {
        /// Run name
        #[arg(short, long)]
        name: String,

        /// Container image
        #[arg(short, long)]
        image: String,

        /// Command to execute (repeatable)
        #[arg(short, long = "command", required = true)]
        commands: Vec<String>,

        /// Definition the run belongs to
        #[arg(short, long)]
        definition: Option<String>,
    },
    /// Delete a run
    Delete {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Show the Kubernetes job logs of a run
    Logs {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Follow changes to the run list
    Watch {
        /// Seconds between polls
        #[arg(short, long, default_value = "5")]
        interval: u64,
    },
}

/// Handle run commands
///
/// # Arguments
/// * `command` - The run command to execute
/// * `storage` - The storage service to act on
pub async fn handle_run_command(command: RunCommands, storage: &dyn StorageService) -> Result<()> {
    match command {
        RunCommands::List => list_runs(storage).await,
        RunCommands::Get { id } => get_run(storage, &id).await,
        RunCommands::Create {
            name,
            image,
            commands,
            definition,
        } => {
            let req = CreateRun {
                name,
                image,
                command: commands,
                definition_id: definition,
                ..Default::default()
            };
            create_run(storage, req).await
        }
        RunCommands::Delete { id } => delete_run(storage, &id).await,
        RunCommands::Logs { id } => show_logs(storage, &id).await,
        RunCommands::Watch { interval } => watch_runs(storage, interval).await,
    }
}

async fn list_runs(storage: &dyn StorageService) -> Result<()> {
    let runs = storage.runs().list().await?;

    if runs.is_empty() {
        println!("{}", "No runs found.".yellow());
    } else {
        println!("{}", format!("Found {} run(s):", runs.len()).bold());
        println!();
        for run in runs {
            print_run_summary(&run);
        }
    }

    Ok(())
}

async fn get_run(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.runs(), id).await?;

    match storage.runs().get_by_id(&id).await? {
        Some(run) => print_run_details(&run),
        None => println!("{}", format!("Run {} not found.", id).yellow()),
    }

    Ok(())
}

async fn create_run(storage: &dyn StorageService, req: CreateRun) -> Result<()> {
    let run = storage.create_run(req).await?;

    println!("{}", "✓ Run started!".green().bold());
    print_run_created(&run);

    Ok(())
}

async fn delete_run(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.runs(), id).await?;

    storage.runs().delete(&id).await?;

    println!(
        "{}",
        format!("✓ Run {} deleted successfully!", id).green().bold()
    );

    Ok(())
}

async fn show_logs(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.runs(), id).await?;
    let logs = storage.run_logs(&id).await?;

    println!(
        "{}",
        format!("Logs for job {} (pod {}):", logs.job_name, logs.pod_name).bold()
    );
    if let Some(status) = &logs.status {
        println!("  Status: {}", status.dimmed());
    }
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", logs.logs);
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}

/// Print run changes until interrupted
async fn watch_runs(storage: &dyn StorageService, interval: u64) -> Result<()> {
    let runs = storage.runs().list().await?;
    println!(
        "{}",
        format!("Watching {} run(s), Ctrl-C to stop", runs.len()).bold()
    );

    let mut tracker =
        ChangeTracker::with_baseline(runs).with_interval(Duration::from_secs(interval.max(1)));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            events = tracker.next(storage.runs()) => {
                for event in events? {
                    print_change(&event);
                }
            }
        }
    }

    Ok(())
}

fn print_change(event: &ChangeEvent<Run>) {
    match event {
        ChangeEvent::Inserted(run) => {
            println!(
                "{} {} {} ({})",
                "+".green(),
                run.id.dimmed(),
                run.name,
                colorize_status(&run.status)
            );
        }
        ChangeEvent::Updated { old, new } if old.status != new.status => {
            println!(
                "{} {} {} {} → {}",
                "~".yellow(),
                new.id.dimmed(),
                new.name,
                colorize_status(&old.status),
                colorize_status(&new.status)
            );
        }
        ChangeEvent::Updated { new, .. } => {
            println!("{} {} {}", "~".yellow(), new.id.dimmed(), new.name);
        }
        ChangeEvent::Deleted(run) => {
            println!("{} {} {}", "-".red(), run.id.dimmed(), run.name);
        }
    }
}

/// Print the short confirmation shown after a run is created
pub(super) fn print_run_created(run: &Run) {
    println!("  Run ID:  {}", run.id.cyan());
    println!("  Name:    {}", run.name.bold());
    println!("  Status:  {}", colorize_status(&run.status));
    println!("  Started: {}", format_time(&run.created_at));
    if let Some(definition) = &run.definition_id {
        println!("  From:    {}", definition.dimmed());
    }
}

fn print_run_summary(run: &Run) {
    println!("  {} {}", "▸".cyan(), run.name.bold());
    println!("    ID:      {}", run.id.dimmed());
    println!("    Status:  {}", colorize_status(&run.status));
    println!("    Created: {}", format_time(&run.created_at).dimmed());
    if let Some(duration) = run.duration {
        println!("    Duration: {}", format_duration(duration).dimmed());
    }
    println!();
}

fn print_run_details(run: &Run) {
    println!("{}", "Run Details:".bold());
    println!("  ID:         {}", run.id.cyan());
    println!("  Name:       {}", run.name.bold());
    println!("  Status:     {}", colorize_status(&run.status));
    println!("  Image:      {}", run.image);
    println!("  Created:    {}", format_time(&run.created_at));
    if let Some(duration) = run.duration {
        println!("  Duration:   {}", format_duration(duration));
    }
    if let Some(definition) = &run.definition_id {
        println!("  Definition: {}", definition);
    }
    if let Some(executor) = &run.executor_id {
        println!("  Executor:   {}", executor);
    }
    println!("  Job:        {}", run.job_name().dimmed());

    println!("\n{}", "Commands:".bold());
    for command in &run.command {
        println!("  $ {}", command);
    }

    if !run.variables.is_empty() {
        println!("\n{}", "Variables:".bold());
        for (key, value) in &run.variables {
            println!("  {} = {}", key.cyan(), value);
        }
    }

    if !run.artifacts.is_empty() {
        println!("\n{}", "Artifacts:".bold());
        for artifact in &run.artifacts {
            println!("  - {}", artifact);
        }
    }

    if !run.logs.is_empty() {
        println!("\n{}", "Logs:".bold());
        println!("{}", "─".repeat(80).dimmed());
        for line in &run.logs {
            println!("{}", line);
        }
        println!("{}", "─".repeat(80).dimmed());
    }
}

/// Durations are stored in milliseconds
fn format_duration(millis: u64) -> String {
    let seconds = millis / 1000;
    if seconds >= 60 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

fn colorize_status(status: &RunStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        RunStatus::Pending => status_str.yellow(),
        RunStatus::Running => status_str.cyan(),
        RunStatus::Succeeded => status_str.green(),
        RunStatus::Failed => status_str.red(),
    }
}

//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod backend;
mod cluster;
mod definition;
mod executor;
mod run;
mod suite;

pub use cluster::ClusterCommands;
pub use definition::DefinitionCommands;
pub use executor::ExecutorCommands;
pub use run::RunCommands;
pub use suite::SuiteCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Test definition management
    Definition {
        #[command(subcommand)]
        command: DefinitionCommands,
    },
    /// Test run management
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Executor management
    Executor {
        #[command(subcommand)]
        command: ExecutorCommands,
    },
    /// Test suite management
    Suite {
        #[command(subcommand)]
        command: SuiteCommands,
    },
    /// Kubernetes cluster status
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Show which storage backend is in use
    Backend,
    /// Seed empty local collections with the sample records
    Init,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let storage = config.storage();
    let storage = storage.as_ref();

    match command {
        Commands::Definition { command } => {
            definition::handle_definition_command(command, storage).await
        }
        Commands::Run { command } => run::handle_run_command(command, storage).await,
        Commands::Executor { command } => executor::handle_executor_command(command, storage).await,
        Commands::Suite { command } => suite::handle_suite_command(command, storage).await,
        Commands::Cluster { command } => cluster::handle_cluster_command(command, storage).await,
        Commands::Backend => backend::show_backend(storage, config),
        Commands::Init => backend::initialize(storage).await,
    }
}

/// Format a timestamp the way every command prints it
fn format_time(time: &chrono::DateTime<chrono::Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

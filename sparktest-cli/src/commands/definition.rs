//! Definition command handlers
//!
//! Handles all definition-related CLI commands including creation,
//! listing, viewing, deletion, and launching runs.

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use colored::*;
use sparktest_core::domain::Definition;
use sparktest_core::dto::run::RunOverrides;
use sparktest_storage::StorageService;
use std::collections::BTreeMap;

use super::format_time;
use super::run::print_run_created;
use crate::id_resolver::resolve_id;

/// Definition subcommands
#[derive(Subcommand)]
pub enum DefinitionCommands {
    /// Create or replace a definition
    Create {
        /// Definition name
        #[arg(short, long)]
        name: String,

        /// Container image
        #[arg(short, long)]
        image: String,

        /// Command to execute (repeatable)
        #[arg(short, long = "command", required = true)]
        commands: Vec<String>,

        /// Definition ID (defaults to the name in kebab-case)
        #[arg(long)]
        id: Option<String>,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Executor that runs the definition
        #[arg(short, long)]
        executor: Option<String>,

        /// Variables as key=value pairs
        #[arg(long = "var", value_parser = parse_key_val)]
        variables: Vec<(String, String)>,

        /// Labels (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,
    },
    /// List all definitions
    List,
    /// Get definition details
    Get {
        /// Definition ID or unambiguous prefix
        id: String,
    },
    /// Delete a definition
    Delete {
        /// Definition ID or unambiguous prefix
        id: String,
    },
    /// Start a run from a definition
    Launch {
        /// Definition ID or unambiguous prefix
        id: String,

        /// Override the run name
        #[arg(short, long)]
        name: Option<String>,

        /// Override the image
        #[arg(short, long)]
        image: Option<String>,

        /// Override the commands (repeatable)
        #[arg(short, long = "command")]
        commands: Vec<String>,
    },
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Derive a definition id from its name ("API Tests v2" -> "api-tests-v2")
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Handle definition commands
///
/// # Arguments
/// * `command` - The definition command to execute
/// * `storage` - The storage service to act on
pub async fn handle_definition_command(
    command: DefinitionCommands,
    storage: &dyn StorageService,
) -> Result<()> {
    match command {
        DefinitionCommands::Create {
            name,
            image,
            commands,
            id,
            description,
            executor,
            variables,
            labels,
        } => {
            let id = id.unwrap_or_else(|| slugify(&name));
            if id.is_empty() {
                bail!("Cannot derive an ID from name '{}', pass --id", name);
            }

            let definition = Definition {
                id,
                name,
                description,
                image,
                commands,
                created_at: Utc::now(),
                source: None,
                executor_id: executor,
                variables: variables.into_iter().collect::<BTreeMap<_, _>>(),
                labels,
            };
            create_definition(storage, definition).await
        }
        DefinitionCommands::List => list_definitions(storage).await,
        DefinitionCommands::Get { id } => get_definition(storage, &id).await,
        DefinitionCommands::Delete { id } => delete_definition(storage, &id).await,
        DefinitionCommands::Launch {
            id,
            name,
            image,
            commands,
        } => {
            let overrides = RunOverrides {
                name,
                image,
                commands: (!commands.is_empty()).then_some(commands),
            };
            launch_run(storage, &id, overrides).await
        }
    }
}

async fn create_definition(storage: &dyn StorageService, definition: Definition) -> Result<()> {
    let definition = storage.definitions().save(definition).await?;

    println!("{}", "✓ Definition saved!".green().bold());
    println!("  ID:    {}", definition.id.cyan());
    println!("  Name:  {}", definition.name.bold());
    println!("  Image: {}", definition.image.dimmed());

    Ok(())
}

async fn list_definitions(storage: &dyn StorageService) -> Result<()> {
    let definitions = storage.definitions().list().await?;

    if definitions.is_empty() {
        println!("{}", "No definitions found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} definition(s):", definitions.len()).bold()
        );
        println!();
        for definition in definitions {
            print_definition_summary(&definition);
        }
    }

    Ok(())
}

async fn get_definition(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.definitions(), id).await?;

    match storage.definitions().get_by_id(&id).await? {
        Some(definition) => print_definition_details(&definition),
        None => println!("{}", format!("Definition {} not found.", id).yellow()),
    }

    Ok(())
}

async fn delete_definition(storage: &dyn StorageService, id: &str) -> Result<()> {
    let id = resolve_id(storage.definitions(), id).await?;

    storage.definitions().delete(&id).await?;

    println!(
        "{}",
        format!("✓ Definition {} deleted successfully!", id)
            .green()
            .bold()
    );

    Ok(())
}

async fn launch_run(storage: &dyn StorageService, id: &str, overrides: RunOverrides) -> Result<()> {
    let id = resolve_id(storage.definitions(), id).await?;
    let run = storage.run_definition(&id, overrides).await?;

    println!("{}", "✓ Run launched!".green().bold());
    print_run_created(&run);

    Ok(())
}

fn print_definition_summary(definition: &Definition) {
    println!("  {} {}", "▸".cyan(), definition.name.bold());
    println!("    ID:      {}", definition.id.dimmed());
    println!(
        "    Created: {}",
        format_time(&definition.created_at).dimmed()
    );
    if !definition.description.is_empty() {
        println!("    Description: {}", definition.description.dimmed());
    }
    if !definition.labels.is_empty() {
        println!("    Labels:  {}", definition.labels.join(", ").dimmed());
    }
    println!();
}

fn print_definition_details(definition: &Definition) {
    println!("{}", "Definition Details:".bold());
    println!("  ID:          {}", definition.id.cyan());
    println!("  Name:        {}", definition.name.bold());
    if !definition.description.is_empty() {
        println!("  Description: {}", definition.description);
    }
    println!("  Image:       {}", definition.image);
    println!("  Created:     {}", format_time(&definition.created_at));
    if let Some(executor) = &definition.executor_id {
        println!("  Executor:    {}", executor);
    }
    if let Some(source) = &definition.source {
        println!("  Source:      {}", source);
    }
    if !definition.labels.is_empty() {
        println!("  Labels:      {}", definition.labels.join(", "));
    }

    println!("\n{}", "Commands:".bold());
    for command in &definition.commands {
        println!("  $ {}", command);
    }

    if !definition.variables.is_empty() {
        println!("\n{}", "Variables:".bold());
        for (key, value) in &definition.variables {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("API Tests v2"), "api-tests-v2");
        assert_eq!(slugify("  E2E -- Checkout  "), "e2e-checkout");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("BASE_URL=https://a.example/?x=1").unwrap(),
            ("BASE_URL".to_string(), "https://a.example/?x=1".to_string())
        );
        assert!(parse_key_val("NO_VALUE").is_err());
    }
}

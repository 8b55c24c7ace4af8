//! Run DTOs
//!
//! Requests the dashboard issues to start a run, either from explicit fields
//! or from an existing definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::definition::Definition;
use crate::domain::run::{Run, RunStatus};

/// First log line of every freshly created run
pub const RUN_STARTED_LOG: &str = "> Starting test...";

/// Request to create a new run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRun {
    pub name: String,
    pub image: String,
    #[serde(alias = "commands")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl CreateRun {
    /// Checks the fields a run cannot be scheduled without
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("run name cannot be empty".to_string());
        }
        if self.image.trim().is_empty() {
            return Err("run image cannot be empty".to_string());
        }
        if self.command.is_empty() {
            return Err("run needs at least one command".to_string());
        }
        Ok(())
    }

    /// Builds a run from a definition, applying any overrides
    ///
    /// The executor and variables always come from the definition.
    pub fn from_definition(definition: &Definition, overrides: RunOverrides) -> Self {
        Self {
            name: overrides
                .name
                .unwrap_or_else(|| format!("{} Run", definition.name)),
            image: overrides.image.unwrap_or_else(|| definition.image.clone()),
            command: overrides
                .commands
                .unwrap_or_else(|| definition.commands.clone()),
            definition_id: Some(definition.id.clone()),
            executor_id: definition.executor_id.clone(),
            variables: definition.variables.clone(),
        }
    }

    /// Materializes the request into a new running record
    ///
    /// The id is a fresh UUID and the creation time is now.
    pub fn into_run(self) -> Run {
        Run {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            image: self.image,
            command: self.command,
            status: RunStatus::Running,
            created_at: chrono::Utc::now(),
            definition_id: self.definition_id,
            executor_id: self.executor_id,
            suite_id: None,
            variables: self.variables,
            artifacts: Vec::new(),
            duration: None,
            logs: vec![RUN_STARTED_LOG.to_string()],
            k8s_job_name: None,
        }
    }
}

/// Optional overrides when launching a run from a definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> Definition {
        Definition {
            id: "e2e-tests".to_string(),
            name: "End-to-End Tests".to_string(),
            description: String::new(),
            image: "mcr.microsoft.com/playwright:v1.40.0-focal".to_string(),
            commands: vec!["npm install".to_string(), "npm run test:e2e".to_string()],
            created_at: chrono::Utc::now(),
            source: None,
            executor_id: Some("kubernetes".to_string()),
            variables: BTreeMap::from([(
                "BASE_URL".to_string(),
                "https://staging.example.com".to_string(),
            )]),
            labels: vec![],
        }
    }

    #[test]
    fn test_validate() {
        let mut req = CreateRun {
            name: "t".to_string(),
            image: "alpine".to_string(),
            command: vec!["echo hi".to_string()],
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        req.command.clear();
        assert!(req.validate().is_err());

        req.command.push("echo hi".to_string());
        req.image = "  ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_run() {
        let run = CreateRun {
            name: "t".to_string(),
            image: "alpine".to_string(),
            command: vec!["echo hi".to_string()],
            ..Default::default()
        }
        .into_run();

        assert_eq!(run.status, RunStatus::Running);
        assert!(uuid::Uuid::parse_str(&run.id).is_ok());
        assert_eq!(run.logs, vec![RUN_STARTED_LOG.to_string()]);
    }

    #[test]
    fn test_from_definition_defaults() {
        let req = CreateRun::from_definition(&definition(), RunOverrides::default());
        assert_eq!(req.name, "End-to-End Tests Run");
        assert_eq!(req.image, "mcr.microsoft.com/playwright:v1.40.0-focal");
        assert_eq!(req.command.len(), 2);
        assert_eq!(req.definition_id.as_deref(), Some("e2e-tests"));
    }

    #[test]
    fn test_from_definition_carries_executor_and_variables() {
        let run = CreateRun::from_definition(&definition(), RunOverrides::default()).into_run();

        assert_eq!(run.executor_id.as_deref(), Some("kubernetes"));
        assert_eq!(
            run.variables.get("BASE_URL").map(String::as_str),
            Some("https://staging.example.com")
        );
    }

    #[test]
    fn test_from_definition_overrides() {
        let req = CreateRun::from_definition(
            &definition(),
            RunOverrides {
                name: Some("Nightly".to_string()),
                image: None,
                commands: Some(vec!["npm run test:smoke".to_string()]),
            },
        );
        assert_eq!(req.name, "Nightly");
        assert_eq!(req.command, vec!["npm run test:smoke"]);
    }
}

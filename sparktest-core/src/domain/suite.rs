//! Test suite domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};

/// A named grouping of definitions intended to be run together
///
/// The definition ids are plain references: they may point at definitions
/// that were deleted since. Resolving them is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "test_definition_ids")]
    pub test_definition_ids: Vec<String>,
    #[serde(default, alias = "execution_mode")]
    pub execution_mode: ExecutionMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// How the definitions of a suite are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Parallel => write!(f, "parallel"),
        }
    }
}

impl Record for TestSuite {
    const KIND: RecordKind = RecordKind::TestSuite;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_mode_defaults_to_sequential() {
        let json = r#"{
            "id": "api-test-suite",
            "name": "API Test Suite",
            "test_definition_ids": ["api-integration-tests"],
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let suite: TestSuite = serde_json::from_str(json).unwrap();
        assert_eq!(suite.execution_mode, ExecutionMode::Sequential);
        assert_eq!(suite.test_definition_ids, vec!["api-integration-tests"]);
    }
}

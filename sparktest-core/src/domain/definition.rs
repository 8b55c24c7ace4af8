//! Test definition domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::{Record, RecordKind};

/// A named, reusable specification of a containerized test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    /// Commands run inside the container, in order
    #[serde(alias = "command")]
    pub commands: Vec<String>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    /// Provenance URI (e.g. the repository file the definition came from)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, alias = "executor_id", skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Record for Definition {
    const KIND: RecordKind = RecordKind::Definition;

    fn id(&self) -> &str {
        &self.id
    }
}

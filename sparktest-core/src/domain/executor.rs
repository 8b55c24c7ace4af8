//! Executor domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::{Record, RecordKind};

/// A reusable container-image/command template not tied to a specific test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default, alias = "supported_file_types")]
    pub supported_file_types: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Record for Executor {
    const KIND: RecordKind = RecordKind::Executor;

    fn id(&self) -> &str {
        &self.id
    }
}

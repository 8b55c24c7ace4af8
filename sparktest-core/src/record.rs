//! Record abstraction
//!
//! Every entity the dashboard persists is a flat, serializable record keyed by
//! a string id. `RecordKind` names where each type lives, both in the local
//! key-value medium and on the backend API.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// The four entity types handled by the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Definition,
    Run,
    Executor,
    TestSuite,
}

impl RecordKind {
    /// Key under which the collection is stored in the local medium
    pub fn storage_key(self) -> &'static str {
        match self {
            RecordKind::Definition => "sparktest_definitions",
            RecordKind::Run => "sparktest_runs",
            RecordKind::Executor => "sparktest_executors",
            RecordKind::TestSuite => "sparktest_test_suites",
        }
    }

    /// Collection path on the backend API
    pub fn api_path(self) -> &'static str {
        match self {
            RecordKind::Definition => "/api/test-definitions",
            RecordKind::Run => "/api/test-runs",
            RecordKind::Executor => "/api/executors",
            RecordKind::TestSuite => "/api/test-suites",
        }
    }

    /// Upper bound on locally retained records, if any
    pub fn retention_limit(self) -> Option<usize> {
        match self {
            RecordKind::Run => Some(50),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Definition => write!(f, "definition"),
            RecordKind::Run => write!(f, "run"),
            RecordKind::Executor => write!(f, "executor"),
            RecordKind::TestSuite => write!(f, "test suite"),
        }
    }
}

/// A persisted entity
///
/// Implemented by every domain type the storage layer handles. The id is the
/// only field the stores look at; everything else is opaque payload.
pub trait Record:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
    const KIND: RecordKind;

    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        let kinds = [
            RecordKind::Definition,
            RecordKind::Run,
            RecordKind::Executor,
            RecordKind::TestSuite,
        ];
        let mut keys: Vec<_> = kinds.iter().map(|k| k.storage_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), kinds.len());
    }

    #[test]
    fn test_api_paths() {
        assert_eq!(RecordKind::Definition.api_path(), "/api/test-definitions");
        assert_eq!(RecordKind::Run.api_path(), "/api/test-runs");
        assert_eq!(RecordKind::TestSuite.api_path(), "/api/test-suites");
        assert_eq!(RecordKind::Executor.api_path(), "/api/executors");
    }

    #[test]
    fn test_only_runs_are_capped() {
        assert_eq!(RecordKind::Run.retention_limit(), Some(50));
        assert_eq!(RecordKind::Definition.retention_limit(), None);
        assert_eq!(RecordKind::Executor.retention_limit(), None);
    }
}

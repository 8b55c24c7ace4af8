//! ID resolver module
//!
//! Lets users type a short, unambiguous prefix instead of a full record id.

use anyhow::{Context, Result, anyhow};
use sparktest_core::Record;
use sparktest_storage::RecordStore;

/// Resolve an id or id prefix to the id of a stored record
///
/// An exact match wins. Otherwise the input must be the prefix of exactly one
/// id (case-insensitive).
///
/// # Errors
/// Returns an error if:
/// - No record matches
/// - Several records match the prefix
/// - The store fails
pub async fn resolve_id<T: Record>(store: &dyn RecordStore<T>, input: &str) -> Result<String> {
    if store.get_by_id(input).await?.is_some() {
        return Ok(input.to_string());
    }

    let records = store
        .list()
        .await
        .with_context(|| format!("Failed to fetch {} for ID resolution", T::KIND))?;

    match_prefix(records.iter().map(|r| r.id()), input)
        .map_err(|e| anyhow!("{} {}", T::KIND, e))
}

fn match_prefix<'a>(ids: impl Iterator<Item = &'a str>, input: &str) -> Result<String, String> {
    let prefix = input.to_lowercase();
    let matches: Vec<&str> = ids
        .filter(|id| id.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("not found: no ID starts with '{}'", input)),
        [id] => Ok(id.to_string()),
        _ => Err(format!(
            "prefix '{}' is ambiguous: {}",
            input,
            matches.join(", ")
        )),
    }
}

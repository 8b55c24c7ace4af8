//! Change tracking
//!
//! Turns successive snapshots of a collection into insert/update/delete
//! events, for views that follow a collection (e.g. the run list) without a
//! push channel from the backend. The caller owns the loop; nothing here
//! spawns a task.

use std::collections::HashMap;
use tokio::time::{self, Duration};
use tracing::debug;

use sparktest_core::Record;

use crate::error::Result;
use crate::service::RecordStore;

/// Default delay between two polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// A difference between two snapshots
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent<T> {
    Inserted(T),
    Updated { old: T, new: T },
    Deleted(T),
}

impl<T: Record> ChangeEvent<T> {
    /// Id of the record the event is about
    pub fn id(&self) -> &str {
        match self {
            ChangeEvent::Inserted(record) | ChangeEvent::Deleted(record) => record.id(),
            ChangeEvent::Updated { new, .. } => new.id(),
        }
    }
}

/// Remembers the last snapshot of a collection
pub struct ChangeTracker<T: Record> {
    last: Vec<T>,
    interval: Duration,
}

impl<T: Record> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> ChangeTracker<T> {
    /// Starts from an empty collection, so the first poll reports every record as inserted
    pub fn new() -> Self {
        Self::with_baseline(Vec::new())
    }

    /// Starts from a known snapshot
    pub fn with_baseline(records: Vec<T>) -> Self {
        Self {
            last: records,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records the snapshot and returns what changed since the previous one
    ///
    /// Events come as insertions and updates in the order of `records`,
    /// followed by deletions in the order of the previous snapshot.
    pub fn observe(&mut self, records: Vec<T>) -> Vec<ChangeEvent<T>> {
        let events = diff(&self.last, &records);
        self.last = records;
        events
    }

    /// Lists the store once and diffs it against the previous snapshot
    pub async fn poll(&mut self, store: &dyn RecordStore<T>) -> Result<Vec<ChangeEvent<T>>> {
        let records = store.list().await?;
        let events = self.observe(records);
        if !events.is_empty() {
            debug!("{} change(s) in {}", events.len(), T::KIND);
        }
        Ok(events)
    }

    /// Waits one interval, then polls
    pub async fn next(&mut self, store: &dyn RecordStore<T>) -> Result<Vec<ChangeEvent<T>>> {
        time::sleep(self.interval).await;
        self.poll(store).await
    }

    /// The last snapshot seen
    pub fn snapshot(&self) -> &[T] {
        &self.last
    }
}

fn diff<T: Record>(previous: &[T], current: &[T]) -> Vec<ChangeEvent<T>> {
    let before: HashMap<&str, &T> = previous.iter().map(|r| (r.id(), r)).collect();
    let after: HashMap<&str, &T> = current.iter().map(|r| (r.id(), r)).collect();

    let mut events = Vec::new();

    for record in current {
        match before.get(record.id()) {
            None => events.push(ChangeEvent::Inserted(record.clone())),
            Some(old) if *old != record => events.push(ChangeEvent::Updated {
                old: (*old).clone(),
                new: record.clone(),
            }),
            Some(_) => {}
        }
    }

    for record in previous {
        if !after.contains_key(record.id()) {
            events.push(ChangeEvent::Deleted(record.clone()));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalStore;
    use crate::service::StorageService;
    use sparktest_core::domain::{Run, RunStatus};
    use sparktest_core::dto::run::CreateRun;

    fn run(id: &str, status: RunStatus) -> Run {
        Run {
            id: id.to_string(),
            name: format!("Run {}", id),
            image: "alpine".to_string(),
            command: vec!["echo".to_string()],
            status,
            created_at: chrono::Utc::now(),
            definition_id: None,
            executor_id: None,
            suite_id: None,
            variables: Default::default(),
            artifacts: Vec::new(),
            duration: None,
            logs: Vec::new(),
            k8s_job_name: None,
        }
    }

    #[test]
    fn test_first_snapshot_is_all_inserts() {
        let mut tracker = ChangeTracker::new();
        let events = tracker.observe(vec![
            run("a", RunStatus::Running),
            run("b", RunStatus::Pending),
        ]);

        let ids: Vec<_> = events.iter().map(ChangeEvent::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(events.iter().all(|e| matches!(e, ChangeEvent::Inserted(_))));
    }

    #[test]
    fn test_diff_reports_each_kind() {
        let a = run("a", RunStatus::Running);
        let b = run("b", RunStatus::Running);
        let mut tracker = ChangeTracker::with_baseline(vec![a.clone(), b.clone()]);

        let finished = Run {
            status: RunStatus::Succeeded,
            ..a.clone()
        };
        let c = run("c", RunStatus::Pending);
        let events = tracker.observe(vec![finished.clone(), c.clone()]);

        assert_eq!(
            events,
            vec![
                ChangeEvent::Updated {
                    old: a,
                    new: finished
                },
                ChangeEvent::Inserted(c),
                ChangeEvent::Deleted(b),
            ]
        );
        assert_eq!(tracker.snapshot().len(), 2);
    }

    #[test]
    fn test_unchanged_snapshot_is_quiet() {
        let records = vec![run("a", RunStatus::Running)];
        let mut tracker = ChangeTracker::with_baseline(records.clone());
        assert!(tracker.observe(records).is_empty());
    }

    #[tokio::test]
    async fn test_poll_sees_new_runs() {
        let store = LocalStore::in_memory();
        let mut tracker = ChangeTracker::with_baseline(store.runs().list().await.unwrap());

        assert!(tracker.poll(store.runs()).await.unwrap().is_empty());

        let created = store
            .create_run(CreateRun {
                name: "t".to_string(),
                image: "alpine".to_string(),
                command: vec!["echo hi".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        let mut tracker = tracker.with_interval(Duration::from_millis(1));
        let events = tracker.next(store.runs()).await.unwrap();
        assert_eq!(events, vec![ChangeEvent::Inserted(created)]);
    }

    #[test]
    fn test_default_interval() {
        let tracker: ChangeTracker<Run> = ChangeTracker::new();
        assert_eq!(tracker.interval(), Duration::from_secs(5));
    }
}

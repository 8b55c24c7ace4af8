//! In-process fake of the backend API for tests

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use sparktest_client::BackendClient;
use sparktest_core::Record;
use sparktest_core::domain::{Definition, ExecutionMode, Executor, Run, RunStatus, TestSuite};
use sparktest_core::dto::run::{CreateRun, RunOverrides};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A port nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

#[derive(Default)]
struct Backend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<HashMap<String, usize>>,
    failing: AtomicBool,
}

type Shared = Arc<Backend>;

pub struct FakeBackend {
    url: String,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = Router::new()
            .route("/api/k8s/health", get(health))
            .route("/api/k8s/logs/{job_name}", get(job_logs))
            .route("/api/{collection}", get(list).post(create))
            .route(
                "/api/{collection}/{id}",
                get(fetch).put(update).delete(remove),
            )
            .route("/api/{collection}/{id}/run", post(run_definition))
            .layer(middleware::from_fn_with_state(state.clone(), track))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(self.url.clone())
    }

    pub fn insert<T: Record>(&self, record: &T) {
        let value = serde_json::to_value(record).unwrap();
        self.state
            .collections
            .lock()
            .unwrap()
            .entry(collection_of::<T>())
            .or_default()
            .push(value);
    }

    pub fn records<T: Record>(&self) -> Vec<T> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(&collection_of::<T>())
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Makes every request answer 503 while set
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of requests received with the given method
    pub fn requests(&self, method: &str) -> usize {
        self.state
            .requests
            .lock()
            .unwrap()
            .get(method)
            .copied()
            .unwrap_or(0)
    }
}

pub fn sample_executor(id: &str, name: &str) -> Executor {
    Executor {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        image: "alpine".to_string(),
        command: vec!["sh".to_string()],
        supported_file_types: vec!["sh".to_string()],
        env: Default::default(),
        created_at: chrono::Utc::now(),
    }
}

pub fn sample_definition(id: &str) -> Definition {
    Definition {
        id: id.to_string(),
        name: "Smoke Tests".to_string(),
        description: String::new(),
        image: "alpine".to_string(),
        commands: vec!["echo smoke".to_string()],
        created_at: chrono::Utc::now(),
        source: None,
        executor_id: None,
        variables: Default::default(),
        labels: Vec::new(),
    }
}

pub fn sample_run(id: &str) -> Run {
    Run {
        id: id.to_string(),
        name: "Smoke Run".to_string(),
        image: "alpine".to_string(),
        command: vec!["echo smoke".to_string()],
        status: RunStatus::Running,
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

pub fn sample_suite(id: &str) -> TestSuite {
    TestSuite {
        id: id.to_string(),
        name: "Smoke Suite".to_string(),
        description: String::new(),
        test_definition_ids: vec!["smoke".to_string()],
        execution_mode: ExecutionMode::Parallel,
        labels: Vec::new(),
        created_at: chrono::Utc::now(),
    }
}

/// Saves `record` twice and checks the store holds it exactly once
pub async fn assert_save_is_idempotent<T: Record + std::fmt::Debug>(
    store: &dyn crate::service::RecordStore<T>,
    record: T,
) {
    store.save(record.clone()).await.unwrap();
    store.save(record.clone()).await.unwrap();

    let matching = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.id() == record.id())
        .count();
    assert_eq!(matching, 1, "{} {} stored {} times", T::KIND, record.id(), matching);
    assert_eq!(store.get_by_id(record.id()).await.unwrap(), Some(record));
}

fn collection_of<T: Record>() -> String {
    T::KIND.api_path().trim_start_matches("/api/").to_string()
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

async fn track(State(state): State<Shared>, request: Request, next: Next) -> Response {
    *state
        .requests
        .lock()
        .unwrap()
        .entry(request.method().to_string())
        .or_default() += 1;

    if state.failing.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "backend unavailable" })),
        )
            .into_response();
    }

    next.run(request).await
}

async fn list(State(state): State<Shared>, Path(collection): Path<String>) -> Json<Vec<Value>> {
    let collections = state.collections.lock().unwrap();
    Json(collections.get(&collection).cloned().unwrap_or_default())
}

async fn create(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    Json(value): Json<Value>,
) -> Json<Value> {
    state
        .collections
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(value.clone());
    Json(value)
}

async fn fetch(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let collections = state.collections.lock().unwrap();
    collections
        .get(&collection)
        .and_then(|values| values.iter().find(|v| id_of(v) == Some(id.as_str())))
        .map(|v| Json(v.clone()).into_response())
        .unwrap_or_else(not_found)
}

async fn update(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(value): Json<Value>,
) -> Response {
    let mut collections = state.collections.lock().unwrap();
    let slot = collections
        .get_mut(&collection)
        .and_then(|values| values.iter_mut().find(|v| id_of(v) == Some(id.as_str())));

    match slot {
        Some(existing) => {
            *existing = value.clone();
            Json(value).into_response()
        }
        None => not_found(),
    }
}

async fn remove(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let mut collections = state.collections.lock().unwrap();
    let Some(values) = collections.get_mut(&collection) else {
        return not_found();
    };

    let before = values.len();
    values.retain(|v| id_of(v) != Some(id.as_str()));
    if values.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn run_definition(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(overrides): Json<RunOverrides>,
) -> Response {
    let mut collections = state.collections.lock().unwrap();
    let definition = collections
        .get(&collection)
        .and_then(|values| values.iter().find(|v| id_of(v) == Some(id.as_str())))
        .and_then(|v| serde_json::from_value::<Definition>(v.clone()).ok());

    let Some(definition) = definition else {
        return not_found();
    };

    let run = CreateRun::from_definition(&definition, overrides).into_run();
    let value = serde_json::to_value(&run).unwrap();
    collections
        .entry("test-runs".to_string())
        .or_default()
        .push(value.clone());
    Json(value).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({
        "kubernetes_connected": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn job_logs(Path(job_name): Path<String>) -> Json<Value> {
    Json(json!({
        "job_name": job_name,
        "pod_name": format!("pod-{}", job_name),
        "logs": "Sample log output",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "status": "completed",
    }))
}

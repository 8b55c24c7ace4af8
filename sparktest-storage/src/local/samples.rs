//! Sample records seeded into empty local collections

use chrono::{Duration, Utc};
use sparktest_core::domain::{Definition, ExecutionMode, Executor, Run, RunStatus, TestSuite};
use std::collections::BTreeMap;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn definitions() -> Vec<Definition> {
    let now = Utc::now();
    vec![
        Definition {
            id: "api-integration-tests".to_string(),
            name: "API Integration Tests".to_string(),
            description: "API testing including authentication, CRUD operations, and error handling"
                .to_string(),
            image: "node:18-alpine".to_string(),
            commands: strings(&["npm install", "npm run test:api"]),
            created_at: now - Duration::days(1),
            source: None,
            executor_id: Some("kubernetes".to_string()),
            variables: vars(&[("API_URL", "https://api.example.com"), ("TEST_ENV", "staging")]),
            labels: strings(&["api", "integration", "backend"]),
        },
        Definition {
            id: "frontend-unit-tests".to_string(),
            name: "Frontend Unit Tests".to_string(),
            description: "React component testing with Jest and React Testing Library".to_string(),
            image: "node:18-alpine".to_string(),
            commands: strings(&["npm install", "npm run test:unit", "npm run test:coverage"]),
            created_at: now - Duration::days(2),
            source: None,
            executor_id: Some("docker".to_string()),
            variables: vars(&[("NODE_ENV", "test"), ("CI", "true")]),
            labels: strings(&["frontend", "unit", "react"]),
        },
        Definition {
            id: "e2e-tests".to_string(),
            name: "End-to-End Tests".to_string(),
            description: "Full user journey testing with Playwright".to_string(),
            image: "mcr.microsoft.com/playwright:v1.40.0-focal".to_string(),
            commands: strings(&["npm install", "npx playwright install", "npm run test:e2e"]),
            created_at: now - Duration::days(3),
            source: None,
            executor_id: Some("kubernetes".to_string()),
            variables: vars(&[("BASE_URL", "https://staging.example.com"), ("HEADLESS", "true")]),
            labels: strings(&["e2e", "playwright", "integration"]),
        },
        Definition {
            id: "performance-tests".to_string(),
            name: "Performance Load Tests".to_string(),
            description: "Load testing with K6".to_string(),
            image: "grafana/k6:latest".to_string(),
            commands: strings(&["k6", "run", "--vus", "50", "--duration", "5m", "performance-test.js"]),
            created_at: now - Duration::days(5),
            source: None,
            executor_id: Some("kubernetes".to_string()),
            variables: vars(&[("BASE_URL", "https://api.example.com"), ("VUS", "50")]),
            labels: strings(&["performance", "load", "k6"]),
        },
    ]
}

pub fn runs() -> Vec<Run> {
    let now = Utc::now();
    let run = |id: &str, name: &str, definition: &str, image: &str, command: &[&str]| Run {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        command: strings(command),
        status: RunStatus::Succeeded,
        created_at: now,
        definition_id: Some(definition.to_string()),
        executor_id: None,
        suite_id: None,
        variables: BTreeMap::new(),
        artifacts: Vec::new(),
        duration: None,
        logs: Vec::new(),
        k8s_job_name: None,
    };

    vec![
        Run {
            created_at: now - Duration::hours(1),
            executor_id: Some("kubernetes".to_string()),
            artifacts: strings(&["test-results.xml", "coverage-report.html"]),
            duration: Some(245_000),
            logs: strings(&[
                "> Starting API integration tests...",
                "> All tests passed! 41/41",
                "> Test completed successfully",
            ]),
            ..run(
                "run-1",
                "API Integration Tests - Production Deploy",
                "api-integration-tests",
                "node:18-alpine",
                &["npm install", "npm run test:api"],
            )
        },
        Run {
            status: RunStatus::Running,
            created_at: now - Duration::minutes(30),
            executor_id: Some("docker".to_string()),
            logs: strings(&[
                "> Starting frontend unit tests...",
                "> Currently running hook tests...",
            ]),
            ..run(
                "run-2",
                "Frontend Unit Tests - Feature Branch",
                "frontend-unit-tests",
                "node:18-alpine",
                &["npm install", "npm run test:unit"],
            )
        },
        Run {
            status: RunStatus::Failed,
            created_at: now - Duration::hours(2),
            duration: Some(180_000),
            logs: strings(&[
                "> Starting end-to-end tests...",
                "> Checkout process: 1 test failed",
            ]),
            ..run(
                "run-3",
                "E2E Tests - Staging Validation",
                "e2e-tests",
                "mcr.microsoft.com/playwright:v1.40.0-focal",
                &["npm install", "npx playwright install", "npm run test:e2e"],
            )
        },
    ]
}

pub fn executors() -> Vec<Executor> {
    let now = Utc::now();
    vec![
        Executor {
            id: "kubernetes".to_string(),
            name: "Kubernetes Job".to_string(),
            description: "Run tests as Kubernetes Jobs with full isolation and cluster context."
                .to_string(),
            image: "k8s-job-runner:latest".to_string(),
            command: strings(&["npm", "run", "test"]),
            supported_file_types: strings(&["js", "json", "yaml"]),
            env: vars(&[("NODE_ENV", "test")]),
            created_at: now - Duration::days(1),
        },
        Executor {
            id: "docker".to_string(),
            name: "Docker Container".to_string(),
            description: "Execute your test inside a Docker container locally or remotely."
                .to_string(),
            image: "docker-runner:stable".to_string(),
            command: strings(&["run-tests.sh"]),
            supported_file_types: strings(&["sh", "py"]),
            env: BTreeMap::new(),
            created_at: now - Duration::hours(12),
        },
    ]
}

pub fn suites() -> Vec<TestSuite> {
    let now = Utc::now();
    vec![
        TestSuite {
            id: "api-test-suite".to_string(),
            name: "API Test Suite".to_string(),
            description: "API testing including auth, CRUD operations, and error handling"
                .to_string(),
            test_definition_ids: strings(&["api-integration-tests"]),
            execution_mode: ExecutionMode::Sequential,
            labels: strings(&["api", "backend"]),
            created_at: now - Duration::days(1),
        },
        TestSuite {
            id: "frontend-test-suite".to_string(),
            name: "Frontend Test Suite".to_string(),
            description: "Unit and end-to-end frontend testing".to_string(),
            test_definition_ids: strings(&["frontend-unit-tests", "e2e-tests"]),
            execution_mode: ExecutionMode::Parallel,
            labels: strings(&["frontend", "ui"]),
            created_at: now - Duration::days(2),
        },
        TestSuite {
            id: "full-stack-test-suite".to_string(),
            name: "Full Stack Test Suite".to_string(),
            description: "Frontend, backend and performance tests".to_string(),
            test_definition_ids: strings(&[
                "api-integration-tests",
                "frontend-unit-tests",
                "e2e-tests",
                "performance-tests",
            ]),
            execution_mode: ExecutionMode::Sequential,
            labels: strings(&["full-stack", "release"]),
            created_at: now - Duration::days(3),
        },
    ]
}

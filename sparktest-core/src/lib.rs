//! SparkTest Core
//!
//! Core types and abstractions for the SparkTest dashboard.
//!
//! This crate contains:
//! - Domain types: Test definitions, runs, executors and suites
//! - Record: The binding between a domain type, its local key and its API path
//! - DTOs: Data transfer objects for run creation and cluster queries

pub mod domain;
pub mod dto;
pub mod record;

pub use record::{Record, RecordKind};

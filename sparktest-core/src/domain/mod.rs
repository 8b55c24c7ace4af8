//! Core domain types
//!
//! This module contains the records the dashboard creates, lists and deletes.
//! They are shared between the local store (persists JSON arrays) and the
//! remote store (exchanges them with the backend API).

pub mod definition;
pub mod executor;
pub mod run;
pub mod suite;

pub use definition::Definition;
pub use executor::Executor;
pub use run::{Run, RunStatus};
pub use suite::{ExecutionMode, TestSuite};

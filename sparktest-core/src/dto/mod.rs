//! Data Transfer Objects
//!
//! Request and response shapes exchanged with the backend API that are not
//! themselves persisted records.

pub mod kubernetes;
pub mod run;

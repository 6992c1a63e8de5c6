//! Core of the bolt chat bot: the schema engine that turns platform payloads
//! into validated records and back, plus the record kinds the platform sends.
//!
//! This crate is transport-agnostic. Gateway I/O and command dispatch live in
//! the adapter crates.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod schema;

pub use errors::{Error, Result};
pub use models::Model;

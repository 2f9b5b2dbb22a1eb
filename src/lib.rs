//! studentdb: a file-backed student record service.
//!
//! The collection of records lives in one JSON file, reloaded on every
//! operation and rewritten atomically on every mutation. Six named,
//! strongly-typed operations (tools) cover CRUD plus aggregate statistics;
//! a thin axum layer exposes them over HTTP.

pub mod config;
pub mod core;
pub mod server;
pub mod store;
pub mod tools;

pub use self::core::{NewStudent, Result, StoreError, Student, StudentPatch};
pub use self::store::{CareerStats, CollectionStats, FileGateway, StudentStore, UpdateOutcome};

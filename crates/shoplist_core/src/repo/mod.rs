//! Persistence adapters for list state.
//!
//! # Responsibility
//! - Define the key-value contract the service persists through.
//! - Isolate SQLite details from service orchestration.

pub mod kv_repo;

//! Core use-case services.
//!
//! # Responsibility
//! - Own the loaded list state and every mutation of it.
//! - Keep frontends decoupled from storage details.

pub mod frontend;
pub mod list_service;

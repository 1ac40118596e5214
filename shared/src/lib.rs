//! Shared types for the Brew engine
//!
//! Domain models, remote document-store schema types, the common store
//! error type, and small utility helpers used across the workspace.

pub mod docs;
pub mod error;
pub mod models;
pub mod remote;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::StoreError;

//! CyberSakhi Core
//!
//! Core types and utilities shared across CyberSakhi components.
//!
//! This crate provides:
//! - The error type and result alias used by every crate in the workspace
//! - Conversation types exchanged with the assistant

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ChatMessage, Role};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ChatMessage, Role};
}

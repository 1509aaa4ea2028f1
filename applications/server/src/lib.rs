//! Mindful Audio Server Library
//!
//! HTTP front end for the mindfulness audio backend: activities CRUD,
//! session and cue management, and control of the single local player.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

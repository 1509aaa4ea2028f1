//! Mindful Audio Core
//!
//! Shared types, traits, and error handling for the mindfulness audio backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Session`, `Cue`, `PlaybackProgress`, `Activity`
//! - **Collaborator Traits**: `SessionStore`, `AudioOutput`, `MediaProbe`
//! - **Error Handling**: Unified `MindfulError` and `Result` types
//!
//! Nothing here talks to a database, a sound device or the filesystem.
//! Implementations live in `mindful-storage` and `mindful-audio`.
//!
//! # Example
//!
//! ```rust
//! use mindful_core::types::{NewCue, Session};
//!
//! let session = Session::with_default_name(7);
//! assert_eq!(session.name, "Session 7");
//!
//! let cue = NewCue::new(7, 30, "Take a deep breath");
//! assert!(cue.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MindfulError, Result};
pub use traits::{AudioOutput, MediaProbe, SessionStore};

pub use types::{
    Activity, ActivityId, Cue, CueId, MediaInfo, NewActivity, NewCue, OutputEvent, PlayRequest,
    PlaybackId, PlaybackProgress, Session, SessionId,
};

//! Mindful Audio - Session & Cue Manager
//!
//! Owns the in-memory playback state of one listening process and mediates
//! between durable storage (sessions, cues, playback progress), an audio
//! output and a media probe.
//!
//! This crate provides:
//! - Play / pause / resume / stop with real looping
//! - Volume clamping forwarded to the output's gain control
//! - Cue timelines per session, returned in chronological order
//! - Playback progress checkpoints and resume-from-position
//! - Asset name validation against a fixed base directory
//!
//! # Architecture
//!
//! `mindful-playback` is storage- and device-agnostic. Collaborators are
//! injected as `mindful_core` trait objects, so the same manager drives a
//! `SQLite` store with a process-backed player in production and in-memory
//! fakes in tests.
//!
//! Output completion is asynchronous: the owner of the manager forwards each
//! `OutputEvent` to [`AudioSessionManager::handle_output_event`].
//!
//! # Example
//!
//! ```rust,no_run
//! use mindful_playback::{AudioSessionManager, ManagerConfig};
//! # use std::sync::Arc;
//! # async fn example(
//! #     store: Arc<dyn mindful_core::SessionStore>,
//! #     output: Arc<dyn mindful_core::AudioOutput>,
//! #     probe: Arc<dyn mindful_core::MediaProbe>,
//! # ) -> mindful_core::Result<()> {
//! let mut manager = AudioSessionManager::new(store, output, probe, ManagerConfig::default());
//!
//! manager.initialize_session(1).await?;
//! manager.play("example_audio.mp3", true).await?;
//! manager.add_cue(1, 30, "Take a deep breath").await?;
//!
//! for cue in manager.get_cues(1).await? {
//!     println!("{}s: {}", cue.time_sec, cue.message);
//! }
//! # Ok(())
//! # }
//! ```

mod assets;
mod clock;
mod manager;
mod prober;
pub mod types;
mod volume;

// Public exports
pub use assets::AssetLibrary;
pub use manager::AudioSessionManager;
pub use prober::AssetProber;
pub use mindful_core::{MindfulError, Result};
pub use types::{ManagerConfig, PlaybackSnapshot, PlaybackState, PlaybackStatus};
pub use volume::clamp_volume;

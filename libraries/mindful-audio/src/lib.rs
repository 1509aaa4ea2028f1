//! Mindful Audio - Output and Probing Backends
//!
//! Implementations of the `mindful_core` collaborator traits that touch the
//! operating system:
//!
//! - [`CommandOutput`]: plays a file by spawning an external player process
//!   (`ffplay` by default) and reports completion over a channel
//! - [`LoftyProbe`]: reads duration and stream properties with `lofty`
//! - [`FfprobeProbe`]: asks `ffprobe` for the container duration
//!
//! # Example
//!
//! ```rust,no_run
//! use mindful_audio::{CommandOutput, CommandOutputConfig};
//! use mindful_core::{AudioOutput, PlayRequest};
//!
//! # async fn example() -> mindful_core::Result<()> {
//! let (output, mut events) = CommandOutput::new(CommandOutputConfig::default());
//! let id = output.play(PlayRequest::new("assets/rain.mp3")).await?;
//!
//! if let Some(event) = events.recv().await {
//!     assert_eq!(event.id(), id);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod output;
mod probe;

pub use error::{AudioError, Result};
pub use output::{CommandOutput, CommandOutputConfig, OutputEvents};
pub use probe::{FfprobeProbe, LoftyProbe};

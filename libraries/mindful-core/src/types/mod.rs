mod activity;
mod cue;
mod media;
mod output;
mod progress;
mod session;

pub use activity::{Activity, ActivityId, NewActivity};
pub use cue::{Cue, CueId, NewCue};
pub use media::MediaInfo;
pub use output::{OutputEvent, PlayRequest, PlaybackId};
pub use progress::PlaybackProgress;
pub use session::{Session, SessionId};

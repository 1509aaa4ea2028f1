/// Shared application state
use mindful_playback::AudioSessionManager;
use mindful_storage::LocalStorageContext;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the one session manager of this process
pub type SharedPlayer = Arc<Mutex<AudioSessionManager>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<LocalStorageContext>,
    pub player: SharedPlayer,
}

impl AppState {
    pub fn new(db: Arc<LocalStorageContext>, player: AudioSessionManager) -> Self {
        Self {
            db,
            player: Arc::new(Mutex::new(player)),
        }
    }
}

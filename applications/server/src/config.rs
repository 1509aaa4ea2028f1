/// Server configuration
use crate::error::{Result, ServerError};
use mindful_audio::{CommandOutputConfig, FfprobeProbe, LoftyProbe};
use mindful_core::MediaProbe;
use mindful_playback::ManagerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_audio")]
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// How asset metadata is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// In-process, via lofty
    #[default]
    Lofty,
    /// The `ffprobe` binary
    Ffprobe,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioSettings {
    /// Directory asset names are resolved against
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Command-line player spawned once per playback
    #[serde(default = "default_player_program")]
    pub player_program: PathBuf,

    /// Player arguments; see `CommandOutputConfig` for placeholders
    #[serde(default = "default_player_args")]
    pub player_args: Vec<String>,

    #[serde(default)]
    pub probe: ProbeBackend,

    /// Used when `probe` is `ffprobe`
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// How often the playing position is written to the database
    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: u64,
}

impl AudioSettings {
    pub fn output_config(&self) -> CommandOutputConfig {
        CommandOutputConfig {
            program: self.player_program.clone(),
            args: self.player_args.clone(),
        }
    }

    pub fn media_probe(&self) -> Arc<dyn MediaProbe> {
        match self.probe {
            ProbeBackend::Lofty => Arc::new(LoftyProbe::new()),
            ProbeBackend::Ffprobe => Arc::new(FfprobeProbe::new(self.ffprobe_path.clone())),
        }
    }

    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            assets_dir: self.assets_dir.clone(),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
        }
    }

    /// Zero disables periodic checkpoints
    pub fn progress_interval(&self) -> Option<Duration> {
        (self.progress_interval_secs > 0).then(|| Duration::from_secs(self.progress_interval_secs))
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// default file is fine, a missing explicit file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. MINDFUL_SERVER__PORT=8080
        settings = settings.add_source(
            config::Environment::with_prefix("MINDFUL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "storage.database_url is required (set MINDFUL_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.audio.player_program.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "audio.player_program must not be empty".to_string(),
            ));
        }

        if self.audio.probe == ProbeBackend::Ffprobe
            && self.audio.ffprobe_path.as_os_str().is_empty()
        {
            return Err(ServerError::Config(
                "audio.ffprobe_path must not be empty when audio.probe is ffprobe".to_string(),
            ));
        }

        if self.audio.probe_timeout_secs == 0 {
            return Err(ServerError::Config(
                "audio.probe_timeout_secs must be at least 1".to_string(),
            ));
        }

        if !self.audio.assets_dir.is_dir() {
            tracing::warn!(
                "Assets directory {:?} does not exist; playback requests will fail",
                self.audio.assets_dir
            );
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/mindfulness.db".to_string()
}

fn default_audio() -> AudioSettings {
    AudioSettings {
        assets_dir: default_assets_dir(),
        player_program: default_player_program(),
        player_args: default_player_args(),
        probe: ProbeBackend::default(),
        ffprobe_path: default_ffprobe_path(),
        probe_timeout_secs: default_probe_timeout_secs(),
        progress_interval_secs: default_progress_interval_secs(),
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_player_program() -> PathBuf {
    PathBuf::from("ffplay")
}

fn default_player_args() -> Vec<String> {
    CommandOutputConfig::ffplay_args()
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_progress_interval_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            audio: default_audio(),
        }
    }
}

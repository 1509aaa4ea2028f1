//! Common test utilities and fixtures
//!
//! Each `TestApp` owns a REAL SQLite file and an assets directory with a
//! generated WAV file, both under a temp dir. Audio output is faked.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mindful_audio::LoftyProbe;
use mindful_core::{AudioOutput, MediaProbe, PlayRequest, PlaybackId, Result, SessionStore};
use mindful_playback::{AudioSessionManager, ManagerConfig};
use mindful_server::{api, AppState};
use mindful_storage::LocalStorageContext;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Name of the two-second WAV written into every test assets directory
pub const CHIME: &str = "chime.wav";

/// Output that records play requests instead of making sound
#[derive(Default)]
pub struct FakeOutput {
    pub requests: Mutex<Vec<PlayRequest>>,
    next_id: AtomicU64,
}

#[async_trait]
impl AudioOutput for FakeOutput {
    async fn play(&self, request: PlayRequest) -> Result<PlaybackId> {
        self.requests.lock().unwrap().push(request);
        Ok(PlaybackId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    async fn set_gain(&self, _level: f32) -> Result<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Arc<LocalStorageContext>,
    pub output: Arc<FakeOutput>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_probe(Arc::new(LoftyProbe::new())).await
    }

    /// Build the app around a custom media probe
    pub async fn with_probe(probe: Arc<dyn MediaProbe>) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let pool = mindful_storage::create_pool(&db_url).await.unwrap();
        mindful_storage::run_migrations(&pool).await.unwrap();
        let db = Arc::new(LocalStorageContext::new(pool));

        let assets_dir = temp_dir.path().join("assets");
        std::fs::create_dir_all(&assets_dir).unwrap();
        write_wav(&assets_dir.join(CHIME), 8000, 2);
        std::fs::write(assets_dir.join("notes.txt"), b"not audio").unwrap();

        let output = Arc::new(FakeOutput::default());
        let manager = AudioSessionManager::new(
            Arc::clone(&db) as Arc<dyn SessionStore>,
            Arc::clone(&output) as Arc<dyn AudioOutput>,
            probe,
            ManagerConfig {
                assets_dir,
                probe_timeout: Duration::from_secs(5),
            },
        );

        let state = AppState::new(Arc::clone(&db), manager);
        let router = api::router(state.clone());

        Self {
            router,
            state,
            db,
            output,
            _temp_dir: temp_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Write a silent mono 16-bit WAV file
pub fn write_wav(path: &Path, sample_rate: u32, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..sample_rate * seconds {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

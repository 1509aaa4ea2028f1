//! `FfprobeProbe` against shell scripts standing in for `ffprobe`
//!
//! Unix only: the stand-ins are `/bin/sh` scripts.

#![cfg(unix)]

use mindful_audio::FfprobeProbe;
use mindful_core::{MediaProbe, MindfulError};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROBE_JSON: &str = r#"{"streams":[{"codec_type":"audio","sample_rate":"44100","channels":2}],"format":{"duration":"183.506000","bit_rate":"320000"}}"#;

fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn asset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("rain.mp3");
    std::fs::write(&path, b"ID3").unwrap();
    path
}

#[tokio::test]
async fn test_reads_ffprobe_json() {
    let dir = tempfile::tempdir().unwrap();
    // Only answer when the asset path arrives as the last argument
    let ffprobe = script(
        &dir,
        "ffprobe-ok",
        &format!("for last; do :; done\n[ -f \"$last\" ] || exit 3\necho '{PROBE_JSON}'"),
    );

    let info = FfprobeProbe::new(ffprobe).probe(&asset(&dir)).await.unwrap();

    assert!((info.duration_secs() - 183.506).abs() < 1e-6);
    assert_eq!(info.sample_rate, Some(44_100));
    assert_eq!(info.channels, Some(2));
    assert_eq!(info.bitrate, Some(320));
}

#[tokio::test]
async fn test_nonzero_exit_is_media_probe_error() {
    let dir = tempfile::tempdir().unwrap();
    let ffprobe = script(&dir, "ffprobe-fail", "echo 'Invalid data found' >&2\nexit 1");

    let err = FfprobeProbe::new(ffprobe)
        .probe(&asset(&dir))
        .await
        .unwrap_err();

    assert!(matches!(err, MindfulError::MediaProbe(msg) if msg.contains("Invalid data found")));
}

#[tokio::test]
async fn test_missing_binary_is_media_probe_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = FfprobeProbe::new(dir.path().join("no-such-ffprobe"))
        .probe(&asset(&dir))
        .await
        .unwrap_err();

    assert!(matches!(err, MindfulError::MediaProbe(_)));
}

#[tokio::test]
async fn test_missing_file_is_media_probe_error() {
    let dir = tempfile::tempdir().unwrap();
    let ffprobe = script(&dir, "ffprobe-ok", &format!("echo '{PROBE_JSON}'"));

    let err = FfprobeProbe::new(ffprobe)
        .probe(Path::new("/no/such/rain.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(err, MindfulError::MediaProbe(_)));
}

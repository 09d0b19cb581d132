use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use voxbatch::application::ports::{InferenceError, RecognitionEngine};
use voxbatch::application::services::TranscriptionService;
use voxbatch::domain::{RecognitionOutput, RecordSet, RecordSetError, Waveform, WordSpan};
use voxbatch::driver::{BatchDriver, DriverConfig, DriverError, RunSummary};
use voxbatch::infrastructure::audio::SymphoniaAudioDecoder;
use voxbatch::presentation::{create_router, AppState};

struct EchoEngine;

#[async_trait::async_trait]
impl RecognitionEngine for EchoEngine {
    async fn recognize_batch(
        &self,
        waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError> {
        Ok(waveforms
            .iter()
            .map(|w| {
                RecognitionOutput::new(
                    "HELLO WORLD".to_string(),
                    vec![WordSpan::new("WORLD", 0.0, w.duration_seconds())],
                )
            })
            .collect())
    }
}

struct FailingEngine;

#[async_trait::async_trait]
impl RecognitionEngine for FailingEngine {
    async fn recognize_batch(
        &self,
        _waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError> {
        Err(InferenceError::RequestFailed("engine down".to_string()))
    }
}

/// Engine slow enough to trip the driver's request timeout.
struct SlowEngine;

#[async_trait::async_trait]
impl RecognitionEngine for SlowEngine {
    async fn recognize_batch(
        &self,
        waveforms: &[Waveform],
    ) -> Result<Vec<RecognitionOutput>, InferenceError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        EchoEngine.recognize_batch(waveforms).await
    }
}

async fn spawn_app<E>(engine: E) -> String
where
    E: RecognitionEngine + 'static,
{
    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(SymphoniaAudioDecoder),
        Arc::new(engine),
    ));
    let router = create_router(AppState {
        transcription_service,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn build_wav(samples: &[i16]) -> Vec<u8> {
    let sample_rate: u32 = 16_000;
    let byte_rate = sample_rate * 2;
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

/// One second of silence at the engine rate.
fn one_second_clip() -> Vec<u8> {
    build_wav(&vec![0i16; 16_000])
}

struct Fixture {
    audio_dir: tempfile::TempDir,
    _csv_dir: tempfile::TempDir,
    csv_path: PathBuf,
}

fn fixture(files: &[(&str, Vec<u8>)], csv_content: &str) -> Fixture {
    let audio_dir = tempfile::tempdir().unwrap();
    for (name, data) in files {
        std::fs::write(audio_dir.path().join(name), data).unwrap();
    }

    let csv_dir = tempfile::tempdir().unwrap();
    let csv_path = csv_dir.path().join("records.csv");
    std::fs::write(&csv_path, csv_content).unwrap();

    Fixture {
        audio_dir,
        _csv_dir: csv_dir,
        csv_path,
    }
}

fn driver(endpoint: String, batch_size: usize, timeout: Duration) -> BatchDriver {
    BatchDriver::new(DriverConfig {
        endpoint,
        batch_size,
        timeout,
    })
}

#[tokio::test]
async fn given_valid_files_when_running_then_all_transcribed_and_deleted() {
    let endpoint = spawn_app(EchoEngine).await;
    let fx = fixture(
        &[
            ("a.wav", one_second_clip()),
            ("b.wav", one_second_clip()),
            ("c.wav", one_second_clip()),
        ],
        "filename,speaker\na.wav,alice\nb.wav,bob\nc.wav,carol\n",
    );

    let summary = driver(endpoint, 2, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            total: 3,
            succeeded: 3,
            remaining: 0,
            deleted: 3,
        }
    );
    for name in ["a.wav", "b.wav", "c.wav"] {
        assert!(!fx.audio_dir.path().join(name).exists());
    }

    let records = RecordSet::load(&fx.csv_path).unwrap();
    assert_eq!(records.get("a.wav"), Some(("HELLO WORLD", "1")));
    assert_eq!(records.get("b.wav"), Some(("HELLO WORLD", "1")));
    assert_eq!(records.get("c.wav"), Some(("HELLO WORLD", "1")));
}

#[tokio::test]
async fn given_corrupt_file_when_running_then_only_good_files_are_deleted() {
    let endpoint = spawn_app(EchoEngine).await;
    let fx = fixture(
        &[
            ("a.wav", one_second_clip()),
            ("b.wav", b"not audio at all".to_vec()),
            ("c.wav", one_second_clip()),
        ],
        "filename\na.wav\nb.wav\nc.wav\n",
    );

    let summary = driver(endpoint, 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.remaining, 1);
    assert!(!fx.audio_dir.path().join("a.wav").exists());
    assert!(fx.audio_dir.path().join("b.wav").exists());
    assert!(!fx.audio_dir.path().join("c.wav").exists());

    let records = RecordSet::load(&fx.csv_path).unwrap();
    assert_eq!(records.get("a.wav"), Some(("HELLO WORLD", "1")));
    assert_eq!(records.get("b.wav"), Some(("", "")));
}

#[tokio::test]
async fn given_slow_service_when_request_times_out_then_nothing_is_deleted() {
    let endpoint = spawn_app(SlowEngine).await;
    let fx = fixture(
        &[("a.wav", one_second_clip()), ("b.wav", one_second_clip())],
        "filename\na.wav\nb.wav\n",
    );

    let summary = driver(endpoint, 20, Duration::from_millis(100))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.remaining, 2);
    assert!(fx.audio_dir.path().join("a.wav").exists());
    assert!(fx.audio_dir.path().join("b.wav").exists());

    let records = RecordSet::load(&fx.csv_path).unwrap();
    assert_eq!(records.get("a.wav"), Some(("", "")));
}

#[tokio::test]
async fn given_engine_failure_when_running_then_files_stay_for_the_next_run() {
    let endpoint = spawn_app(FailingEngine).await;
    let fx = fixture(
        &[("a.wav", one_second_clip())],
        "filename\na.wav\n",
    );

    let summary = driver(endpoint, 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 0);
    assert!(fx.audio_dir.path().join("a.wav").exists());
}

#[tokio::test]
async fn given_missing_filename_column_when_running_then_aborts_before_any_deletion() {
    let endpoint = spawn_app(EchoEngine).await;
    let csv_content = "id,speaker\n1,alice\n";
    let fx = fixture(&[("a.wav", one_second_clip())], csv_content);

    let result = driver(endpoint, 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await;

    assert!(matches!(
        result,
        Err(DriverError::RecordSet(
            RecordSetError::MissingFilenameColumn
        ))
    ));
    assert!(fx.audio_dir.path().join("a.wav").exists());
    assert_eq!(
        std::fs::read_to_string(&fx.csv_path).unwrap(),
        csv_content,
        "record set file must stay untouched"
    );
}

#[tokio::test]
async fn given_previous_success_when_file_fails_again_then_row_is_not_clobbered() {
    let endpoint = spawn_app(EchoEngine).await;
    let fx = fixture(
        &[("a.wav", b"truncated garbage".to_vec())],
        "filename,generated_text,duration\na.wav,EARLIER RESULT,3.5\n",
    );

    let summary = driver(endpoint, 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 0);
    assert!(fx.audio_dir.path().join("a.wav").exists());

    let records = RecordSet::load(&fx.csv_path).unwrap();
    assert_eq!(records.get("a.wav"), Some(("EARLIER RESULT", "3.5")));
}

#[tokio::test]
async fn given_completed_run_when_rerunning_then_only_remaining_files_are_processed() {
    let endpoint = spawn_app(EchoEngine).await;
    let fx = fixture(
        &[("a.wav", one_second_clip()), ("b.wav", one_second_clip())],
        "filename\na.wav\nb.wav\n",
    );

    let first = driver(endpoint.clone(), 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();
    assert_eq!(first.succeeded, 2);

    // The directory is now empty; a second run touches nothing.
    let second = driver(endpoint, 20, Duration::from_secs(5))
        .run(fx.audio_dir.path(), &fx.csv_path)
        .await
        .unwrap();

    assert_eq!(
        second,
        RunSummary {
            total: 0,
            succeeded: 0,
            remaining: 0,
            deleted: 0,
        }
    );

    let records = RecordSet::load(&fx.csv_path).unwrap();
    assert_eq!(records.get("a.wav"), Some(("HELLO WORLD", "1")));
    assert_eq!(records.get("b.wav"), Some(("HELLO WORLD", "1")));
}

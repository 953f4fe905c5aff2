// End-to-end batch behavior: discovery, skipping, per-file failure isolation
// WHY: a batch must keep going past bad files and only call the engine for real content

use anyhow::{bail, Result};
use plainspeak::discovery::{discover_files, DiscoveryConfig};
use plainspeak::{
    run_batch, BatchConfig, DocumentTranslator, FileStatus, PlainEnglishTranslator, TranslationResult,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::fixtures::{INSURANCE_POLICY, LEASE_AGREEMENT, MEDICAL_DISCHARGE};
use test_utils::TestFixture;

/// Wraps the real translator, records every input it sees and fails on a marker
struct RecordingTranslator {
    inner: PlainEnglishTranslator,
    seen: RefCell<Vec<String>>,
    fail_marker: Option<&'static str>,
}

impl RecordingTranslator {
    fn new(inner: PlainEnglishTranslator, fail_marker: Option<&'static str>) -> Self {
        Self {
            inner,
            seen: RefCell::new(Vec::new()),
            fail_marker,
        }
    }
}

impl DocumentTranslator for RecordingTranslator {
    fn translate(&self, text: &str) -> Result<TranslationResult> {
        self.seen.borrow_mut().push(text.to_string());
        if let Some(marker) = self.fail_marker {
            if text.contains(marker) {
                bail!("simulated engine failure");
            }
        }
        Ok(self.inner.translate_document(text))
    }

    fn save(&self, result: &TranslationResult, base_name: &str) -> Result<PathBuf> {
        self.inner.save_translation(result, base_name)
    }
}

fn fast_config() -> BatchConfig {
    BatchConfig {
        delay: Duration::ZERO,
        ..BatchConfig::default()
    }
}

#[tokio::test]
async fn test_short_input_never_reaches_engine() {
    let fixture = TestFixture::new();
    let short = fixture.create_document("short.txt", "0123456789");
    let long_text = "a".repeat(200);
    let long = fixture.create_document("long.txt", &long_text);

    let translator = RecordingTranslator::new(fixture.translator(), None);
    let summary = run_batch(&translator, &[short, long], &fast_config(), |_, _, _| {}).await;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(*translator.seen.borrow(), vec![long_text]);
    assert_eq!(summary.files[0].status, FileStatus::Skipped);
}

#[tokio::test]
async fn test_failing_file_does_not_stop_batch() {
    let fixture = TestFixture::new();
    let files = vec![
        fixture.create_document("a_medical.txt", MEDICAL_DISCHARGE),
        fixture.create_document("b_broken.txt", &format!("EXPLODE {LEASE_AGREEMENT}")),
        fixture.create_document("c_policy.txt", INSURANCE_POLICY),
    ];

    let translator = RecordingTranslator::new(fixture.translator(), Some("EXPLODE"));
    let mut reported = Vec::new();
    let summary = run_batch(&translator, &files, &fast_config(), |index, total, stats| {
        reported.push((index, total, stats.status, stats.error.clone()));
    })
    .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 3);
    assert_eq!(translator.seen.borrow().len(), 3);

    assert_eq!(reported.len(), 3);
    assert_eq!(reported[1].0, 2);
    assert_eq!(reported[1].1, 3);
    assert_eq!(reported[1].2, FileStatus::Failed);
    let error = reported[1].3.as_deref().expect("failed file should carry its error");
    assert!(error.contains("b_broken.txt"));
    assert!(error.contains("simulated engine failure"));

    assert!(fixture.report_path("batch_a_medical").exists());
    assert!(!fixture.report_path("batch_b_broken").exists());
    assert!(fixture.report_path("batch_c_policy").exists());
}

#[tokio::test]
async fn test_unwritable_output_is_reported_per_file() {
    let fixture = TestFixture::new();
    // A regular file where the report directory should be makes every save fail
    std::fs::write(&fixture.output_dir, "not a directory").unwrap();
    let input = fixture.create_document("doc.txt", MEDICAL_DISCHARGE);

    let translator = fixture.translator();
    let summary = run_batch(&translator, &[input.clone(), input], &fast_config(), |_, _, _| {}).await;

    assert_eq!(summary.failed, 2);
    assert!(summary.files[0]
        .error
        .as_deref()
        .unwrap()
        .contains("Failed to create report directory"));
}

#[tokio::test]
async fn test_invalid_utf8_is_tolerated() {
    let fixture = TestFixture::new();
    let mut bytes = MEDICAL_DISCHARGE.as_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFE, 0xFD]);
    let input = fixture.create_document_bytes("binary.txt", &bytes);

    let translator = fixture.translator();
    let summary = run_batch(&translator, &[input], &fast_config(), |_, _, _| {}).await;

    assert_eq!(summary.succeeded, 1);
    assert!(summary.files[0].red_flags > 0);
}

#[tokio::test]
async fn test_discovery_feeds_batch() {
    let fixture = TestFixture::new();
    fixture.create_document("one.txt", MEDICAL_DISCHARGE);
    fixture.create_document("two.txt", LEASE_AGREEMENT);
    fixture.create_document("notes.md", INSURANCE_POLICY);

    let files = discover_files(&fixture.pattern("*.txt"), &DiscoveryConfig::default()).unwrap();
    assert_eq!(files.len(), 2);

    let translator = PlainEnglishTranslator::with_config(plainspeak::TranslatorConfig {
        output_dir: fixture.output_dir.clone(),
        ..Default::default()
    })
    .unwrap();
    let summary = run_batch(&translator, &files, &fast_config(), |_, _, _| {}).await;

    assert_eq!(summary.succeeded, 2);
    assert!(fixture.report_path("batch_one").exists());
    assert!(fixture.report_path("batch_two").exists());
}

#[tokio::test]
async fn test_delay_between_files_only() {
    let fixture = TestFixture::new();
    let files: Vec<_> = (0..3)
        .map(|i| fixture.create_document(format!("doc{i}.txt"), LEASE_AGREEMENT))
        .collect();
    let config = BatchConfig {
        delay: Duration::from_millis(50),
        ..BatchConfig::default()
    };

    let translator = fixture.translator();
    let start = Instant::now();
    let summary = run_batch(&translator, &files, &config, |_, _, _| {}).await;

    // Two pauses for three files
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(summary.succeeded, 3);
}

// WHY: batch runs must survive bad files, so every per-file failure is captured
// in FileStats instead of being returned to the caller

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::reader;
use crate::translator::{PlainEnglishTranslator, TranslationResult};

/// Engine seam used by the batch driver
pub trait DocumentTranslator {
    fn translate(&self, text: &str) -> Result<TranslationResult>;

    /// Persist a report and return where it was written
    fn save(&self, result: &TranslationResult, base_name: &str) -> Result<PathBuf>;
}

impl DocumentTranslator for PlainEnglishTranslator {
    fn translate(&self, text: &str) -> Result<TranslationResult> {
        Ok(self.translate_document(text))
    }

    fn save(&self, result: &TranslationResult, base_name: &str) -> Result<PathBuf> {
        self.save_translation(result, base_name)
    }
}

/// Configuration for batch processing behavior
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Files whose trimmed content is shorter than this many characters are skipped
    pub min_content_chars: usize,
    /// Pause between consecutive files
    pub delay: Duration,
    /// Prepended to the file stem to form the report name
    pub report_prefix: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 50,
            delay: Duration::from_millis(500),
            report_prefix: "batch_".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Success,
    Skipped,
    Failed,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    pub status: FileStatus,
    /// Characters of trimmed content, 0 if the file could not be read
    pub chars_processed: u64,
    pub processing_time_ms: u64,
    pub confidence_score: Option<f64>,
    pub red_flags: usize,
    pub rights: usize,
    pub action_items: usize,
    pub report_path: Option<PathBuf>,
    /// Failure message, or the reason a file was skipped
    pub error: Option<String>,
}

impl FileStats {
    fn empty(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.display().to_string(),
            status,
            chars_processed: 0,
            processing_time_ms: 0,
            confidence_score: None,
            red_flags: 0,
            rights: 0,
            action_items: 0,
            report_path: None,
            error: None,
        }
    }
}

/// Aggregate result of a batch run
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BatchSummary {
    pub files: Vec<FileStats>,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn record(&mut self, stats: FileStats) {
        match stats.status {
            FileStatus::Success => self.succeeded += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(stats);
    }

    /// Write the summary as pretty-printed JSON
    pub async fn save_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
        Ok(())
    }
}

/// Read, translate and save one file. Never returns an error: failures are
/// recorded in the returned stats.
pub async fn process_file<T>(translator: &T, path: &Path, config: &BatchConfig) -> FileStats
where
    T: DocumentTranslator + ?Sized,
{
    let start_time = Instant::now();

    let mut stats = match translate_file(translator, path, config).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("Error processing {}: {:#}", path.display(), e);
            let mut stats = FileStats::empty(path, FileStatus::Failed);
            stats.error = Some(format!("{e:#}"));
            stats
        }
    };

    stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
    stats
}

async fn translate_file<T>(translator: &T, path: &Path, config: &BatchConfig) -> Result<FileStats>
where
    T: DocumentTranslator + ?Sized,
{
    let content = reader::read_document(path).await?;
    let chars = content.trim().chars().count();

    if chars < config.min_content_chars {
        debug!("Skipping {}: {} characters", path.display(), chars);
        let mut stats = FileStats::empty(path, FileStatus::Skipped);
        stats.chars_processed = chars as u64;
        stats.error = Some(format!(
            "too short ({chars} characters, minimum {})",
            config.min_content_chars
        ));
        return Ok(stats);
    }

    let result = translator
        .translate(&content)
        .with_context(|| format!("Translation failed for {}", path.display()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let report_path = translator.save(&result, &format!("{}{}", config.report_prefix, stem))?;

    Ok(FileStats {
        path: path.display().to_string(),
        status: FileStatus::Success,
        chars_processed: chars as u64,
        processing_time_ms: 0,
        confidence_score: Some(result.confidence_score),
        red_flags: result.red_flags.len(),
        rights: result.your_rights.len(),
        action_items: result.action_items.len(),
        report_path: Some(report_path),
        error: None,
    })
}

/// Process `files` one after another, pausing `config.delay` between them.
///
/// `on_file` is called with the 1-based position, the total and the stats of
/// each file as soon as it finishes. The batch never stops early.
pub async fn run_batch<T, F>(
    translator: &T,
    files: &[PathBuf],
    config: &BatchConfig,
    mut on_file: F,
) -> BatchSummary
where
    T: DocumentTranslator + ?Sized,
    F: FnMut(usize, usize, &FileStats),
{
    let start_time = Instant::now();
    let mut summary = BatchSummary::default();
    info!("Starting batch of {} files", files.len());

    for (i, path) in files.iter().enumerate() {
        let stats = process_file(translator, path, config).await;
        on_file(i + 1, files.len(), &stats);
        summary.record(stats);

        if !config.delay.is_zero() && i + 1 < files.len() {
            tokio::time::sleep(config.delay).await;
        }
    }

    summary.elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(
        "Batch complete: {} succeeded, {} skipped, {} failed in {}ms",
        summary.succeeded, summary.skipped, summary.failed, summary.elapsed_ms
    );
    summary
}

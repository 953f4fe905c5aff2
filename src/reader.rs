use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Statistics for a single document read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    /// Invalid UTF-8 sequences that were dropped
    pub invalid_sequences: usize,
    pub duration_ms: u64,
}

/// Decode bytes as UTF-8, dropping undecodable sequences instead of failing.
///
/// Returns the text and the number of invalid sequences skipped. Any U+FFFD
/// already present in the source is dropped and counted as well.
pub fn decode_lossy(bytes: &[u8]) -> (String, usize) {
    let decoded = String::from_utf8_lossy(bytes);
    let invalid = decoded.matches(char::REPLACEMENT_CHARACTER).count();
    if invalid == 0 {
        return (decoded.into_owned(), 0);
    }

    let text: String = decoded.chars().filter(|&c| c != char::REPLACEMENT_CHARACTER).collect();
    (text, invalid)
}

/// Read a document as text, tolerating invalid UTF-8
pub async fn read_document_with_stats<P: AsRef<Path>>(file_path: P) -> Result<(String, ReadStats)> {
    let path = file_path.as_ref();
    let start_time = std::time::Instant::now();
    debug!("Reading document: {}", path.display());

    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (text, invalid_sequences) = decode_lossy(&bytes);

    if invalid_sequences > 0 {
        warn!(
            "Dropped {} invalid UTF-8 sequences from {}",
            invalid_sequences,
            path.display()
        );
    }

    let stats = ReadStats {
        file_path: path.display().to_string(),
        bytes_read: bytes.len() as u64,
        invalid_sequences,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    debug!("Read {}: {} bytes in {}ms", stats.file_path, stats.bytes_read, stats.duration_ms);
    Ok((text, stats))
}

/// Convenience wrapper returning only the text
pub async fn read_document<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let (text, _stats) = read_document_with_stats(file_path).await?;
    Ok(text)
}

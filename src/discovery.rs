use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Return the first unreadable glob entry as an error instead of skipping it
    pub fail_fast: bool,
    /// Keep at most this many files, in glob order. `Some(0)` means no limit.
    pub max_files: Option<usize>,
}

/// Expand a glob pattern such as `documents/*.txt` into regular files.
///
/// Directories are ignored. Entries that cannot be read are logged and
/// skipped unless `fail_fast` is set.
pub fn discover_files(pattern: &str, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    debug!("Starting file discovery with pattern: {}", pattern);
    let paths = glob(pattern).with_context(|| format!("Invalid file pattern: {pattern}"))?;

    let limit = config.max_files.filter(|&max| max > 0);
    let mut files = Vec::new();
    for entry in paths {
        if limit.is_some_and(|max| files.len() >= max) {
            debug!("Reached file limit of {}", files.len());
            break;
        }

        match entry {
            Ok(path) if path.is_file() => {
                debug!("Found file: {}", path.display());
                files.push(path);
            }
            Ok(path) => {
                debug!("Skipping non-file entry: {}", path.display());
            }
            Err(e) => {
                if config.fail_fast {
                    return Err(anyhow::anyhow!("Glob iteration error: {e}"));
                }
                warn!("Glob iteration error (continuing): {}", e);
            }
        }
    }

    info!("File discovery completed: {} files match {}", files.len(), pattern);
    Ok(files)
}

// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use plainspeak::{PlainEnglishTranslator, TranslatorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary input directory plus a separate report directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
    pub output_dir: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().join("documents");
        let output_dir = temp_dir.path().join("translations");
        fs::create_dir_all(&root_path).expect("Failed to create documents directory");

        Self {
            temp_dir,
            root_path,
            output_dir,
        }
    }

    /// Write a document under the input directory
    pub fn create_document<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        self.create_document_bytes(relative_path, content.as_bytes())
    }

    pub fn create_document_bytes<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Glob pattern matching `tail` inside the input directory
    pub fn pattern(&self, tail: &str) -> String {
        format!("{}/{}", self.root_path.display(), tail)
    }

    /// Translator that writes reports into this fixture's output directory
    pub fn translator(&self) -> PlainEnglishTranslator {
        PlainEnglishTranslator::with_config(TranslatorConfig {
            output_dir: self.output_dir.clone(),
            ..TranslatorConfig::default()
        })
        .expect("Failed to build translator")
    }

    pub fn report_path(&self, base_name: &str) -> PathBuf {
        self.output_dir.join(format!("{base_name}.html"))
    }
}

pub mod batch;
pub mod discovery;
pub mod reader;
pub mod report;
pub mod translator;

// Re-export main types for convenient access
pub use translator::{
    DocumentKind, PlainEnglishTranslator, TranslationResult, TranslatorConfig, REVIEW_THRESHOLD,
};

// Re-export batch processing types for the CLI and external drivers
pub use batch::{
    process_file, run_batch, BatchConfig, BatchSummary, DocumentTranslator, FileStats, FileStatus,
};

// WHY: single entry point for turning jargon into plain English; the rule table
// and segmenter are compiled once and only read afterwards, so one translator
// can be shared across threads

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub mod normalization;
pub mod rules;
pub mod segment;

pub use normalization::{normalize_document, normalize_sentence, normalize_sentence_into, word_count};
pub use rules::{format_explanation, Detection, DocumentKind, JargonRule, RuleCategory, RuleSet, DEFAULT_RULES};
pub use segment::{Segment, SegmentKind, Segmenter};

/// Confidence below this should be checked by a person
pub const REVIEW_THRESHOLD: f64 = 0.7;

/// Translator configuration
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Directory reports are written to by `save_translation`
    pub output_dir: PathBuf,
    /// Upper bound on `key_points`, including the summary line
    pub max_key_points: usize,
    /// Fraction of recognized words at which confidence reaches 1.0
    pub full_coverage_ratio: f64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("translations"),
            max_key_points: 5,
            full_coverage_ratio: 0.12,
        }
    }
}

/// Structured output of one `translate_document` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub plain_english: String,
    pub key_points: Vec<String>,
    pub red_flags: Vec<String>,
    pub your_rights: Vec<String>,
    pub action_items: Vec<String>,
    /// Share of the document covered by recognized jargon, in [0, 1]
    pub confidence_score: f64,
    pub document_kind: DocumentKind,
    /// Total rule matches, duplicates included
    pub matched_terms: usize,
}

impl TranslationResult {
    pub fn needs_review(&self) -> bool {
        self.confidence_score < REVIEW_THRESHOLD
    }
}

/// Deterministic, rule-based jargon translator
#[derive(Debug)]
pub struct PlainEnglishTranslator {
    rules: RuleSet,
    segmenter: Segmenter,
    config: TranslatorConfig,
}

impl PlainEnglishTranslator {
    /// Translator with the built-in rule table and default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TranslatorConfig::default())
    }

    pub fn with_config(config: TranslatorConfig) -> Result<Self> {
        let rules = RuleSet::builtin()?;
        let segmenter = Segmenter::new()?;
        info!(
            "Translator ready with {} rules, reports go to {}",
            rules.len(),
            config.output_dir.display()
        );
        Ok(Self { rules, segmenter, config })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Translate raw document text. Never fails; unrecognized text yields an
    /// empty, zero-confidence result.
    pub fn translate_document(&self, text: &str) -> TranslationResult {
        let start_time = Instant::now();
        let text = normalize_document(text);
        let detections = self.rules.scan(&text);

        let mut red_flags = Vec::new();
        let mut your_rights = Vec::new();
        let mut action_items = Vec::new();

        for detection in &detections {
            let rule = self.rules.get(detection);
            let target = match rule.category {
                RuleCategory::Substitution => continue,
                RuleCategory::RedFlag => &mut red_flags,
                RuleCategory::Right => &mut your_rights,
                RuleCategory::ActionItem => &mut action_items,
            };
            // Equal strings are kept: one entry per detection
            let matched = &text[detection.start..detection.end];
            target.push(format_explanation(rule.text, matched));
        }

        let document_kind = self.dominant_kind(&detections);
        let mut key_points = Vec::new();
        if document_kind != DocumentKind::General && self.config.max_key_points > 0 {
            key_points.push(format!(
                "This looks like a {} document: {} red flag(s), {} right(s) and {} action item(s) were found.",
                document_kind.label().to_lowercase(),
                red_flags.len(),
                your_rights.len(),
                action_items.len()
            ));
        }
        self.collect_key_points(&text, &detections, &mut key_points);

        let result = TranslationResult {
            plain_english: self.render(&text, 0..text.len(), &detections),
            key_points,
            red_flags,
            your_rights,
            action_items,
            confidence_score: self.confidence(&text, &detections),
            document_kind,
            matched_terms: detections.len(),
        };

        debug!(
            "Translated {} bytes: {} matches, confidence {:.2}, {}ms",
            text.len(),
            result.matched_terms,
            result.confidence_score,
            start_time.elapsed().as_millis()
        );
        result
    }

    /// Translate raw bytes, dropping anything that is not valid UTF-8
    pub fn translate_bytes(&self, bytes: &[u8]) -> TranslationResult {
        self.translate_document(&String::from_utf8_lossy(bytes))
    }

    /// Write `result` as `<output_dir>/<base_name>.html`, replacing any existing file
    pub fn save_translation(&self, result: &TranslationResult, base_name: &str) -> Result<PathBuf> {
        crate::report::write_report(&self.config.output_dir, result, base_name)
    }

    /// Path `save_translation` would write for `base_name`
    pub fn report_path(&self, base_name: &str) -> PathBuf {
        crate::report::report_path(Path::new(&self.config.output_dir), base_name)
    }

    /// Copy `range` of `text`, replacing substitution matches inside it
    fn render(&self, text: &str, range: Range<usize>, detections: &[Detection]) -> String {
        let mut output = String::with_capacity(range.len());
        let mut cursor = range.start;

        for detection in detections
            .iter()
            .filter(|d| d.start >= range.start && d.end <= range.end)
        {
            let rule = self.rules.get(detection);
            if rule.category != RuleCategory::Substitution {
                continue;
            }
            output.push_str(&text[cursor..detection.start]);
            output.push_str(&match_case(rule.text, &text[detection.start..detection.end]));
            cursor = detection.end;
        }

        output.push_str(&text[cursor..range.end]);
        output
    }

    /// Sentences holding at least one substitution, rewritten in plain English
    fn collect_key_points(&self, text: &str, detections: &[Detection], key_points: &mut Vec<String>) {
        for segment in self.segmenter.segments(text) {
            if key_points.len() >= self.config.max_key_points {
                break;
            }
            if segment.kind == SegmentKind::Heading {
                continue;
            }

            let has_substitution = detections.iter().any(|d| {
                d.start >= segment.range.start
                    && d.end <= segment.range.end
                    && self.rules.get(d).category == RuleCategory::Substitution
            });
            if has_substitution {
                let point = normalize_sentence(&self.render(text, segment.range, detections));
                push_unique(key_points, point);
            }
        }
    }

    /// Recognized-word coverage scaled so `full_coverage_ratio` maps to 1.0
    fn confidence(&self, text: &str, detections: &[Detection]) -> f64 {
        let total_words = word_count(text);
        if total_words == 0 || detections.is_empty() {
            return 0.0;
        }

        let covered_words: usize = detections
            .iter()
            .map(|d| word_count(&text[d.start..d.end]))
            .sum();
        let coverage = covered_words as f64 / total_words as f64;
        let full = self.config.full_coverage_ratio.max(f64::EPSILON);
        (coverage / full).clamp(0.0, 1.0)
    }

    fn dominant_kind(&self, detections: &[Detection]) -> DocumentKind {
        let mut best = DocumentKind::General;
        let mut best_count = 0;

        for kind in DocumentKind::DOMAINS {
            let count = detections
                .iter()
                .filter(|d| self.rules.get(d).domain == kind)
                .count();
            if count > best_count {
                best = kind;
                best_count = count;
            }
        }
        best
    }
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Carry the source span's capitalization over to its replacement.
///
/// All-caps words longer than three letters (headings) give an all-caps
/// replacement; short all-caps abbreviations like `BID` keep the replacement
/// as written; a leading capital is copied.
fn match_case(replacement: &str, source: &str) -> String {
    let letters: Vec<char> = source.chars().filter(|c| c.is_alphabetic()).collect();
    let all_caps = !letters.is_empty() && letters.iter().all(|c| c.is_uppercase());

    if all_caps {
        if letters.len() > 3 {
            return replacement.to_uppercase();
        }
        return replacement.to_string();
    }

    if source.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    replacement.to_string()
}

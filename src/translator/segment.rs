// WHY: key points are chosen per sentence, so the document is split into
// blocks (paragraphs, list items, headings) and each block into sentences

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::ops::Range;
use tracing::debug;

/// Title abbreviations that cause false sentence boundaries when followed by proper nouns
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St.", "No.", "vs.", "e.g.", "i.e.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Short all-caps line such as `MEDICATIONS:`
    Heading,
    Sentence,
}

/// A sentence or heading as a byte range into the segmented text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<usize>,
    pub kind: SegmentKind,
}

/// Splits normalized document text into headings and sentences
#[derive(Debug)]
pub struct Segmenter {
    boundary: Regex,
}

impl Segmenter {
    /// Basic boundary pattern: end punctuation, whitespace, then a capital or opener
    pub fn new() -> Result<Self> {
        let boundary = Regex::new(r#"[.!?]\s+[A-Z("'\[]"#)
            .context("Failed to compile sentence boundary pattern")?;
        Ok(Self { boundary })
    }

    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();

        for block in blocks(text) {
            let block_text = &text[block.range.clone()];
            if block.heading {
                push_trimmed(&mut segments, block.range.start, block_text, SegmentKind::Heading);
                continue;
            }

            // Skip a leading list marker so "1. First" is not read as a boundary
            let leading = block_text.len() - block_text.trim_start().len();
            let base = leading + bullet_len(&block_text[leading..]);
            let mut start = base;
            for m in self.boundary.find_iter(&block_text[base..]) {
                // Punctuation is ASCII, so the cut lands on a char boundary
                let cut = base + m.start() + 1;
                if ends_with_title_abbreviation(&block_text[start..cut]) {
                    continue;
                }
                push_trimmed(&mut segments, block.range.start + start, &block_text[start..cut], SegmentKind::Sentence);
                start = cut;
            }
            push_trimmed(&mut segments, block.range.start + start, &block_text[start..], SegmentKind::Sentence);
        }

        debug!("Segmented {} bytes into {} segments", text.len(), segments.len());
        segments
    }
}

struct Block {
    range: Range<usize>,
    heading: bool,
}

/// Group lines into blocks. Blank lines end a block; list items and headings
/// always start a new one.
fn blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Range<usize>> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let range = offset..offset + line.len();
        offset += line.len();
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some(block) = current.take() {
                blocks.push(Block { range: block, heading: false });
            }
            continue;
        }

        if is_heading(trimmed) {
            if let Some(block) = current.take() {
                blocks.push(Block { range: block, heading: false });
            }
            blocks.push(Block { range, heading: true });
            continue;
        }

        if is_list_item(trimmed) {
            if let Some(block) = current.take() {
                blocks.push(Block { range: block, heading: false });
            }
        }

        current = Some(match current {
            Some(block) => block.start..range.end,
            None => range,
        });
    }

    if let Some(block) = current {
        blocks.push(Block { range: block, heading: false });
    }
    blocks
}

fn is_heading(line: &str) -> bool {
    line.split_whitespace().count() <= 6
        && line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase)
}

fn is_list_item(line: &str) -> bool {
    bullet_len(line) > 0
}

/// Byte length of a leading list marker plus the space after it, or 0
fn bullet_len(line: &str) -> usize {
    for marker in ["- ", "* ", "• "] {
        if line.starts_with(marker) {
            return marker.len();
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line.as_bytes()[digits..];
        if rest.len() >= 2 && matches!(rest[0], b'.' | b')') && rest[1] == b' ' {
            return digits + 2;
        }
    }
    0
}

fn ends_with_title_abbreviation(text: &str) -> bool {
    text.split_whitespace()
        .last()
        .is_some_and(|word| TITLE_ABBREVIATIONS.contains(&word))
}

/// Record `slice` (found at `offset`) without surrounding whitespace or list marker
fn push_trimmed(segments: &mut Vec<Segment>, offset: usize, slice: &str, kind: SegmentKind) {
    let leading = slice.len() - slice.trim_start().len();
    let mut start = offset + leading;
    let mut body = slice.trim();

    let marker = bullet_len(body);
    if marker > 0 {
        let rest = &body[marker..];
        start += marker + (rest.len() - rest.trim_start().len());
        body = rest.trim_start();
    }

    if !body.is_empty() {
        segments.push(Segment { range: start..start + body.len(), kind });
    }
}

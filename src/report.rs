// WHY: reports are plain HTML files so they open in any browser without extra tooling

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::translator::{TranslationResult, REVIEW_THRESHOLD};

const STYLE: &str = "body{font-family:sans-serif;max-width:52em;margin:2em auto;line-height:1.5;color:#222}\
section{border-radius:6px;padding:0.5em 1.2em;margin:1em 0}\
.key-points{background:#eef4fb}.red-flags{background:#fdecea}.rights{background:#e9f7ef}\
.actions{background:#fff8e1}.plain{background:#f5f5f5;white-space:pre-wrap}\
.review{color:#b00020;font-weight:bold}.meta{color:#666;font-size:0.9em}";

/// Replace characters that are unsafe in a file name with `_`
pub fn sanitize_base_name(base_name: &str) -> String {
    let sanitized: String = base_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "translation".to_string()
    } else {
        sanitized
    }
}

/// `<output_dir>/<sanitized base_name>.html`
pub fn report_path(output_dir: &Path, base_name: &str) -> PathBuf {
    output_dir.join(format!("{}.html", sanitize_base_name(base_name)))
}

/// Escape text for HTML element content.
///
/// Only a `<` that would open a tag, comment or declaration and an `&` that
/// would start a character reference are escaped. Everything else, such as
/// "Terms & Conditions" or "BP <90", is written unchanged.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, chars.peek()) {
            ('<', Some(&next)) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?') => {
                escaped.push_str("&lt;")
            }
            ('&', Some(&next)) if next.is_ascii_alphabetic() || next == '#' => escaped.push_str("&amp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a translation as a standalone HTML document
pub fn render_report(result: &TranslationResult, title: &str) -> String {
    let mut html = String::with_capacity(result.plain_english.len() * 2 + 4096);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Plain English: {title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Plain English: {title}</h1>\n\
         <p class=\"meta\">Document type: {kind} | Confidence: {confidence:.0}% | Generated {generated}</p>\n",
        title = escape_html(title),
        kind = result.document_kind.label(),
        confidence = result.confidence_score * 100.0,
    );

    if result.needs_review() {
        let _ = writeln!(
            html,
            "<p class=\"review\">Confidence is below {:.0}%. Have a professional review this document.</p>",
            REVIEW_THRESHOLD * 100.0
        );
    }

    push_list(&mut html, "key-points", "Key Points", &result.key_points);
    push_list(&mut html, "red-flags", "Red Flags", &result.red_flags);
    push_list(&mut html, "rights", "Your Rights", &result.your_rights);
    push_list(&mut html, "actions", "Action Items", &result.action_items);

    let _ = write!(
        html,
        "<section class=\"plain\">\n<h2>Plain English Version</h2>\n<div>{}</div>\n</section>\n",
        escape_html(&result.plain_english)
    );

    push_source_copies(&mut html, result);
    html
}

/// Write items that escaping changed a second time, unescaped, so the file
/// holds a literal copy of every item.
///
/// A hidden textarea holds raw text up to the next `</textarea`. Items that
/// contain one go into a trailing `<plaintext>` element instead, which runs to
/// the end of the file, so it also replaces the closing tags.
fn push_source_copies(html: &mut String, result: &TranslationResult) {
    let changed = result
        .key_points
        .iter()
        .chain(&result.red_flags)
        .chain(&result.your_rights)
        .chain(&result.action_items)
        .filter(|item| escape_html(item) != **item);

    let mut trailing = Vec::new();
    for item in changed {
        if item.to_ascii_lowercase().contains("</textarea") {
            trailing.push(item.as_str());
        } else {
            let _ = writeln!(html, "<textarea hidden readonly class=\"source-text\">{item}</textarea>");
        }
    }

    if trailing.is_empty() {
        html.push_str("</body>\n</html>\n");
    } else {
        html.push_str("<plaintext hidden class=\"source-text\">");
        for item in trailing {
            html.push_str(item);
            html.push('\n');
        }
    }
}

fn push_list(html: &mut String, class: &str, heading: &str, items: &[String]) {
    let _ = write!(html, "<section class=\"{class}\">\n<h2>{heading} ({})</h2>\n", items.len());
    if items.is_empty() {
        html.push_str("<p>None found.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in items {
            let _ = writeln!(html, "<li>{}</li>", escape_html(item));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}

/// Write the report for `result`, creating `output_dir` if needed and
/// overwriting any existing report of the same name
pub fn write_report(output_dir: &Path, result: &TranslationResult, base_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create report directory {}", output_dir.display()))?;

    let path = report_path(output_dir, base_name);
    debug!("Rendering report for {} to {}", base_name, path.display());

    let html = render_report(result, base_name);
    fs::write(&path, html).with_context(|| format!("Failed to write report {}", path.display()))?;

    info!("Saved translation report: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::DocumentKind;
    use tempfile::TempDir;

    fn sample_result() -> TranslationResult {
        TranslationResult {
            plain_english: "You had a heart attack & need rest <soon>.".to_string(),
            key_points: vec!["You had a heart attack.".to_string()],
            red_flags: vec!["Unsafe combination (contraindicated with omeprazole)".to_string()],
            your_rights: vec![],
            action_items: vec!["Book the follow-up visit (Cardiology appointment in 2 weeks)".to_string()],
            confidence_score: 0.42,
            document_kind: DocumentKind::Medical,
            matched_terms: 3,
        }
    }

    #[test]
    fn test_sanitize_base_name() {
        assert_eq!(sanitize_base_name("batch_report-1.v2"), "batch_report-1.v2");
        assert_eq!(sanitize_base_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_base_name("my file"), "my_file");
        assert_eq!(sanitize_base_name(""), "translation");
    }

    #[test]
    fn test_escape_html_leaves_plain_symbols() {
        assert_eq!(escape_html("a < b && c > d"), "a < b && c > d");
        assert_eq!(escape_html("Terms & Conditions, BP <90"), "Terms & Conditions, BP <90");
        assert_eq!(escape_html("Patient's \"notes\""), "Patient's \"notes\"");
    }

    #[test]
    fn test_escape_html_markup() {
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b>bold&lt;/b>");
        assert_eq!(escape_html("AT&T &amp; &#39; <!-- <?x"), "AT&amp;T &amp;amp; &amp;#39; &lt;!-- &lt;?x");
        assert_eq!(escape_html("trailing <"), "trailing <");
        assert_eq!(escape_html("trailing &"), "trailing &");
    }

    #[test]
    fn test_render_report_sections() {
        let html = render_report(&sample_result(), "discharge");
        for heading in ["Key Points", "Red Flags", "Your Rights (0)", "Action Items", "Plain English Version"] {
            assert!(html.contains(heading), "missing section {heading}");
        }
        assert!(html.contains("None found."));
        assert!(html.contains("Confidence: 42%"));
        assert!(html.contains("Have a professional review this document."));
        assert!(html.contains("heart attack & need rest &lt;soon>."));
        assert!(!html.contains("source-text"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_markup_items_have_literal_copies() {
        let mut result = sample_result();
        result.key_points = vec!["Swelling in <b>both</b> legs &amp; feet.".to_string()];
        result.red_flags = vec!["Pasted </textarea> into the form".to_string()];

        let html = render_report(&result, "markup");
        assert!(html.contains("<li>Swelling in &lt;b>both&lt;/b> legs &amp;amp; feet.</li>"));
        assert!(html.contains(
            "<textarea hidden readonly class=\"source-text\">Swelling in <b>both</b> legs &amp; feet.</textarea>"
        ));
        assert!(html.ends_with("<plaintext hidden class=\"source-text\">Pasted </textarea> into the form\n"));
        for item in result.key_points.iter().chain(&result.red_flags).chain(&result.action_items) {
            assert!(html.contains(item.as_str()), "missing {item:?}");
        }
    }

    #[test]
    fn test_write_report_creates_dir_and_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join("nested").join("translations");

        let path = write_report(&output_dir, &sample_result(), "first").unwrap();
        assert_eq!(path, output_dir.join("first.html"));
        assert!(path.exists());

        let mut updated = sample_result();
        updated.key_points = vec!["Updated point.".to_string()];
        write_report(&output_dir, &updated, "first").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Updated point."));
        assert!(!content.contains("You had a heart attack."));
    }
}

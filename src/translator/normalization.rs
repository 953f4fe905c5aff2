// WHY: matching and rendering both work on the cleaned document, so byte offsets
// from the matcher always index into the same string the renderer slices

/// Clean raw document text before matching.
///
/// `\r\n` and lone `\r` become `\n`; U+FFFD (left behind by lossy decoding) and
/// control characters other than `\n` and `\t` are dropped.
pub fn normalize_document(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push('\n');
            }
            '\n' | '\t' => result.push(ch),
            char::REPLACEMENT_CHARACTER => {}
            _ if ch.is_control() => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Collapse interior line breaks and runs of whitespace into single spaces
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_sentence_into(text, &mut result);
    result
}

/// Normalize sentence into supplied buffer to avoid allocation
pub fn normalize_sentence_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    // Leading whitespace is already skipped; at most one trailing space remains
    if buffer.ends_with(' ') {
        buffer.pop();
    }
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

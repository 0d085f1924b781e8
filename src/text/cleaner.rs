//! Normalization of extracted PDF text before chunking.
//!
//! PDF extractors emit typographic ligatures, smart punctuation, soft hyphens
//! at line breaks, and dot leaders from tables of contents. All of these
//! either confuse sentence splitting or produce audible noise from the TTS
//! model.

/// Multi-character replacements for typographic characters.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201c}', "\""),  // left double quote
    ('\u{201d}', "\""),  // right double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "-"),   // em dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{00a0}', " "),   // non-breaking space
    ('\u{fb00}', "ff"),  // ligature ff
    ('\u{fb01}', "fi"),  // ligature fi
    ('\u{fb02}', "fl"),  // ligature fl
    ('\u{fb03}', "ffi"), // ligature ffi
    ('\u{fb04}', "ffl"), // ligature ffl
    ('\u{00ad}', ""),    // soft hyphen
    ('\u{200b}', ""),    // zero-width space
    ('\u{feff}', ""),    // BOM
];

/// Normalize extracted text for TTS processing.
///
/// Replaces typographic characters, rejoins words hyphenated across line
/// breaks, strips control characters, collapses dot leaders and whitespace.
pub fn normalize_extracted(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(ch, _)| *ch == c) {
            Some((_, r)) => replaced.push_str(r),
            None if c == '\n' || c == '\t' || !c.is_control() => replaced.push(c),
            None => {}
        }
    }

    let rejoined = rejoin_hyphenated_lines(&replaced);
    let deleadered = collapse_period_runs(&rejoined);
    collapse_whitespace(&deleadered)
}

/// Rejoin words split across lines with a trailing hyphen ("exam-\nple").
fn rejoin_hyphenated_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' {
            // Lookahead past the newline; only rejoin when a letter follows
            let mut rest = chars.clone();
            if rest.next() == Some('\n') {
                if matches!(rest.peek(), Some(ch) if ch.is_alphabetic()) {
                    chars = rest;
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Collapse runs of two or more periods into a single period.
fn collapse_period_runs(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0usize;

    for c in text.chars() {
        if c == '.' {
            run += 1;
            if run == 1 {
                result.push('.');
            }
        } else {
            run = 0;
            result.push(c);
        }
    }

    result
}

/// Collapse whitespace runs into a single space and trim the result.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                result.push(' ');
                in_space = true;
            }
        } else {
            in_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

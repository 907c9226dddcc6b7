//! Turns raw, unpunctuated recognizer output into display-ready prose.
//!
//! The engine emits no punctuation; a run of two or more whitespace
//! characters (or any newline) is the proxy for a speech pause. Each stage
//! operates on the output of the previous one, and the whole pipeline is
//! pure: same input and language, same output.

use crate::lang;

/// Normalize raw recognizer text for display.
///
/// Stages: split into sentence fragments, append terminal punctuation per
/// fragment, rejoin, capitalize sentence starts, normalize spacing.
/// Empty or whitespace-only input yields an empty string.
pub fn normalize(raw: &str, language: &str) -> String {
    let fragments = split_fragments(raw);

    let punctuated: Vec<String> = fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| punctuate(fragment, language))
        .collect();

    let joined = punctuated.join(" ");
    let capitalized = capitalize_sentences(&joined);
    normalize_spacing(&capitalized)
}

/// Split on runs of two-or-more whitespace characters or newlines.
///
/// Single spaces stay inside a fragment; a lone tab is normalized to a space.
fn split_fragments(raw: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0usize;
    let mut run_has_newline = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            whitespace_run += 1;
            run_has_newline |= ch == '\n' || ch == '\r';
        } else {
            if whitespace_run > 0 {
                if whitespace_run >= 2 || run_has_newline {
                    fragments.push(std::mem::take(&mut current));
                } else if !current.is_empty() {
                    current.push(' ');
                }
                whitespace_run = 0;
                run_has_newline = false;
            }
            current.push(ch);
        }
    }
    fragments.push(current);
    fragments
}

/// Append `?` or `.` to a fragment that lacks terminal punctuation.
///
/// The question heuristic tests the first whitespace-delimited token,
/// lowercased, against the language's interrogative lead words.
fn punctuate(fragment: &str, language: &str) -> String {
    if fragment.ends_with(['.', '!', '?']) {
        return fragment.to_string();
    }

    let first_word = fragment
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    let mark = if lang::interrogatives(language).contains(&first_word.as_str()) {
        '?'
    } else {
        '.'
    };

    format!("{fragment}{mark}")
}

/// Uppercase the first letter of the string and the first letter after
/// `.`, `!` or `?` plus optional whitespace.
fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;

    for ch in text.chars() {
        if capitalize_next {
            if ch.is_whitespace() {
                out.push(ch);
                continue;
            }
            if ch.is_alphabetic() {
                out.extend(ch.to_uppercase());
                capitalize_next = false;
                continue;
            }
            // A digit or symbol consumes the pending capitalization unless it
            // is itself a sentence terminator.
            capitalize_next = matches!(ch, '.' | '!' | '?');
            out.push(ch);
        } else {
            out.push(ch);
            if matches!(ch, '.' | '!' | '?') {
                capitalize_next = true;
            }
        }
    }
    out
}

/// Collapse whitespace runs, ensure a space after sentence terminators that
/// precede a capital letter, ensure a space after commas, and trim.
fn normalize_spacing(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            continue;
        }

        out.push(ch);

        let next = chars.get(i + 1);
        match ch {
            '.' | '!' | '?' => {
                if let Some(&next) = next
                    && !next.is_whitespace()
                    && next.is_uppercase()
                {
                    out.push(' ');
                }
            }
            ',' => {
                if let Some(&next) = next
                    && !next.is_whitespace()
                {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }

    out.trim().to_string()
}

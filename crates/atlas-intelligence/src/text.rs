// ABOUTME: Text normalisation and token-boundary phrase matching helpers
// ABOUTME: Shared by the catalog vocabulary builder and the language understanding stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Phrase matching works on normalised text: lowercase, hyphens, underscores
//! and slashes turned into spaces, curly apostrophes straightened, whitespace
//! collapsed. All spans produced here index into the normalised string.

use atlas_core::models::Span;

/// Normalise text for matching
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        let c = match c {
            '-' | '_' | '/' => ' ',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        };
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// Characters that continue a token
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

fn boundary_before(haystack: &str, start: usize) -> bool {
    haystack[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c))
}

fn boundary_at(haystack: &str, end: usize) -> bool {
    haystack[end..]
        .chars()
        .next()
        .is_none_or(|c| !is_word_char(c))
}

/// English plural suffix for a phrase ("lunch" -> "es", "burpee" -> "s")
fn plural_suffix(phrase: &str) -> &'static str {
    if ["s", "x", "z", "ch", "sh"].iter().any(|e| phrase.ends_with(e)) {
        "es"
    } else {
        "s"
    }
}

/// Find every token-bounded occurrence of `phrase` in `haystack`
///
/// Both inputs must already be normalised. With `allow_plural`, a directly
/// following plural suffix is absorbed into the span.
#[must_use]
pub fn find_phrase(haystack: &str, phrase: &str, allow_plural: bool) -> Vec<Span> {
    if phrase.is_empty() {
        return Vec::new();
    }
    let mut spans = Vec::new();
    for (start, matched) in haystack.match_indices(phrase) {
        if !boundary_before(haystack, start) {
            continue;
        }
        let end = start + matched.len();
        if boundary_at(haystack, end) {
            spans.push(Span { start, end });
            continue;
        }
        if allow_plural {
            let suffix = plural_suffix(phrase);
            if haystack[end..].starts_with(suffix) && boundary_at(haystack, end + suffix.len()) {
                spans.push(Span {
                    start,
                    end: end + suffix.len(),
                });
            }
        }
    }
    spans
}

/// Whether `phrase` occurs anywhere in `haystack` on token boundaries
#[must_use]
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    !find_phrase(haystack, phrase, false).is_empty()
}

/// Whether any of the phrases occurs in `haystack`
#[must_use]
pub fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(haystack, p))
}

/// Turn a kebab-case key into display words ("muscle-gain" -> "muscle gain")
#[must_use]
pub fn humanize(key: &str) -> String {
    key.replace('-', " ")
}

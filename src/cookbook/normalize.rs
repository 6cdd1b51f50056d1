// src/cookbook/normalize.rs

//! Name normalization
//!
//! Turns handwritten names like `"chicken-nuggET"` into display names like
//! `"Chicken Nugget"`. Hyphen and underscore runs become word breaks, every
//! character that is not an ASCII letter or a space is dropped, and each
//! remaining word is capitalized and joined by a single space.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("separator pattern is valid"));

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z ]+").expect("letter pattern is valid"));

/// Normalize a free-form name into its canonical display form
///
/// Returns [`Error::UnparsableName`] when nothing is left after stripping.
/// Pure: never touches the cookbook.
pub fn normalize_name(raw: &str) -> Result<String> {
    let spaced = SEPARATORS.replace_all(raw, " ");
    let letters = NON_LETTERS.replace_all(&spaced, "");

    let words: Vec<String> = letters.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        return Err(Error::UnparsableName(raw.to_string()));
    }

    Ok(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(lower.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

//! String analysis
//!
//! Characters are Unicode scalar values (`char`). A string made of one base
//! letter plus a combining mark therefore has length 2.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Derived facts about one input string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// The input, unchanged
    pub string: String,
    /// Number of `char`s
    pub length: usize,
    pub is_palindrome: bool,
    /// Whitespace-delimited tokens
    pub word_count: usize,
    pub unique_characters: usize,
    /// Occurrences per exact (case-sensitive) character
    pub character_frequency: BTreeMap<char, usize>,
    /// Lowercase hex SHA-256 of the UTF-8 bytes
    pub sha256: String,
}

impl AsRef<AnalysisRecord> for AnalysisRecord {
    fn as_ref(&self) -> &AnalysisRecord {
        self
    }
}

/// Analyse a string. Total: every input, including the empty string, yields a record.
pub fn analyse(value: &str) -> AnalysisRecord {
    let character_frequency = character_frequency(value);

    AnalysisRecord {
        string: value.to_string(),
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        word_count: value.split_whitespace().count(),
        unique_characters: character_frequency.len(),
        character_frequency,
        sha256: sha256_hex(value),
    }
}

/// True when the ASCII-alphanumeric, lowercased projection is non-empty and
/// reads the same reversed.
pub fn is_palindrome(value: &str) -> bool {
    let cleaned: Vec<char> = value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    !cleaned.is_empty() && cleaned.iter().eq(cleaned.iter().rev())
}

fn character_frequency(value: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for c in value.chars() {
        *frequency.entry(c).or_insert(0) += 1;
    }
    frequency
}

fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

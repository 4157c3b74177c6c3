//! Letterforms to trace for a phoneme

use super::normalize::{normalize, resolve_asset_code};
use serde::Serialize;
use std::fmt;

/// Phonemes traced as a fixed letter sequence regardless of written length.
/// Keys are normalized phonemes or resolved asset codes.
const LETTER_OVERRIDES: &[(&str, &[&str])] = &[
    ("OO", &["O"]),
    ("OO LONG", &["O"]),
    ("OOL", &["O"]),
    ("TH", &["T", "H"]),
    ("TH VOICED", &["T", "H"]),
    ("THV", &["T", "H"]),
];

/// One traceable glyph, always upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TracingKey(String);

impl TracingKey {
    pub fn new(letter: &str) -> Self {
        Self(letter.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<char> for TracingKey {
    fn from(c: char) -> Self {
        Self(c.to_uppercase().collect())
    }
}

impl fmt::Display for TracingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn override_for(key: &str) -> Option<&'static [&'static str]> {
    LETTER_OVERRIDES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, letters)| *letters)
}

/// Letterforms a learner traces for `phoneme`, in writing order
///
/// Overrides win; otherwise two-character phonemes split into both letters and
/// anything else is traced as a single key. Empty input yields no keys.
pub fn tracing_letters(phoneme: &str) -> Vec<TracingKey> {
    let key = normalize(phoneme);
    if key.is_empty() {
        return Vec::new();
    }

    if let Some(letters) = override_for(&key).or_else(|| override_for(&resolve_asset_code(&key)))
    {
        return letters.iter().map(|l| TracingKey::new(l)).collect();
    }

    let chars: Vec<char> = key.chars().collect();
    if chars.len() == 2 {
        chars.into_iter().map(TracingKey::from).collect()
    } else {
        vec![TracingKey(key)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(letters: &[&str]) -> Vec<TracingKey> {
        letters.iter().map(|l| TracingKey::new(l)).collect()
    }

    #[test]
    fn test_th_variants_trace_t_h() {
        assert_eq!(tracing_letters("TH"), keys(&["T", "H"]));
        assert_eq!(tracing_letters("TH VOICED"), keys(&["T", "H"]));
        assert_eq!(tracing_letters("th voiced"), keys(&["T", "H"]));
    }

    #[test]
    fn test_double_vowels_trace_single_vowel() {
        assert_eq!(tracing_letters("OO"), keys(&["O"]));
        assert_eq!(tracing_letters("OO LONG"), keys(&["O"]));
        assert_eq!(tracing_letters("OOL"), keys(&["O"]));
    }

    #[test]
    fn test_two_letter_phonemes_split() {
        assert_eq!(tracing_letters("CH"), keys(&["C", "H"]));
        assert_eq!(tracing_letters("sh"), keys(&["S", "H"]));
        assert_eq!(tracing_letters("QU"), keys(&["Q", "U"]));
    }

    #[test]
    fn test_single_letter_phoneme() {
        assert_eq!(tracing_letters("X"), keys(&["X"]));
        assert_eq!(tracing_letters("a"), keys(&["A"]));
    }

    #[test]
    fn test_longer_phoneme_is_one_key() {
        assert_eq!(tracing_letters("IGH"), keys(&["IGH"]));
    }

    #[test]
    fn test_empty_phoneme_has_no_keys() {
        assert!(tracing_letters("").is_empty());
        assert!(tracing_letters("  ").is_empty());
    }

    #[test]
    fn test_every_curriculum_phoneme_has_letters() {
        for code in crate::phonics::CURRICULUM {
            assert!(!tracing_letters(code).is_empty(), "phoneme {}", code);
        }
    }

    #[test]
    fn test_tracing_key_from_char() {
        assert_eq!(TracingKey::from('s'), TracingKey::new("S"));
        assert_eq!(TracingKey::new(" h ").to_string(), "H");
    }
}

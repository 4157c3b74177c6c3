//! Curriculum order and recap window selection

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Number of previously taught phonemes shown for review
pub const RECAP_WINDOW_LEN: usize = 6;

/// Teaching progression, first taught first
pub const CURRICULUM: &[&str] = &[
    "S", "A", "T", "I", "P", "N", //
    "CK", "E", "H", "R", "M", "D", //
    "G", "O", "U", "L", "F", "B", //
    "AI", "J", "OA", "IE", "EE", "OR", //
    "Z", "W", "NG", "V", "OO", "OO LONG", //
    "Y", "X", "CH", "SH", "TH", "TH VOICED", //
    "QU", "OU", "OI", "UE", "ER", "AR",
];

static CURRICULUM_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CURRICULUM
        .iter()
        .enumerate()
        .map(|(idx, code)| (*code, idx))
        .collect()
});

/// Position of a phoneme in the curriculum (case-insensitive)
pub fn position(phoneme: &str) -> Option<usize> {
    let key = phoneme.trim().to_uppercase();
    CURRICULUM_INDEX.get(key.as_str()).copied()
}

/// Phonemes taught immediately before `current`, oldest first
///
/// Returns up to [`RECAP_WINDOW_LEN`] codes, clipped at the start of the
/// curriculum. Unknown phonemes get an empty window.
pub fn recap_window(current: &str) -> Vec<&'static str> {
    match position(current) {
        Some(idx) => {
            let start = idx.saturating_sub(RECAP_WINDOW_LEN);
            CURRICULUM[start..idx].to_vec()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curriculum_has_no_duplicates() {
        assert_eq!(CURRICULUM_INDEX.len(), CURRICULUM.len());
    }

    #[test]
    fn test_window_length_and_slice_for_every_phoneme() {
        for (idx, code) in CURRICULUM.iter().enumerate() {
            let window = recap_window(code);
            assert_eq!(window.len(), idx.min(RECAP_WINDOW_LEN), "phoneme {}", code);
            assert_eq!(window, &CURRICULUM[idx - window.len()..idx]);
            assert!(!window.contains(code));
        }
    }

    #[test]
    fn test_first_phoneme_has_empty_window() {
        assert!(recap_window("S").is_empty());
    }

    #[test]
    fn test_window_is_clipped_near_start() {
        assert_eq!(recap_window("P"), vec!["S", "A", "T", "I"]);
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            recap_window("SH"),
            vec!["V", "OO", "OO LONG", "Y", "X", "CH"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(recap_window("sh"), recap_window("SH"));
        assert_eq!(recap_window("oo long"), recap_window("OO LONG"));
    }

    #[test]
    fn test_unknown_phoneme_has_empty_window() {
        assert!(recap_window("ZZ").is_empty());
        assert!(recap_window("").is_empty());
    }
}

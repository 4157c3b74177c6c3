//! Label normalization and asset-code resolution

use unicode_normalization::UnicodeNormalization;

/// Labels whose recorded asset does not follow the spelled-out name.
/// Keys are normalized labels.
const IRREGULAR_ASSET_CODES: &[(&str, &str)] = &[("OO LONG", "OOL"), ("TH VOICED", "THV")];

/// Canonicalize a display label into an asset-lookup key
///
/// Compatibility-decomposes the text, turns en/em dashes into `-`, keeps only
/// letters, digits, hyphens and spaces, trims and upper-cases.
pub fn normalize(label: &str) -> String {
    let kept: String = label
        .nfkd()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == ' ')
        .collect();
    kept.trim().to_uppercase()
}

/// Normalize a label and map it through the irregular-name table
pub fn resolve_asset_code(label: &str) -> String {
    let key = normalize(label);
    IRREGULAR_ASSET_CODES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_and_trims() {
        assert_eq!(normalize("  cat "), "CAT");
        assert_eq!(normalize("sh"), "SH");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("café"), "CAFE");
        assert_eq!(normalize("naïve"), "NAIVE");
    }

    #[test]
    fn test_normalize_compatibility_forms() {
        // Full-width letters and the "fi" ligature decompose to plain ASCII
        assert_eq!(normalize("ｃａｔ"), "CAT");
        assert_eq!(normalize("ﬁsh"), "FISH");
    }

    #[test]
    fn test_normalize_dashes_and_punctuation() {
        assert_eq!(normalize("oo – long"), "OO - LONG");
        assert_eq!(normalize("th—voiced"), "TH-VOICED");
        assert_eq!(normalize("it's!"), "ITS");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_resolve_irregular_names() {
        assert_eq!(resolve_asset_code("OO LONG"), "OOL");
        assert_eq!(resolve_asset_code("oo long"), "OOL");
        assert_eq!(resolve_asset_code("TH VOICED"), "THV");
    }

    #[test]
    fn test_resolve_passes_through_regular_names() {
        assert_eq!(resolve_asset_code("sh"), "SH");
        assert_eq!(resolve_asset_code("OO"), "OO");
        assert_eq!(resolve_asset_code("cat"), "CAT");
    }
}

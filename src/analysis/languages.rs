use crate::types::{LanguageShare, LanguageShareMap};

/// Each language's percentage of the repository's total bytes.
///
/// Empty when there are no languages or every count is zero. Order follows
/// the input map.
pub fn language_shares(languages: &LanguageShareMap) -> Vec<LanguageShare> {
    let total: u64 = languages.iter().map(|(_, bytes)| *bytes).sum();
    if total == 0 {
        return Vec::new();
    }

    languages
        .iter()
        .map(|(language, bytes)| LanguageShare {
            language: language.clone(),
            percent: *bytes as f64 / total as f64 * 100.0,
        })
        .collect()
}

/// Normalize two repositories' languages, each against its own total.
pub fn compare_language_shares(
    first: &LanguageShareMap,
    second: &LanguageShareMap,
) -> (Vec<LanguageShare>, Vec<LanguageShare>) {
    (language_shares(first), language_shares(second))
}

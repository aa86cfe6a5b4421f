use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::CharFilter;

/// A char filter that folds accented Latin letters to their ASCII base.
///
/// The text is decomposed (NFD) and the combining marks are dropped, so
/// "crème fraîche" becomes "creme fraiche" and "jalapeño" becomes "jalapeno".
#[derive(Clone, Debug, Default)]
pub struct AccentFoldingCharFilter;

impl AccentFoldingCharFilter {
    pub fn new() -> Self {
        AccentFoldingCharFilter
    }
}

impl CharFilter for AccentFoldingCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            return input.to_string();
        }
        input.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }

    fn name(&self) -> &'static str {
        "accent_fold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_vowels_and_tilde() {
        let filter = AccentFoldingCharFilter::new();
        assert_eq!(filter.filter("crème fraîche"), "creme fraiche");
        assert_eq!(filter.filter("jalapeño"), "jalapeno");
        assert_eq!(filter.filter("ÀÉÎÕÜÝ"), "AEIOUY");
    }

    #[test]
    fn test_ascii_untouched() {
        let filter = AccentFoldingCharFilter::new();
        assert_eq!(filter.filter("1 t. salt"), "1 t. salt");
    }
}

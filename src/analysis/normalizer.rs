//! Input normalization pipeline.
//!
//! A [`Normalizer`] runs a sequence of char filters over a raw ingredient
//! line. The default pipeline folds accents, collapses runs of spaces and
//! lowercases, which is the form every grammar template expects.
//!
//! # Examples
//!
//! ```
//! use sous::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! assert_eq!(normalizer.normalize("2  Cups  Crème Fraîche"), "2 cups creme fraiche");
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::accent_fold::AccentFoldingCharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::whitespace::WhitespaceCollapseCharFilter;

/// A chain of char filters applied in the order they were added.
#[derive(Clone)]
pub struct Normalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::empty()
            .add_char_filter(Arc::new(AccentFoldingCharFilter::new()))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
    }
}

impl Normalizer {
    /// A normalizer that leaves text untouched.
    pub fn empty() -> Self {
        Normalizer {
            char_filters: Vec::new(),
        }
    }

    /// Add a char filter to the end of the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Names of the filters in pipeline order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.char_filters.iter().map(|f| f.name()).collect()
    }

    pub fn normalize(&self, input: &str) -> String {
        self.char_filters
            .iter()
            .fold(input.to_string(), |text, filter| filter.filter(&text))
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("char_filters", &self.filter_names())
            .finish()
    }
}

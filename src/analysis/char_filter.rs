//! Char filter implementations for input normalization.
//!
//! Char filters rewrite the raw ingredient line before any grammar template
//! sees it. Templates and vocabulary keys are written in the normalized
//! alphabet (lowercase ASCII, single spaces), so every filter here moves text
//! towards that form.
//!
//! # Available Filters
//!
//! - [`accent_fold::AccentFoldingCharFilter`] - Strips diacritics ("jalapeño" → "jalapeno")
//! - [`whitespace::WhitespaceCollapseCharFilter`] - Collapses whitespace runs and trims the ends
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the text
//!
//! # Examples
//!
//! ```
//! use sous::analysis::char_filter::CharFilter;
//! use sous::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("2 Cups FLOUR"), "2 cups flour");
//! ```

/// Trait for character filters that transform text before parsing.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod accent_fold;
pub mod lowercase;
pub mod whitespace;

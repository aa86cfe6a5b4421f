//! Text normalization applied to ingredient lines before matching.

pub mod char_filter;
pub mod normalizer;

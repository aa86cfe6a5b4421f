use std::sync::LazyLock;

use regex::Regex;

use super::CharFilter;

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("space run pattern is valid"));

/// A char filter that collapses runs of two or more spaces to one. Tabs and
/// single leading or trailing spaces are left in place.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceCollapseCharFilter;

impl WhitespaceCollapseCharFilter {
    pub fn new() -> Self {
        WhitespaceCollapseCharFilter
    }
}

impl CharFilter for WhitespaceCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        SPACE_RUN.replace_all(input, " ").into_owned()
    }

    fn name(&self) -> &'static str {
        "whitespace_collapse"
    }
}

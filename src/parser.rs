//! Ingredient line parser.
//!
//! A [`Parser`] owns a [`VocabularyStore`] and an ordered list of
//! [`GrammarTemplate`]s. Each line is normalized, then tried against the
//! templates in order; the first template whose match resolves to a
//! `Match`, `PartialMatch` or `AnomalousMatch` wins. When none does, the
//! most advanced failure seen across all attempts is reported.
//!
//! # Examples
//!
//! ```
//! use sous::parser::Parser;
//! use sous::parser::result::MatchResult;
//! use sous::vocabulary::json::JsonVocabulary;
//! use sous::vocabulary::store::VocabularyStore;
//!
//! let json = r#"{
//!     "forms": [{"id": "00000000-0000-0000-0000-000000000011",
//!                "ingredient_id": "00000000-0000-0000-0000-000000000001",
//!                "name": "flour", "conversion_type": "volume"}],
//!     "ingredients": [{"id": "00000000-0000-0000-0000-000000000001",
//!                      "name": "flour", "conversion_type": "volume",
//!                      "default_pairings": {"volume": "00000000-0000-0000-0000-000000000011"}}]
//! }"#;
//! let vocabulary = VocabularyStore::load(&JsonVocabulary::from_json(json).unwrap()).unwrap();
//! let parser = Parser::with_default_grammar(vocabulary).unwrap();
//!
//! let result = parser.parse("5 1/2 Cups  Flour");
//! assert_eq!(result.status(), MatchResult::Match);
//! assert_eq!(result.usage().unwrap().amount.low, 5.5);
//! ```

pub mod config;
pub mod resolver;
pub mod result;

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::normalizer::Normalizer;
use crate::error::Result;
use crate::grammar::config::GrammarConfig;
use crate::grammar::template::GrammarTemplate;
use crate::parser::config::ParserConfig;
use crate::parser::resolver::Resolver;
use crate::parser::result::{MatchResult, ParseResult};
use crate::vocabulary::store::VocabularyStore;

/// Callback invoked with the original line and its classification whenever
/// a line matches no template.
pub type NoMatchHook = Box<dyn Fn(&str, MatchResult) + Send + Sync>;

/// Number of lines a template has matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateStats {
    pub pattern: String,
    pub hits: u64,
}

struct RegisteredTemplate {
    template: GrammarTemplate,
    hits: AtomicU64,
}

pub struct Parser {
    vocabulary: VocabularyStore,
    templates: Vec<RegisteredTemplate>,
    normalizer: Normalizer,
    resolver: Resolver,
    on_no_match: Option<NoMatchHook>,
    trace_no_match: bool,
}

impl Parser {
    /// Create a parser trying `templates` in the given order.
    pub fn new(vocabulary: VocabularyStore, templates: Vec<GrammarTemplate>) -> Self {
        Parser {
            vocabulary,
            templates: templates
                .into_iter()
                .map(|template| RegisteredTemplate {
                    template,
                    hits: AtomicU64::new(0),
                })
                .collect(),
            normalizer: Normalizer::default(),
            resolver: Resolver::new(),
            on_no_match: None,
            trace_no_match: false,
        }
    }

    /// Create a parser using the built-in grammar.
    pub fn with_default_grammar(vocabulary: VocabularyStore) -> Result<Self> {
        Ok(Self::new(vocabulary, GrammarConfig::default().compile()?))
    }

    pub fn from_config(vocabulary: VocabularyStore, config: &ParserConfig) -> Result<Self> {
        let mut parser = Self::new(vocabulary, config.grammar.compile()?);
        parser.trace_no_match = config.trace_no_match;
        Ok(parser)
    }

    /// Register a callback for lines no template matched. It does not affect
    /// the returned result.
    pub fn on_no_match<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, MatchResult) + Send + Sync + 'static,
    {
        self.on_no_match = Some(Box::new(hook));
        self
    }

    /// Use a different normalizer for incoming lines.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn normalize(&self, input: &str) -> String {
        self.normalizer.normalize(input)
    }

    /// Parse one ingredient line.
    pub fn parse(&self, input: &str) -> ParseResult {
        let normalized = self.normalize(input);
        let mut best = MatchResult::None;

        for entry in &self.templates {
            let Some(data) = entry.template.parse(&normalized, &self.vocabulary) else {
                continue;
            };

            let result = self
                .resolver
                .resolve(input, &entry.template, data, &self.vocabulary);
            if result.is_match() {
                entry.hits.fetch_add(1, Ordering::Relaxed);
                debug!("'{input}' matched '{}' ({})", entry.template, result.status());
                return result;
            }
            best = best.max(result.status());
        }

        if self.trace_no_match {
            debug!("No template matched '{input}' (best: {best})");
        }
        if let Some(hook) = &self.on_no_match {
            hook(input, best);
        }

        ParseResult::NoMatch {
            input: input.to_string(),
            status: best,
        }
    }

    /// Parse many lines in parallel. Results keep the order of `lines`.
    pub fn parse_all<S>(&self, lines: &[S]) -> Vec<ParseResult>
    where
        S: AsRef<str> + Sync,
    {
        lines.par_iter().map(|line| self.parse(line.as_ref())).collect()
    }

    pub fn templates(&self) -> impl Iterator<Item = &GrammarTemplate> {
        self.templates.iter().map(|entry| &entry.template)
    }

    /// Hit counts per template, in evaluation order.
    pub fn template_stats(&self) -> Vec<TemplateStats> {
        self.templates
            .iter()
            .map(|entry| TemplateStats {
                pattern: entry.template.pattern().to_string(),
                hits: entry.hits.load(Ordering::Relaxed),
            })
            .collect()
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    /// Mutable access for rebuilding vocabulary tables between parses.
    pub fn vocabulary_mut(&mut self) -> &mut VocabularyStore {
        &mut self.vocabulary
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("templates", &self.templates.len())
            .field("normalizer", &self.normalizer)
            .field("has_no_match_hook", &self.on_no_match.is_some())
            .finish()
    }
}

//! Grammar templates such as `"[AMT] [UNIT] of [ING], [PREP]"`.
//!
//! A template compiles into a sequence of literal text and placeholders.
//! Matching walks the sequence left to right against normalized input:
//! literals must appear verbatim, each placeholder hands the remaining input
//! to its [`TokenReader`](crate::grammar::token::TokenReader), and the whole
//! line must be consumed. Readers never backtrack, so a placeholder that
//! consumed too much makes the template fail rather than retry shorter.

use std::fmt;

use log::trace;

use crate::error::{Result, SousError};
use crate::grammar::match_data::MatchData;
use crate::grammar::token::TokenKind;
use crate::vocabulary::store::VocabularyStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    Literal(String),
    Token(TokenKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarTemplate {
    pattern: String,
    elements: Vec<TemplateElement>,
    allow_partial: bool,
    default_prep: Option<String>,
}

impl GrammarTemplate {
    /// Compile a pattern.
    ///
    /// Fails on an empty pattern, an unterminated or unknown placeholder, or
    /// a pattern with neither `[ING]` nor `[ANOMALY]`.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(SousError::template("Template pattern is empty"));
        }

        let mut elements = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find(']').ok_or_else(|| {
                SousError::template(format!("Unterminated placeholder in template '{pattern}'"))
            })?;

            let name = &after[..close];
            let kind = TokenKind::from_placeholder(name).ok_or_else(|| {
                SousError::template(format!(
                    "Unknown placeholder '[{name}]' in template '{pattern}'"
                ))
            })?;

            if !literal.is_empty() {
                elements.push(TemplateElement::Literal(literal.to_lowercase()));
                literal.clear();
            }
            elements.push(TemplateElement::Token(kind));
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            elements.push(TemplateElement::Literal(literal.to_lowercase()));
        }

        let names_ingredient = elements.iter().any(|element| {
            matches!(
                element,
                TemplateElement::Token(TokenKind::Ingredient | TokenKind::Anomaly)
            )
        });
        if !names_ingredient {
            return Err(SousError::template(format!(
                "Template '{pattern}' needs an [ING] or [ANOMALY] placeholder"
            )));
        }

        Ok(GrammarTemplate {
            pattern: pattern.to_string(),
            elements,
            allow_partial: false,
            default_prep: None,
        })
    }

    /// Accept lines that name an ingredient without an amount.
    pub fn with_allow_partial(mut self, allow_partial: bool) -> Self {
        self.allow_partial = allow_partial;
        self
    }

    /// Prep note reported when a match collected none ("to taste").
    pub fn with_default_prep(mut self, prep: impl Into<String>) -> Self {
        self.default_prep = Some(prep.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn elements(&self) -> &[TemplateElement] {
        &self.elements
    }

    pub fn allow_partial(&self) -> bool {
        self.allow_partial
    }

    pub fn default_prep(&self) -> Option<&str> {
        self.default_prep.as_deref()
    }

    /// Match normalized `input` against this template.
    ///
    /// Returns the collected data only when every element matched in order
    /// and nothing is left over.
    pub fn parse(&self, input: &str, vocabulary: &VocabularyStore) -> Option<MatchData> {
        let mut data = MatchData::new();
        let mut position = 0;

        for element in &self.elements {
            let rest = &input[position..];
            match element {
                TemplateElement::Literal(text) => {
                    if !rest.starts_with(text.as_str()) {
                        trace!("'{}': expected '{text}' at {position}", self.pattern);
                        return None;
                    }
                    position += text.len();
                }
                TemplateElement::Token(kind) => {
                    let reader = kind.reader();
                    let Some(consumed) = reader.read(rest, vocabulary, &mut data) else {
                        trace!("'{}': {} reader failed at {position}", self.pattern, reader.name());
                        return None;
                    };
                    position += consumed;
                }
            }
        }

        if position != input.len() {
            trace!("'{}': unconsumed '{}'", self.pattern, &input[position..]);
            return None;
        }

        if data.preps.is_empty() {
            if let Some(prep) = &self.default_prep {
                data.preps.push(prep.as_str());
            }
        }
        Some(data)
    }
}

impl fmt::Display for GrammarTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::units::Units;

    #[test]
    fn test_compile_elements() {
        let template = GrammarTemplate::compile("[AMT] [UNIT] of [ING], [PREP]").unwrap();
        assert_eq!(
            template.elements(),
            &[
                TemplateElement::Token(TokenKind::Amount),
                TemplateElement::Literal(" ".into()),
                TemplateElement::Token(TokenKind::Unit),
                TemplateElement::Literal(" of ".into()),
                TemplateElement::Token(TokenKind::Ingredient),
                TemplateElement::Literal(", ".into()),
                TemplateElement::Token(TokenKind::Prep),
            ]
        );
        assert!(!template.allow_partial());
    }

    #[test]
    fn test_compile_errors() {
        for pattern in ["", "   ", "[AMT] [ING", "[QTY] [ING]", "[AMT] [UNIT]"] {
            let err = GrammarTemplate::compile(pattern).unwrap_err();
            assert!(matches!(err, SousError::Template(_)), "{pattern:?}");
        }
        assert!(GrammarTemplate::compile("[AMT] [ANOMALY]").is_ok());
    }

    #[test]
    fn test_literals_are_lowercased() {
        let template = GrammarTemplate::compile("[ING] To Taste").unwrap();
        assert_eq!(
            template.elements()[1],
            TemplateElement::Literal(" to taste".into())
        );
    }

    #[test]
    fn test_parse_full_line() {
        let vocabulary = fixtures::vocabulary();
        let template = GrammarTemplate::compile("[AMT] [UNIT] [ING]").unwrap();
        let data = template.parse("5 1/2 cups flour", &vocabulary).unwrap();
        assert_eq!(data.amount.map(|a| (a.low, a.unit)), Some((5.5, Units::Cup)));
        assert!(data.ingredient.is_some());
    }

    #[test]
    fn test_parse_requires_whole_input() {
        let vocabulary = fixtures::vocabulary();
        let template = GrammarTemplate::compile("[AMT] [UNIT] [ING]").unwrap();
        assert!(template.parse("2 cups flour.", &vocabulary).is_none());
        assert!(template.parse("2 cups", &vocabulary).is_none());
    }

    #[test]
    fn test_default_prep_applies_only_without_preps() {
        let vocabulary = fixtures::vocabulary();
        let template = GrammarTemplate::compile("[ING] to taste")
            .unwrap()
            .with_allow_partial(true)
            .with_default_prep("to taste");
        let data = template.parse("salt to taste", &vocabulary).unwrap();
        assert_eq!(data.preps.joined().as_deref(), Some("to taste"));

        let data = template.parse("ripe bananas to taste", &vocabulary).unwrap();
        assert_eq!(data.preps.joined().as_deref(), Some("ripe"));
    }
}

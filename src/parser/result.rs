//! Outcome types reported by the parser.

use std::fmt;

use serde::Serialize;

use crate::units::Amount;
use crate::vocabulary::node::{Form, Ingredient};

/// How far a line got, ordered from least to most successful.
///
/// When no template produces a result the parser reports the greatest value
/// any attempt reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// No template matched the line.
    None,
    /// A custom unit with no pairing for the ingredient.
    UnknownUnit,
    /// No form was given and the ingredient has no default for the amount's unit type.
    NoForm,
    /// A form word with no pairing for the ingredient.
    UnknownForm,
    /// The form cannot be measured in the amount's unit type.
    IncompatibleForm,
    /// An ingredient without an amount.
    PartialMatch,
    Match,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchResult::None => "no match",
            MatchResult::UnknownUnit => "unknown unit",
            MatchResult::NoForm => "no form",
            MatchResult::UnknownForm => "unknown form",
            MatchResult::IncompatibleForm => "incompatible form",
            MatchResult::PartialMatch => "partial match",
            MatchResult::Match => "match",
        };
        f.write_str(name)
    }
}

/// Corrections the resolver applied to reach a consistent result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalousResult {
    /// A prep note was promoted to the form.
    Fallthrough,
    /// The form was swapped for the ingredient's default for the amount's unit type.
    AutoConvert,
}

impl fmt::Display for AnomalousResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalousResult::Fallthrough => f.write_str("fallthrough"),
            AnomalousResult::AutoConvert => f.write_str("auto convert"),
        }
    }
}

/// A fully resolved ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientUsage {
    pub ingredient: Ingredient,
    pub amount: Amount,
    pub form: Form,
    /// Prep notes joined with `//`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ParseResult {
    Match {
        input: String,
        usage: IngredientUsage,
    },
    PartialMatch {
        input: String,
        ingredient: Ingredient,
        #[serde(skip_serializing_if = "Option::is_none")]
        prep_note: Option<String>,
    },
    AnomalousMatch {
        input: String,
        usage: IngredientUsage,
        anomaly: AnomalousResult,
    },
    NoMatch {
        input: String,
        status: MatchResult,
    },
}

impl ParseResult {
    /// The line as it was given to the parser.
    pub fn input(&self) -> &str {
        match self {
            ParseResult::Match { input, .. }
            | ParseResult::PartialMatch { input, .. }
            | ParseResult::AnomalousMatch { input, .. }
            | ParseResult::NoMatch { input, .. } => input,
        }
    }

    pub fn status(&self) -> MatchResult {
        match self {
            ParseResult::Match { .. } | ParseResult::AnomalousMatch { .. } => MatchResult::Match,
            ParseResult::PartialMatch { .. } => MatchResult::PartialMatch,
            ParseResult::NoMatch { status, .. } => *status,
        }
    }

    pub fn usage(&self) -> Option<&IngredientUsage> {
        match self {
            ParseResult::Match { usage, .. } | ParseResult::AnomalousMatch { usage, .. } => {
                Some(usage)
            }
            _ => None,
        }
    }

    pub fn ingredient(&self) -> Option<&Ingredient> {
        match self {
            ParseResult::Match { usage, .. } | ParseResult::AnomalousMatch { usage, .. } => {
                Some(&usage.ingredient)
            }
            ParseResult::PartialMatch { ingredient, .. } => Some(ingredient),
            ParseResult::NoMatch { .. } => None,
        }
    }

    pub fn prep_note(&self) -> Option<&str> {
        match self {
            ParseResult::Match { usage, .. } | ParseResult::AnomalousMatch { usage, .. } => {
                usage.prep_note.as_deref()
            }
            ParseResult::PartialMatch { prep_note, .. } => prep_note.as_deref(),
            ParseResult::NoMatch { .. } => None,
        }
    }

    pub fn anomaly(&self) -> Option<AnomalousResult> {
        match self {
            ParseResult::AnomalousMatch { anomaly, .. } => Some(*anomaly),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, ParseResult::NoMatch { .. })
    }
}

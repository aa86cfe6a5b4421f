//! # Sous
//!
//! A grammar-driven parser for free-text recipe ingredient lines.
//!
//! Lines such as "2 cups shredded cheddar cheese" or "a dozen ripe bananas,
//! sliced" are matched against an ordered list of grammar templates backed by
//! trie-indexed vocabularies, then resolved into an ingredient, an amount, a
//! form and a prep note.
//!
//! ## Features
//!
//! - Prefix-trie synonym indexes for ingredients, units, forms and prep notes
//! - Configurable template grammar (`"[AMT] [UNIT] of [ING], [PREP]"`)
//! - Rule-chain resolution of custom units, missing forms and unit-type conflicts
//! - Parallel batch parsing and a command line tool

pub mod analysis;
pub mod cli;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod rules;
pub mod units;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod fixtures;

pub mod prelude {
    pub use crate::error::{Result, SousError};
    pub use crate::parser::Parser;
    pub use crate::parser::result::{AnomalousResult, IngredientUsage, MatchResult, ParseResult};
    pub use crate::units::{Amount, UnitType, Units};
    pub use crate::vocabulary::json::JsonVocabulary;
    pub use crate::vocabulary::store::VocabularyStore;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

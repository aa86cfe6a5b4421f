//! Vocabulary tables and the trie index behind them.
//!
//! - [`index::SynonymIndex`] - prefix index shared by every table
//! - [`ingredient::IngredientTable`] - ingredients, synonyms and aliases
//! - [`store::VocabularyStore`] - the tables a parser reads from
//! - [`loader`] - the contracts vocabulary sources implement
//! - [`json::JsonVocabulary`] - a loader backed by a JSON document

pub mod builtin;
pub mod index;
pub mod ingredient;
pub mod json;
pub mod loader;
pub mod node;
pub mod store;

pub use index::{Alphabet, Lookup, SynonymIndex};
pub use ingredient::IngredientTable;
pub use json::JsonVocabulary;
pub use node::{
    AnomalousNode, DefaultPairings, Form, FormNode, Ingredient, IngredientNode, IngredientRef,
    NumericNode, Pairings, PrepNode, UnitNode,
};
pub use store::{PairedTable, VocabularyStats, VocabularyStore};

//! Loader contracts, one per vocabulary kind.
//!
//! The parser does not care where vocabulary comes from. A loader hands over
//! the synonyms to index and, for unit and form synonyms, the pairings that
//! give them an ingredient-specific meaning.
//! [`JsonVocabulary`](crate::vocabulary::json::JsonVocabulary) implements all
//! of them from a single JSON document.

use uuid::Uuid;

use crate::error::Result;
use crate::vocabulary::node::{AnomalousNode, Ingredient, Pairings, PrepNode};

/// A string to index and the node it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Synonym<N> {
    pub text: String,
    pub node: N,
}

impl<N> Synonym<N> {
    pub fn new(text: impl Into<String>, node: N) -> Self {
        Synonym {
            text: text.into(),
            node,
        }
    }
}

/// An alternate spelling of an ingredient. With a prep note it becomes an
/// alias: "ripe bananas" is bananas, prepared "ripe".
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientSynonym {
    pub text: String,
    pub ingredient_id: Uuid,
    pub prep_note: Option<String>,
}

impl IngredientSynonym {
    pub fn new(text: impl Into<String>, ingredient_id: Uuid) -> Self {
        IngredientSynonym {
            text: text.into(),
            ingredient_id,
            prep_note: None,
        }
    }

    pub fn alias(text: impl Into<String>, ingredient_id: Uuid, prep_note: impl Into<String>) -> Self {
        IngredientSynonym {
            text: text.into(),
            ingredient_id,
            prep_note: Some(prep_note.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngredientSource {
    pub ingredients: Vec<Ingredient>,
    pub synonyms: Vec<IngredientSynonym>,
}

/// Synonyms that map onto a pairing name, plus the pairings themselves.
/// Each synonym's node is the canonical name it stands for.
#[derive(Debug, Clone, Default)]
pub struct PairedSource {
    pub synonyms: Vec<Synonym<String>>,
    pub pairings: Pairings,
}

pub trait IngredientLoader {
    fn load_ingredients(&self) -> Result<IngredientSource>;
}

/// Supplies custom units only; built-in units are always present.
pub trait UnitLoader {
    fn load_units(&self) -> Result<PairedSource>;
}

pub trait FormLoader {
    fn load_forms(&self) -> Result<PairedSource>;
}

pub trait PrepLoader {
    fn load_preps(&self) -> Result<Vec<Synonym<PrepNode>>>;
}

pub trait AnomalyLoader {
    fn load_anomalies(&self) -> Result<Vec<Synonym<AnomalousNode>>>;
}

/// Anything that can supply every vocabulary kind.
pub trait VocabularyLoader:
    IngredientLoader + UnitLoader + FormLoader + PrepLoader + AnomalyLoader
{
}

impl<T> VocabularyLoader for T where
    T: IngredientLoader + UnitLoader + FormLoader + PrepLoader + AnomalyLoader
{
}

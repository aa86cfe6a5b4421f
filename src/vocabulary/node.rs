//! Vocabulary entries: ingredients, forms and the synonym nodes that point at them.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::units::{Amount, UnitType, Units};

/// A specific preparation or measurement variant of an ingredient
/// ("shredded" cheese, a "head" of lettuce).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    /// Display name, also used as a prep note when the form is demoted.
    pub name: String,
    /// The family of units this form is measured in.
    pub conversion_type: UnitType,
    /// What one unit of this form amounts to, for collaborators that convert
    /// between forms. Not used during parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalent: Option<Amount>,
}

impl Form {
    pub fn new(id: Uuid, ingredient_id: Uuid, name: impl Into<String>, conversion_type: UnitType) -> Self {
        Form {
            id,
            ingredient_id,
            name: name.into(),
            conversion_type,
            equivalent: None,
        }
    }
}

/// The form to assume for an ingredient when the line names none, per unit family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultPairings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Form>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Form>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Form>,
}

impl DefaultPairings {
    pub fn get(&self, unit_type: UnitType) -> Option<&Form> {
        match unit_type {
            UnitType::Unit => self.unit.as_ref(),
            UnitType::Volume => self.volume.as_ref(),
            UnitType::Weight => self.weight.as_ref(),
        }
    }
}

/// A canonical ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub conversion_type: UnitType,
    /// Weight in grams of a single unit ("one banana"), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_weight: Option<f32>,
    #[serde(default)]
    pub default_pairings: DefaultPairings,
}

impl Ingredient {
    pub fn new(id: Uuid, name: impl Into<String>, conversion_type: UnitType) -> Self {
        Ingredient {
            id,
            name: name.into(),
            conversion_type,
            unit_weight: None,
            default_pairings: DefaultPairings::default(),
        }
    }

    pub fn with_unit_weight(mut self, grams: f32) -> Self {
        self.unit_weight = Some(grams);
        self
    }

    pub fn with_default_pairings(mut self, pairings: DefaultPairings) -> Self {
        self.default_pairings = pairings;
        self
    }
}

/// Position of an [`IngredientNode`] in its table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IngredientRef(pub(crate) u32);

impl IngredientRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An ingredient synonym target.
///
/// Canonical nodes own their [`Ingredient`]. Alias nodes ("ripe bananas")
/// hold a back-reference to a canonical node plus the prep note the alias
/// implies; they never point at another alias.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientNode {
    ingredient: Option<Ingredient>,
    canonical: Option<IngredientRef>,
    prep_note: Option<String>,
}

impl IngredientNode {
    pub(crate) fn canonical(ingredient: Ingredient) -> Self {
        IngredientNode {
            ingredient: Some(ingredient),
            canonical: None,
            prep_note: None,
        }
    }

    pub(crate) fn alias(canonical: IngredientRef, prep_note: impl Into<String>) -> Self {
        IngredientNode {
            ingredient: None,
            canonical: Some(canonical),
            prep_note: Some(prep_note.into()),
        }
    }

    pub fn is_alias(&self) -> bool {
        self.canonical.is_some()
    }

    /// The canonical node this alias refers to.
    pub fn canonical_ref(&self) -> Option<IngredientRef> {
        self.canonical
    }

    pub fn prep_note(&self) -> Option<&str> {
        self.prep_note.as_deref()
    }

    pub(crate) fn own_ingredient(&self) -> Option<&Ingredient> {
        self.ingredient.as_ref()
    }
}

/// A unit synonym target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitNode {
    BuiltIn { name: String, unit: Units },
    /// A free-text unit ("head", "stick") that only means something through
    /// a (unit, ingredient) pairing.
    Custom { name: String },
}

impl UnitNode {
    pub fn name(&self) -> &str {
        match self {
            UnitNode::BuiltIn { name, .. } | UnitNode::Custom { name } => name,
        }
    }

    pub fn builtin(&self) -> Option<Units> {
        match self {
            UnitNode::BuiltIn { unit, .. } => Some(*unit),
            UnitNode::Custom { .. } => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, UnitNode::Custom { .. })
    }
}

/// A form synonym target; `name` is the key used in [`Pairings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepNode {
    pub name: String,
}

/// A phrase naming an ingredient in a fixed form ("egg yolks").
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalousNode {
    pub name: String,
    pub ingredient_id: Uuid,
    pub form: Form,
    pub prep_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericNode {
    pub value: f32,
}

/// (synonym name, ingredient id) → Form.
///
/// Resolves words whose meaning depends on the ingredient they modify:
/// "head" is a different form for lettuce than for garlic.
#[derive(Debug, Clone, Default)]
pub struct Pairings {
    pairs: AHashMap<(String, Uuid), Form>,
}

impl Pairings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, ingredient_id: Uuid, form: Form) {
        self.pairs.insert((name.trim().to_lowercase(), ingredient_id), form);
    }

    pub fn get(&self, name: &str, ingredient_id: Uuid) -> Option<&Form> {
        self.pairs.get(&(name.trim().to_lowercase(), ingredient_id))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

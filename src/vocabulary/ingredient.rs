//! Ingredient vocabulary: an arena of canonical and alias nodes behind two indexes.

use ahash::{AHashMap, AHashSet};
use log::warn;
use uuid::Uuid;

use crate::vocabulary::index::SynonymIndex;
use crate::vocabulary::loader::IngredientSource;
use crate::vocabulary::node::{Ingredient, IngredientNode, IngredientRef};

/// Ingredient nodes plus the synonym index used for parsing and a
/// letters-only index over display names used for autocomplete.
#[derive(Debug, Clone, Default)]
pub struct IngredientTable {
    nodes: Vec<IngredientNode>,
    synonyms: SynonymIndex<IngredientRef>,
    names: IngredientNameIndex,
    by_id: AHashMap<Uuid, IngredientRef>,
}

#[derive(Debug, Clone)]
struct IngredientNameIndex(SynonymIndex<IngredientRef>);

impl Default for IngredientNameIndex {
    fn default() -> Self {
        IngredientNameIndex(SynonymIndex::letters())
    }
}

impl IngredientTable {
    /// Build a table from a loader's output.
    ///
    /// Every ingredient is indexed under its own name as well as under the
    /// listed synonyms. Synonyms naming an unknown ingredient are skipped.
    pub fn build(source: IngredientSource) -> Self {
        let mut table = IngredientTable::default();

        for ingredient in source.ingredients {
            if let Some(&existing) = table.by_id.get(&ingredient.id) {
                warn!(
                    "Duplicate ingredient id {} ('{}'), replacing previous entry",
                    ingredient.id, ingredient.name
                );
                table.nodes[existing.index()] = IngredientNode::canonical(ingredient.clone());
                table.synonyms.index_string(&ingredient.name, existing);
                table.names.0.index_string(&ingredient.name, existing);
                continue;
            }

            let node_ref = table.push(IngredientNode::canonical(ingredient.clone()));
            table.by_id.insert(ingredient.id, node_ref);
            table.synonyms.index_string(&ingredient.name, node_ref);
            table.names.0.index_string(&ingredient.name, node_ref);
        }

        for synonym in source.synonyms {
            let Some(&canonical) = table.by_id.get(&synonym.ingredient_id) else {
                warn!(
                    "Synonym '{}' refers to unknown ingredient {}",
                    synonym.text, synonym.ingredient_id
                );
                continue;
            };

            let node_ref = match synonym.prep_note {
                Some(prep_note) => table.push(IngredientNode::alias(canonical, prep_note)),
                None => canonical,
            };
            table.synonyms.index_string(&synonym.text, node_ref);
        }

        table
    }

    fn push(&mut self, node: IngredientNode) -> IngredientRef {
        let node_ref = IngredientRef(self.nodes.len() as u32);
        self.nodes.push(node);
        node_ref
    }

    pub fn node(&self, node_ref: IngredientRef) -> &IngredientNode {
        &self.nodes[node_ref.index()]
    }

    /// The canonical node behind `node_ref` (itself, unless it is an alias).
    pub fn canonical(&self, node_ref: IngredientRef) -> IngredientRef {
        self.node(node_ref).canonical_ref().unwrap_or(node_ref)
    }

    /// The ingredient `node_ref` resolves to. Aliases always report their
    /// canonical ingredient.
    pub fn ingredient(&self, node_ref: IngredientRef) -> &Ingredient {
        let canonical = self.canonical(node_ref);
        self.node(canonical)
            .own_ingredient()
            .expect("canonical ingredient nodes always own an ingredient")
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<IngredientRef> {
        self.by_id.get(&id).copied()
    }

    pub fn synonyms(&self) -> &SynonymIndex<IngredientRef> {
        &self.synonyms
    }

    /// Ingredients whose display name starts with `prefix`, ignoring case and
    /// anything that is not a letter.
    pub fn autocomplete(&self, prefix: &str) -> Vec<&Ingredient> {
        let mut seen = AHashSet::new();
        self.names
            .0
            .prefix(&prefix.to_lowercase())
            .into_iter()
            .filter(|node_ref| seen.insert(**node_ref))
            .map(|node_ref| self.ingredient(*node_ref))
            .collect()
    }

    /// Number of canonical ingredients.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

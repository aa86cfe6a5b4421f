//! The set of vocabulary tables a parser reads from.
//!
//! Each table is rebuilt wholesale by its `init_*` method: the loader's
//! output is indexed into a fresh table which then replaces the old one, so
//! nothing from a previous load stays reachable. If the loader fails the old
//! table is kept. Rebuilding takes `&mut self`; callers that share a store
//! between threads serialize rebuilds against lookups themselves.

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::vocabulary::builtin;
use crate::vocabulary::index::SynonymIndex;
use crate::vocabulary::ingredient::IngredientTable;
use crate::vocabulary::loader::{
    AnomalyLoader, FormLoader, IngredientLoader, PairedSource, PrepLoader, UnitLoader,
    VocabularyLoader,
};
use crate::vocabulary::node::{AnomalousNode, FormNode, NumericNode, Pairings, PrepNode, UnitNode};

/// A synonym index together with the pairings that give its entries an
/// ingredient-specific meaning.
#[derive(Debug, Clone)]
pub struct PairedTable<N> {
    pub index: SynonymIndex<N>,
    pub pairings: Pairings,
}

impl<N> Default for PairedTable<N> {
    fn default() -> Self {
        PairedTable {
            index: SynonymIndex::default(),
            pairings: Pairings::default(),
        }
    }
}

/// Entry counts per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VocabularyStats {
    pub ingredients: usize,
    pub ingredient_synonyms: usize,
    pub units: usize,
    pub unit_pairings: usize,
    pub forms: usize,
    pub form_pairings: usize,
    pub preps: usize,
    pub anomalies: usize,
    pub numerics: usize,
}

#[derive(Debug, Clone)]
pub struct VocabularyStore {
    ingredients: IngredientTable,
    units: PairedTable<UnitNode>,
    forms: PairedTable<FormNode>,
    preps: SynonymIndex<PrepNode>,
    anomalies: SynonymIndex<AnomalousNode>,
    numerics: SynonymIndex<NumericNode>,
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyStore {
    /// A store holding only the built-in units and number words.
    pub fn new() -> Self {
        let mut units = PairedTable::default();
        builtin::index_builtin_units(&mut units.index);

        VocabularyStore {
            ingredients: IngredientTable::default(),
            units,
            forms: PairedTable::default(),
            preps: SynonymIndex::printable(),
            anomalies: SynonymIndex::printable(),
            numerics: builtin::numeric_index(),
        }
    }

    /// Build every table from one loader.
    pub fn load<L: VocabularyLoader + ?Sized>(loader: &L) -> Result<Self> {
        let mut store = Self::new();
        store.init_ingredients(loader)?;
        store.init_units(loader)?;
        store.init_forms(loader)?;
        store.init_preps(loader)?;
        store.init_anomalies(loader)?;
        Ok(store)
    }

    pub fn init_ingredients<L: IngredientLoader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        let source = loader.load_ingredients()?;
        self.ingredients = IngredientTable::build(source);
        info!(
            "Indexed {} ingredients under {} synonyms",
            self.ingredients.len(),
            self.ingredients.synonyms().len()
        );
        Ok(())
    }

    /// Rebuild the unit table: built-in units merged with the loader's custom units.
    pub fn init_units<L: UnitLoader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        let PairedSource { synonyms, pairings } = loader.load_units()?;

        let mut table = PairedTable {
            index: SynonymIndex::printable(),
            pairings,
        };
        builtin::index_builtin_units(&mut table.index);
        for synonym in synonyms {
            table
                .index
                .index_string(&synonym.text, UnitNode::Custom { name: synonym.node });
        }

        info!(
            "Indexed {} unit spellings with {} pairings",
            table.index.len(),
            table.pairings.len()
        );
        self.units = table;
        Ok(())
    }

    pub fn init_forms<L: FormLoader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        let PairedSource { synonyms, pairings } = loader.load_forms()?;

        let mut table = PairedTable {
            index: SynonymIndex::printable(),
            pairings,
        };
        for synonym in synonyms {
            table
                .index
                .index_string(&synonym.text, FormNode { name: synonym.node });
        }

        info!(
            "Indexed {} form spellings with {} pairings",
            table.index.len(),
            table.pairings.len()
        );
        self.forms = table;
        Ok(())
    }

    pub fn init_preps<L: PrepLoader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        let mut index = SynonymIndex::printable();
        for synonym in loader.load_preps()? {
            index.index_string(&synonym.text, synonym.node);
        }
        info!("Indexed {} prep note spellings", index.len());
        self.preps = index;
        Ok(())
    }

    pub fn init_anomalies<L: AnomalyLoader + ?Sized>(&mut self, loader: &L) -> Result<()> {
        let mut index = SynonymIndex::printable();
        for synonym in loader.load_anomalies()? {
            index.index_string(&synonym.text, synonym.node);
        }
        info!("Indexed {} anomalous phrases", index.len());
        self.anomalies = index;
        Ok(())
    }

    pub fn ingredients(&self) -> &IngredientTable {
        &self.ingredients
    }

    pub fn units(&self) -> &PairedTable<UnitNode> {
        &self.units
    }

    pub fn forms(&self) -> &PairedTable<FormNode> {
        &self.forms
    }

    pub fn preps(&self) -> &SynonymIndex<PrepNode> {
        &self.preps
    }

    pub fn anomalies(&self) -> &SynonymIndex<AnomalousNode> {
        &self.anomalies
    }

    pub fn numerics(&self) -> &SynonymIndex<NumericNode> {
        &self.numerics
    }

    pub fn stats(&self) -> VocabularyStats {
        VocabularyStats {
            ingredients: self.ingredients.len(),
            ingredient_synonyms: self.ingredients.synonyms().len(),
            units: self.units.index.len(),
            unit_pairings: self.units.pairings.len(),
            forms: self.forms.index.len(),
            form_pairings: self.forms.pairings.len(),
            preps: self.preps.len(),
            anomalies: self.anomalies.len(),
            numerics: self.numerics.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::error::SousError;
    use crate::units::UnitType;
    use crate::vocabulary::index::Lookup;
    use crate::vocabulary::loader::{IngredientSource, IngredientSynonym, Synonym};
    use crate::vocabulary::node::Ingredient;

    struct Ingredients(Vec<&'static str>);

    impl IngredientLoader for Ingredients {
        fn load_ingredients(&self) -> Result<IngredientSource> {
            Ok(IngredientSource {
                ingredients: self
                    .0
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        Ingredient::new(Uuid::from_u128(i as u128 + 1), *name, UnitType::Unit)
                    })
                    .collect(),
                synonyms: vec![IngredientSynonym::new("spud", Uuid::from_u128(1))],
            })
        }
    }

    struct Units(Vec<&'static str>);

    impl UnitLoader for Units {
        fn load_units(&self) -> Result<PairedSource> {
            Ok(PairedSource {
                synonyms: self.0.iter().map(|u| Synonym::new(*u, u.to_string())).collect(),
                pairings: Pairings::new(),
            })
        }
    }

    struct Failing;

    impl PrepLoader for Failing {
        fn load_preps(&self) -> Result<Vec<Synonym<PrepNode>>> {
            Err(SousError::vocabulary("unavailable"))
        }
    }

    struct Preps;

    impl PrepLoader for Preps {
        fn load_preps(&self) -> Result<Vec<Synonym<PrepNode>>> {
            Ok(vec![Synonym::new("diced", PrepNode { name: "diced".into() })])
        }
    }

    #[test]
    fn test_new_store_has_builtins() {
        let store = VocabularyStore::new();
        assert!(store.units().index.get("tsp").is_some());
        assert!(store.numerics().get("a dozen").is_some());
        assert!(store.ingredients().is_empty());
    }

    #[test]
    fn test_reinit_discards_previous_entries() {
        let mut store = VocabularyStore::new();
        store.init_ingredients(&Ingredients(vec!["potatoes"])).unwrap();
        assert!(matches!(store.ingredients().synonyms().parse("spud"), Lookup::Exact(_)));
        assert!(matches!(store.ingredients().synonyms().parse("potatoes"), Lookup::Exact(_)));

        store.init_ingredients(&Ingredients(vec!["onions"])).unwrap();
        assert_eq!(store.ingredients().synonyms().parse("potatoes"), Lookup::None);
        assert!(matches!(store.ingredients().synonyms().parse("onions"), Lookup::Exact(_)));
    }

    #[test]
    fn test_custom_units_merge_with_builtins() {
        let mut store = VocabularyStore::new();
        store.init_units(&Units(vec!["head"])).unwrap();
        assert!(store.units().index.get("head").is_some_and(|u| u.is_custom()));
        assert!(store.units().index.get("cup").is_some());

        store.init_units(&Units(vec!["stick"])).unwrap();
        assert!(store.units().index.get("head").is_none());
        assert!(store.units().index.get("cup").is_some());
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut store = VocabularyStore::new();
        store.init_preps(&Preps).unwrap();
        assert!(store.init_preps(&Failing).is_err());
        assert!(store.preps().get("diced").is_some());
        assert_eq!(store.stats().preps, 1);
    }
}

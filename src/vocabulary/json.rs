//! Vocabulary loaded from a JSON document.
//!
//! Example format:
//! ```json
//! {
//!   "forms": [
//!     {"id": "00000000-0000-0000-0000-000000000101",
//!      "ingredient_id": "00000000-0000-0000-0000-000000000001",
//!      "name": "head", "conversion_type": "unit"}
//!   ],
//!   "ingredients": [
//!     {"id": "00000000-0000-0000-0000-000000000001", "name": "lettuce",
//!      "conversion_type": "unit",
//!      "default_pairings": {"unit": "00000000-0000-0000-0000-000000000101"},
//!      "synonyms": ["iceberg lettuce"],
//!      "aliases": [{"text": "crisp lettuce", "prep_note": "crisp"}]}
//!   ],
//!   "custom_units": [{"name": "head", "spellings": ["heads"]}],
//!   "unit_pairings": [{"name": "head",
//!                      "ingredient_id": "00000000-0000-0000-0000-000000000001",
//!                      "form_id": "00000000-0000-0000-0000-000000000101"}],
//!   "form_synonyms": [{"name": "shredded", "spellings": ["grated"]}],
//!   "form_pairings": [],
//!   "preps": [{"name": "chopped", "spellings": ["finely chopped"]}],
//!   "anomalies": []
//! }
//! ```
//!
//! Every section is optional.

use std::path::Path;

use ahash::AHashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SousError};
use crate::units::UnitType;
use crate::vocabulary::loader::{
    AnomalyLoader, FormLoader, IngredientLoader, IngredientSource, IngredientSynonym,
    PairedSource, PrepLoader, Synonym, UnitLoader,
};
use crate::vocabulary::node::{AnomalousNode, DefaultPairings, Form, Ingredient, PrepNode};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonVocabulary {
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub ingredients: Vec<JsonIngredient>,
    #[serde(default)]
    pub custom_units: Vec<JsonSynonymGroup>,
    #[serde(default)]
    pub unit_pairings: Vec<JsonPairing>,
    #[serde(default)]
    pub form_synonyms: Vec<JsonSynonymGroup>,
    #[serde(default)]
    pub form_pairings: Vec<JsonPairing>,
    #[serde(default)]
    pub preps: Vec<JsonSynonymGroup>,
    #[serde(default)]
    pub anomalies: Vec<JsonAnomaly>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIngredient {
    pub id: Uuid,
    pub name: String,
    pub conversion_type: UnitType,
    #[serde(default)]
    pub unit_weight: Option<f32>,
    #[serde(default)]
    pub default_pairings: JsonDefaultPairings,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<JsonAlias>,
}

/// Default pairings by form id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonDefaultPairings {
    #[serde(default)]
    pub unit: Option<Uuid>,
    #[serde(default)]
    pub volume: Option<Uuid>,
    #[serde(default)]
    pub weight: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAlias {
    pub text: String,
    pub prep_note: String,
}

/// A canonical name and the spellings that resolve to it. The name itself
/// is always indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSynonymGroup {
    pub name: String,
    #[serde(default)]
    pub spellings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPairing {
    pub name: String,
    pub ingredient_id: Uuid,
    pub form_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAnomaly {
    pub text: String,
    pub ingredient_id: Uuid,
    pub form_id: Uuid,
    #[serde(default)]
    pub prep_note: Option<String>,
}

impl JsonVocabulary {
    /// Load a vocabulary from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SousError::vocabulary(format!(
                "Failed to read vocabulary file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content).map_err(|e| {
            SousError::vocabulary(format!(
                "Failed to parse vocabulary JSON from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    fn forms_by_id(&self) -> AHashMap<Uuid, &Form> {
        self.forms.iter().map(|form| (form.id, form)).collect()
    }

    fn find_form(forms: &AHashMap<Uuid, &Form>, id: Uuid, context: &str) -> Result<Form> {
        forms
            .get(&id)
            .map(|form| (*form).clone())
            .ok_or_else(|| SousError::vocabulary(format!("{context} refers to unknown form {id}")))
    }

    fn paired_source(
        groups: &[JsonSynonymGroup],
        pairings: &[JsonPairing],
        forms: &AHashMap<Uuid, &Form>,
    ) -> Result<PairedSource> {
        let mut source = PairedSource::default();
        for group in groups {
            source.synonyms.push(Synonym::new(group.name.clone(), group.name.clone()));
            for spelling in &group.spellings {
                source.synonyms.push(Synonym::new(spelling.clone(), group.name.clone()));
            }
        }

        for pairing in pairings {
            let context = format!("Pairing '{}'", pairing.name);
            let form = Self::find_form(forms, pairing.form_id, &context)?;
            if form.ingredient_id != pairing.ingredient_id {
                warn!(
                    "Pairing '{}' maps ingredient {} to form '{}' of another ingredient",
                    pairing.name, pairing.ingredient_id, form.name
                );
            }
            source.pairings.insert(&pairing.name, pairing.ingredient_id, form);
        }
        Ok(source)
    }
}

impl IngredientLoader for JsonVocabulary {
    fn load_ingredients(&self) -> Result<IngredientSource> {
        let forms = self.forms_by_id();
        let mut source = IngredientSource::default();

        for entry in &self.ingredients {
            let context = format!("Ingredient '{}'", entry.name);
            let lookup = |id: Option<Uuid>| -> Result<Option<Form>> {
                id.map(|id| Self::find_form(&forms, id, &context)).transpose()
            };
            let default_pairings = DefaultPairings {
                unit: lookup(entry.default_pairings.unit)?,
                volume: lookup(entry.default_pairings.volume)?,
                weight: lookup(entry.default_pairings.weight)?,
            };

            let mut ingredient =
                Ingredient::new(entry.id, entry.name.clone(), entry.conversion_type)
                    .with_default_pairings(default_pairings);
            ingredient.unit_weight = entry.unit_weight;
            source.ingredients.push(ingredient);

            for text in &entry.synonyms {
                source.synonyms.push(IngredientSynonym::new(text.clone(), entry.id));
            }
            for alias in &entry.aliases {
                source.synonyms.push(IngredientSynonym::alias(
                    alias.text.clone(),
                    entry.id,
                    alias.prep_note.clone(),
                ));
            }
        }

        Ok(source)
    }
}

impl UnitLoader for JsonVocabulary {
    fn load_units(&self) -> Result<PairedSource> {
        Self::paired_source(&self.custom_units, &self.unit_pairings, &self.forms_by_id())
    }
}

impl FormLoader for JsonVocabulary {
    fn load_forms(&self) -> Result<PairedSource> {
        Self::paired_source(&self.form_synonyms, &self.form_pairings, &self.forms_by_id())
    }
}

impl PrepLoader for JsonVocabulary {
    fn load_preps(&self) -> Result<Vec<Synonym<PrepNode>>> {
        let mut synonyms = Vec::new();
        for group in &self.preps {
            let node = PrepNode {
                name: group.name.clone(),
            };
            synonyms.push(Synonym::new(group.name.clone(), node.clone()));
            for spelling in &group.spellings {
                synonyms.push(Synonym::new(spelling.clone(), node.clone()));
            }
        }
        Ok(synonyms)
    }
}

impl AnomalyLoader for JsonVocabulary {
    fn load_anomalies(&self) -> Result<Vec<Synonym<AnomalousNode>>> {
        let forms = self.forms_by_id();
        self.anomalies
            .iter()
            .map(|anomaly| {
                let context = format!("Anomaly '{}'", anomaly.text);
                let form = Self::find_form(&forms, anomaly.form_id, &context)?;
                Ok(Synonym::new(
                    anomaly.text.clone(),
                    AnomalousNode {
                        name: anomaly.text.clone(),
                        ingredient_id: anomaly.ingredient_id,
                        form,
                        prep_note: anomaly.prep_note.clone(),
                    },
                ))
            })
            .collect()
    }
}

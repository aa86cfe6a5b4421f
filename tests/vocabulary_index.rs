use std::path::Path;

use uuid::Uuid;

use sous::error::{Result, SousError};
use sous::units::UnitType;
use sous::vocabulary::index::{Lookup, SynonymIndex};
use sous::vocabulary::json::JsonVocabulary;
use sous::vocabulary::store::VocabularyStore;

fn fixture_source() -> Result<JsonVocabulary> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vocabulary.json");
    JsonVocabulary::load_from_file(path)
}

/// Every key resolves exactly, and every proper prefix that is not itself a
/// key reports a partial match.
fn assert_prefix_property<N: PartialEq + std::fmt::Debug>(index: &SynonymIndex<N>) {
    for (key, node) in index.entries() {
        assert_eq!(index.parse(key), Lookup::Exact(node), "key {key:?}");
        for (end, _) in key.char_indices().skip(1) {
            let prefix = &key[..end];
            match index.get(prefix) {
                Some(other) => assert_eq!(index.parse(prefix), Lookup::Exact(other)),
                None => assert_eq!(index.parse(prefix), Lookup::Partial, "prefix {prefix:?}"),
            }
        }
    }
}

#[test]
fn indexed_keys_and_their_prefixes() -> Result<()> {
    let vocabulary = VocabularyStore::load(&fixture_source()?)?;

    assert_prefix_property(vocabulary.ingredients().synonyms());
    assert_prefix_property(&vocabulary.units().index);
    assert_prefix_property(&vocabulary.forms().index);
    assert_prefix_property(vocabulary.preps());
    assert_prefix_property(vocabulary.anomalies());
    assert_prefix_property(vocabulary.numerics());
    Ok(())
}

#[test]
fn store_counts_every_table() -> Result<()> {
    let vocabulary = VocabularyStore::load(&fixture_source()?)?;
    let stats = vocabulary.stats();

    assert_eq!(stats.ingredients, 9);
    assert_eq!(stats.unit_pairings, 3);
    assert_eq!(stats.form_pairings, 4);
    assert_eq!(stats.anomalies, 2);
    assert!(stats.ingredient_synonyms > stats.ingredients);
    assert!(stats.units > 4);
    Ok(())
}

#[test]
fn reinitializing_replaces_every_entry() -> Result<()> {
    let mut vocabulary = VocabularyStore::load(&fixture_source()?)?;
    let empty = JsonVocabulary::from_json("{}")?;

    vocabulary.init_ingredients(&empty)?;
    vocabulary.init_forms(&empty)?;
    vocabulary.init_preps(&empty)?;
    vocabulary.init_anomalies(&empty)?;
    vocabulary.init_units(&empty)?;

    assert_eq!(vocabulary.ingredients().synonyms().parse("cheddar"), Lookup::None);
    assert_eq!(vocabulary.ingredients().synonyms().parse("ched"), Lookup::None);
    assert!(vocabulary.forms().index.is_empty());
    assert!(vocabulary.forms().pairings.is_empty());
    assert!(vocabulary.preps().is_empty());
    assert!(vocabulary.anomalies().is_empty());
    assert!(vocabulary.units().index.get("head").is_none());
    assert!(vocabulary.units().index.get("cups").is_some());
    assert!(vocabulary.ingredients().autocomplete("ch").is_empty());
    Ok(())
}

#[test]
fn autocomplete_over_display_names() -> Result<()> {
    let vocabulary = VocabularyStore::load(&fixture_source()?)?;
    let names: Vec<_> = vocabulary
        .ingredients()
        .autocomplete("C")
        .into_iter()
        .map(|ingredient| ingredient.name.clone())
        .collect();

    assert_eq!(names, vec!["cheese", "creme fraiche"]);
    Ok(())
}

#[test]
fn alias_resolves_to_canonical_ingredient() -> Result<()> {
    let vocabulary = VocabularyStore::load(&fixture_source()?)?;
    let table = vocabulary.ingredients();

    let Lookup::Exact(&alias) = table.synonyms().parse("ripe bananas") else {
        panic!("alias should be indexed");
    };
    assert!(table.node(alias).is_alias());
    assert_eq!(table.node(alias).prep_note(), Some("ripe"));

    let bananas = table.ingredient(alias);
    assert_eq!(bananas.id, Uuid::from_u128(3));
    assert_eq!(bananas.conversion_type, UnitType::Unit);
    assert_eq!(bananas.unit_weight, Some(118.0));
    Ok(())
}

#[test]
fn missing_vocabulary_file_is_reported() {
    let err = JsonVocabulary::load_from_file("/nonexistent/vocabulary.json").unwrap_err();
    assert!(matches!(err, SousError::Vocabulary(_)));
}

#[test]
fn vocabulary_file_round_trip_through_tempfile() -> Result<()> {
    let source = fixture_source()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("vocabulary.json");
    std::fs::write(&path, serde_json::to_string(&source)?)?;

    let reloaded = VocabularyStore::load(&JsonVocabulary::load_from_file(&path)?)?;
    assert_eq!(reloaded.stats(), VocabularyStore::load(&source)?.stats());
    Ok(())
}

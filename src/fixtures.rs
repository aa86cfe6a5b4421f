//! Vocabulary shared by unit tests.

use crate::vocabulary::json::JsonVocabulary;
use crate::vocabulary::store::VocabularyStore;

pub(crate) const VOCABULARY_JSON: &str = include_str!("../tests/fixtures/vocabulary.json");

pub(crate) fn vocabulary() -> VocabularyStore {
    let source = JsonVocabulary::from_json(VOCABULARY_JSON).expect("fixture vocabulary parses");
    VocabularyStore::load(&source).expect("fixture vocabulary loads")
}

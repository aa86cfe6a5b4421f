use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use sous::error::Result;
use sous::grammar::template::GrammarTemplate;
use sous::parser::Parser;
use sous::parser::result::{AnomalousResult, MatchResult, ParseResult};
use sous::units::{Amount, UnitType, Units};
use sous::vocabulary::json::JsonVocabulary;
use sous::vocabulary::store::VocabularyStore;

fn fixture_vocabulary() -> Result<VocabularyStore> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vocabulary.json");
    VocabularyStore::load(&JsonVocabulary::load_from_file(path)?)
}

fn default_parser() -> Result<Parser> {
    Parser::with_default_grammar(fixture_vocabulary()?)
}

fn form_name(result: &ParseResult) -> Option<&str> {
    result.usage().map(|usage| usage.form.name.as_str())
}

fn ingredient_name(result: &ParseResult) -> Option<&str> {
    result.ingredient().map(|ingredient| ingredient.name.as_str())
}

#[test]
fn form_before_ingredient_with_trailing_amount() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("shredded cheddar cheese: 5 cups");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(ingredient_name(&result), Some("cheese"));
    assert_eq!(form_name(&result), Some("shredded"));
    assert_eq!(result.usage().map(|u| u.amount), Some(Amount::new(5.0, Units::Cup)));
    assert_eq!(result.prep_note(), None);
    Ok(())
}

#[test]
fn form_between_unit_and_ingredient() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("1 cup melted cheddar cheese");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(form_name(&result), Some("melted"));
    assert_eq!(result.usage().map(|u| u.amount), Some(Amount::new(1.0, Units::Cup)));
    Ok(())
}

#[test]
fn mixed_number_amount() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("5 1/2 cups flour");

    assert_eq!(result.status(), MatchResult::Match);
    assert_eq!(result.usage().map(|u| u.amount), Some(Amount::new(5.5, Units::Cup)));
    assert_eq!(form_name(&result), Some("flour"));
    Ok(())
}

#[test]
fn numeric_phrase_with_alias() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("a dozen ripe bananas");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(ingredient_name(&result), Some("bananas"));
    assert_eq!(result.usage().map(|u| u.amount), Some(Amount::new(12.0, Units::Unit)));
    assert_eq!(result.prep_note(), Some("ripe"));

    let result = parser.parse("a dozen ripe bananas, sliced");
    assert_eq!(result.prep_note(), Some("ripe//sliced"));
    Ok(())
}

#[test]
fn custom_unit_resolved_through_pairing() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("1 head of lettuce");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(ingredient_name(&result), Some("lettuce"));
    assert_eq!(form_name(&result), Some("head"));
    assert_eq!(result.usage().map(|u| u.amount.unit), Some(Units::Unit));

    let result = parser.parse("a pinch of kosher salt");
    assert_eq!(ingredient_name(&result), Some("salt"));
    assert_eq!(form_name(&result), Some("pinch"));
    Ok(())
}

#[test]
fn custom_unit_without_pairing_is_unknown_unit() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(parser.parse("1 head of flour").status(), MatchResult::UnknownUnit);
    assert_eq!(parser.parse("2 heads flour").status(), MatchResult::UnknownUnit);
    Ok(())
}

#[test]
fn form_without_pairing_is_unknown_form() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(
        parser.parse("1 cup shredded flour").status(),
        MatchResult::UnknownForm
    );
    Ok(())
}

#[test]
fn missing_default_pairing_is_no_form() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(parser.parse("2 cups eggs").status(), MatchResult::NoForm);
    Ok(())
}

#[test]
fn weight_of_volume_only_form_is_incompatible() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(
        parser.parse("1 pound shredded lettuce").status(),
        MatchResult::IncompatibleForm
    );
    Ok(())
}

#[test]
fn prep_note_falls_through_to_form() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("3 cups apples, chopped");

    assert_eq!(result.anomaly(), Some(AnomalousResult::Fallthrough));
    assert_eq!(form_name(&result), Some("chopped"));
    assert_eq!(result.prep_note(), None);
    assert_eq!(result.status(), MatchResult::Match);
    Ok(())
}

#[test]
fn weight_amount_converts_volume_form() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("1 pound shredded cheddar cheese");

    assert_eq!(result.anomaly(), Some(AnomalousResult::AutoConvert));
    let usage = result.usage().expect("anomalous match carries a usage");
    assert_eq!(usage.form.conversion_type, UnitType::Weight);
    assert_eq!(usage.amount, Amount::new(1.0, Units::Pound));
    assert_eq!(usage.prep_note.as_deref(), Some("shredded"));
    Ok(())
}

#[test]
fn count_converts_volume_form() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("2 chopped apples");

    assert_eq!(result.anomaly(), Some(AnomalousResult::AutoConvert));
    assert_eq!(form_name(&result), Some("apple"));
    assert_eq!(result.prep_note(), Some("chopped"));
    Ok(())
}

#[test]
fn ounces_of_liquid_become_fluid_ounces() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("8 oz whole milk");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(
        result.usage().map(|u| u.amount),
        Some(Amount::new(8.0, Units::FluidOunce))
    );
    Ok(())
}

#[test]
fn anomalous_phrase_fixes_form() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("3 egg yolks");

    assert!(matches!(result, ParseResult::Match { .. }));
    assert_eq!(ingredient_name(&result), Some("eggs"));
    assert_eq!(form_name(&result), Some("yolk"));
    Ok(())
}

#[test]
fn lines_without_amount_are_partial() -> Result<()> {
    let parser = default_parser()?;

    let result = parser.parse("Salt");
    assert!(matches!(result, ParseResult::PartialMatch { .. }));
    assert_eq!(result.prep_note(), None);

    let result = parser.parse("salt to taste");
    assert_eq!(result.status(), MatchResult::PartialMatch);
    assert_eq!(result.prep_note(), Some("to taste"));

    let result = parser.parse("bananas, sliced");
    assert_eq!(result.prep_note(), Some("sliced"));

    let result = parser.parse("peeled and chopped apples");
    assert_eq!(ingredient_name(&result), Some("apples"));
    assert_eq!(result.prep_note(), Some("peeled//chopped"));
    Ok(())
}

#[test]
fn ranges_and_accents() -> Result<()> {
    let parser = default_parser()?;

    let result = parser.parse("2-3 cups flour");
    assert_eq!(
        result.usage().map(|u| u.amount),
        Some(Amount::range(2.0, 3.0, Units::Cup))
    );

    let result = parser.parse("2 to 3 Tbsp flour");
    assert_eq!(
        result.usage().map(|u| u.amount),
        Some(Amount::range(2.0, 3.0, Units::Tablespoon))
    );

    let result = parser.parse("1 cup Crème  Fraîche");
    assert_eq!(ingredient_name(&result), Some("creme fraiche"));
    assert_eq!(result.input(), "1 cup Crème  Fraîche");
    Ok(())
}

#[test]
fn overflowing_amount_does_not_match() -> Result<()> {
    let parser = default_parser()?;
    let result = parser.parse("400000000000000000000000000000000000000 cups flour");
    assert_eq!(result.status(), MatchResult::None);
    assert!(result.usage().is_none());
    Ok(())
}

#[test]
fn stray_tabs_and_edge_spaces_are_not_consumed() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(parser.parse("1\tcup flour").status(), MatchResult::None);
    assert_eq!(parser.parse("1 cup flour ").status(), MatchResult::None);
    assert_eq!(parser.parse("1  cup   flour").status(), MatchResult::Match);
    Ok(())
}

#[test]
fn trailing_punctuation_is_not_ignored() -> Result<()> {
    let parser = default_parser()?;
    assert_eq!(parser.parse("2 cups flour.").status(), MatchResult::None);
    assert_eq!(parser.parse("2 cups flour").status(), MatchResult::Match);
    Ok(())
}

#[test]
fn first_registered_template_wins() -> Result<()> {
    let generic = || -> Result<GrammarTemplate> {
        Ok(GrammarTemplate::compile("[ING], [PREP]")?.with_allow_partial(true))
    };
    let literal = || -> Result<GrammarTemplate> {
        Ok(GrammarTemplate::compile("[ING], sliced")?
            .with_allow_partial(true)
            .with_default_prep("thin"))
    };

    let parser = Parser::new(fixture_vocabulary()?, vec![generic()?, literal()?]);
    assert_eq!(parser.parse("bananas, sliced").prep_note(), Some("sliced"));

    let parser = Parser::new(fixture_vocabulary()?, vec![literal()?, generic()?]);
    assert_eq!(parser.parse("bananas, sliced").prep_note(), Some("thin"));
    Ok(())
}

#[test]
fn no_match_hook_sees_unmatched_lines() -> Result<()> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let parser = default_parser()?.on_no_match(move |input, status| {
        sink.lock().push((input.to_string(), status));
    });

    let lines = ["2 cups flour", "1 head of flour", "2 cups flour.", "salt"];
    let results = parser.parse_all(&lines);
    assert_eq!(results.len(), 4);
    assert_eq!(results[1].input(), "1 head of flour");

    let mut seen = seen.lock().clone();
    seen.sort();
    assert_eq!(
        seen,
        vec![
            ("1 head of flour".to_string(), MatchResult::UnknownUnit),
            ("2 cups flour.".to_string(), MatchResult::None),
        ]
    );
    Ok(())
}

#[test]
fn rebuilt_vocabulary_forgets_old_ingredients() -> Result<()> {
    let mut parser = default_parser()?;
    assert_eq!(parser.parse("2 cups flour").status(), MatchResult::Match);

    let replacement = JsonVocabulary::from_json(
        r#"{"ingredients": [{"id": "00000000-0000-0000-0000-000000000042",
                             "name": "rice", "conversion_type": "volume"}]}"#,
    )?;
    parser.vocabulary_mut().init_ingredients(&replacement)?;

    assert_eq!(parser.parse("2 cups flour").status(), MatchResult::None);
    assert_eq!(parser.parse("2 cups rice").status(), MatchResult::NoForm);
    Ok(())
}

//! Token readers bound to template placeholders.
//!
//! A reader looks at the input from the current cursor position, consumes
//! as much as it recognizes and records what it found in the shared
//! [`MatchData`]. Vocabulary-backed readers walk the relevant
//! [`SynonymIndex`] one character at a time and keep the longest exact key
//! that ends on a word boundary.

use std::fmt;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::grammar::match_data::MatchData;
use crate::vocabulary::index::{Lookup, SynonymIndex};
use crate::vocabulary::store::VocabularyStore;

/// The placeholder kinds a template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Amount,
    Unit,
    Ingredient,
    Form,
    Prep,
    Anomaly,
}

impl TokenKind {
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Amount,
        TokenKind::Unit,
        TokenKind::Ingredient,
        TokenKind::Form,
        TokenKind::Prep,
        TokenKind::Anomaly,
    ];

    /// Placeholder name as written between brackets in a template.
    pub fn placeholder(self) -> &'static str {
        match self {
            TokenKind::Amount => "AMT",
            TokenKind::Unit => "UNIT",
            TokenKind::Ingredient => "ING",
            TokenKind::Form => "FORM",
            TokenKind::Prep => "PREP",
            TokenKind::Anomaly => "ANOMALY",
        }
    }

    pub fn from_placeholder(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.placeholder() == name)
    }

    pub fn reader(self) -> &'static dyn TokenReader {
        match self {
            TokenKind::Amount => &AmountReader,
            TokenKind::Unit => &UnitReader,
            TokenKind::Ingredient => &IngredientReader,
            TokenKind::Form => &FormReader,
            TokenKind::Prep => &PrepReader,
            TokenKind::Anomaly => &AnomalyReader,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.placeholder())
    }
}

/// Trait for readers that consume one placeholder's worth of input.
pub trait TokenReader: Send + Sync {
    /// Read a token at the start of `input`.
    ///
    /// On success the token is recorded in `data` and the number of bytes
    /// consumed is returned. On failure `data` is left as it was.
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData)
    -> Option<usize>;

    fn name(&self) -> &'static str;
}

/// True when `end` is the end of input or followed by a non-alphanumeric character.
fn at_boundary(input: &str, end: usize) -> bool {
    input[end..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric())
}

/// Longest indexed key at the start of `input` that ends on a word boundary.
pub fn longest_match<'a, N>(index: &'a SynonymIndex<N>, input: &str) -> Option<(usize, &'a N)> {
    let mut cursor = index.cursor();
    let mut best = None;

    for (offset, c) in input.char_indices() {
        match cursor.step(c) {
            Lookup::Exact(node) => {
                let end = offset + c.len_utf8();
                if at_boundary(input, end) {
                    best = Some((end, node));
                }
            }
            Lookup::Partial => {}
            Lookup::None => break,
        }
    }

    best
}

const QUANTITY: &str = r"(\d+\s+\d+/\d+|\d+/\d+|\d*\.\d+|\d+)";

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{QUANTITY}(?:\s*(?:-|to)\s*{QUANTITY})?"))
        .expect("amount pattern is valid")
});

/// Value of "5", "0.5", ".5", "1/2" or "5 1/2".
pub fn parse_quantity(text: &str) -> Option<f32> {
    let mut total = 0.0;
    for part in text.split_whitespace() {
        total += match part.split_once('/') {
            Some((numerator, denominator)) => {
                let denominator: f32 = denominator.parse().ok()?;
                if denominator == 0.0 {
                    return None;
                }
                numerator.parse::<f32>().ok()? / denominator
            }
            None => part.parse::<f32>().ok()?,
        };
    }
    total.is_finite().then_some(total)
}

/// Reads `[AMT]`: number words ("a dozen"), numbers, fractions and ranges.
pub struct AmountReader;

impl TokenReader for AmountReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        if let Some((end, numeric)) = longest_match(vocabulary.numerics(), input) {
            trace!("amount word '{}' = {}", &input[..end], numeric.value);
            data.set_quantity(numeric.value, None);
            return Some(end);
        }

        let captures = AMOUNT.captures(input)?;
        let whole = captures.get(0)?;
        if !at_boundary(input, whole.end()) {
            return None;
        }

        let low = parse_quantity(captures.get(1)?.as_str())?;
        let high = match captures.get(2) {
            Some(m) => Some(parse_quantity(m.as_str())?),
            None => None,
        };
        trace!("amount '{}' = {low} {high:?}", whole.as_str());
        data.set_quantity(low, high);
        Some(whole.end())
    }

    fn name(&self) -> &'static str {
        "amount"
    }
}

/// Reads `[UNIT]`: built-in or custom unit spellings.
pub struct UnitReader;

impl TokenReader for UnitReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        let (end, unit) = longest_match(&vocabulary.units().index, input)?;
        trace!("unit '{}' -> {:?}", &input[..end], unit);
        data.set_unit(unit.clone());
        Some(end)
    }

    fn name(&self) -> &'static str {
        "unit"
    }
}

/// Reads `[ING]`. An alias also contributes its prep note.
pub struct IngredientReader;

impl TokenReader for IngredientReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        let table = vocabulary.ingredients();
        let (end, &node_ref) = longest_match(table.synonyms(), input)?;
        trace!(
            "ingredient '{}' -> {}",
            &input[..end],
            table.ingredient(node_ref).name
        );

        data.ingredient = Some(node_ref);
        if let Some(prep_note) = table.node(node_ref).prep_note() {
            data.preps.push(prep_note);
        }
        Some(end)
    }

    fn name(&self) -> &'static str {
        "ingredient"
    }
}

/// Reads `[FORM]`: a form name still to be paired with the ingredient.
pub struct FormReader;

impl TokenReader for FormReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        let (end, form) = longest_match(&vocabulary.forms().index, input)?;
        trace!("form '{}' -> {}", &input[..end], form.name);
        data.form = Some(form.clone());
        Some(end)
    }

    fn name(&self) -> &'static str {
        "form"
    }
}

const PREP_SEPARATORS: [&str; 3] = [", and ", " and ", ", "];

/// Reads `[PREP]`: one prep note, or several joined by "," / "and".
pub struct PrepReader;

impl TokenReader for PrepReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        let preps = vocabulary.preps();
        let (mut consumed, first) = longest_match(preps, input)?;
        data.preps.push(first.name.as_str());

        'list: loop {
            let rest = &input[consumed..];
            for separator in PREP_SEPARATORS {
                let Some(after) = rest.strip_prefix(separator) else {
                    continue;
                };
                if let Some((end, next)) = longest_match(preps, after) {
                    data.preps.push(next.name.as_str());
                    consumed += separator.len() + end;
                    continue 'list;
                }
            }
            break;
        }

        trace!("prep '{}'", &input[..consumed]);
        Some(consumed)
    }

    fn name(&self) -> &'static str {
        "prep"
    }
}

/// Reads `[ANOMALY]`: a phrase naming an ingredient in a fixed form.
pub struct AnomalyReader;

impl TokenReader for AnomalyReader {
    fn read(&self, input: &str, vocabulary: &VocabularyStore, data: &mut MatchData) -> Option<usize> {
        let (end, anomaly) = longest_match(vocabulary.anomalies(), input)?;
        let Some(node_ref) = vocabulary.ingredients().find_by_id(anomaly.ingredient_id) else {
            trace!(
                "anomaly '{}' refers to unknown ingredient {}",
                anomaly.name, anomaly.ingredient_id
            );
            return None;
        };

        data.ingredient = Some(node_ref);
        data.anomaly_form = Some(anomaly.form.clone());
        if let Some(prep_note) = &anomaly.prep_note {
            data.preps.push(prep_note.as_str());
        }
        Some(end)
    }

    fn name(&self) -> &'static str {
        "anomaly"
    }
}

//! Vocabulary that ships with the parser: number words and standard units.

use crate::units::Units;
use crate::vocabulary::index::SynonymIndex;
use crate::vocabulary::node::{NumericNode, UnitNode};

/// Number words and idioms that stand in for a quantity.
pub const NUMERIC_WORDS: &[(&str, f32)] = &[
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("a", 1.0),
    ("an", 1.0),
    ("half a", 0.5),
    ("half of a", 0.5),
    ("half an", 0.5),
    ("a dozen", 12.0),
    ("one dozen", 12.0),
    ("a couple", 2.0),
    ("a couple of", 2.0),
];

/// Spellings of the built-in units. The first entry is the canonical name.
pub const UNIT_SPELLINGS: &[(Units, &[&str])] = &[
    (
        Units::Teaspoon,
        &["teaspoon", "teaspoons", "tsp", "tsp.", "tsps", "t.", "t"],
    ),
    (
        Units::Tablespoon,
        &[
            "tablespoon",
            "tablespoons",
            "tbsp",
            "tbsp.",
            "tbsps",
            "tbs",
            "tbs.",
            "tbl",
            "tbl.",
        ],
    ),
    (
        Units::FluidOunce,
        &[
            "fluid ounce",
            "fluid ounces",
            "fl oz",
            "fl. oz",
            "fl. oz.",
            "fl oz.",
            "fl.oz.",
        ],
    ),
    (Units::Cup, &["cup", "cups", "c.", "c"]),
    (Units::Pint, &["pint", "pints", "pt", "pt."]),
    (Units::Quart, &["quart", "quarts", "qt", "qt."]),
    (Units::Gallon, &["gallon", "gallons", "gal", "gal."]),
    (Units::Gram, &["gram", "grams", "g", "g.", "gr"]),
    (Units::Ounce, &["ounce", "ounces", "oz", "oz."]),
    (Units::Pound, &["pound", "pounds", "lb", "lb.", "lbs", "lbs."]),
];

/// Build the numeric-word index.
pub fn numeric_index() -> SynonymIndex<NumericNode> {
    let mut index = SynonymIndex::printable();
    for &(word, value) in NUMERIC_WORDS {
        index.index_string(word, NumericNode { value });
    }
    index
}

/// Index every built-in unit spelling into `index`.
pub fn index_builtin_units(index: &mut SynonymIndex<UnitNode>) {
    for &(unit, spellings) in UNIT_SPELLINGS {
        let name = spellings[0];
        for spelling in spellings {
            index.index_string(
                spelling,
                UnitNode::BuiltIn {
                    name: name.to_string(),
                    unit,
                },
            );
        }
    }
}

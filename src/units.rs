//! Measurement units and parsed amounts.
//!
//! Numeric conversion between units is not done here; this module only knows
//! which family ([`UnitType`]) a unit belongs to, which is what the resolver
//! needs to decide whether a form and an amount agree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The classification of a unit or a form: counted, measured by volume, or
/// measured by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Unit,
    Volume,
    Weight,
}

/// Built-in units of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// A bare count ("3 eggs") or a count of a custom unit ("1 head").
    Unit,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    Gram,
    Ounce,
    Pound,
}

impl Units {
    /// The family this unit belongs to.
    pub fn unit_type(self) -> UnitType {
        match self {
            Units::Unit => UnitType::Unit,
            Units::Teaspoon
            | Units::Tablespoon
            | Units::FluidOunce
            | Units::Cup
            | Units::Pint
            | Units::Quart
            | Units::Gallon => UnitType::Volume,
            Units::Gram | Units::Ounce | Units::Pound => UnitType::Weight,
        }
    }

    pub fn is_volume(self) -> bool {
        self.unit_type() == UnitType::Volume
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Units::Unit => "unit",
            Units::Teaspoon => "tsp",
            Units::Tablespoon => "tbsp",
            Units::FluidOunce => "fl oz",
            Units::Cup => "cup",
            Units::Pint => "pint",
            Units::Quart => "quart",
            Units::Gallon => "gallon",
            Units::Gram => "g",
            Units::Ounce => "oz",
            Units::Pound => "lb",
        };
        f.write_str(name)
    }
}

/// A quantity with an optional upper bound ("2-3 cups") and its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub low: f32,
    pub high: Option<f32>,
    pub unit: Units,
}

impl Amount {
    pub fn new(low: f32, unit: Units) -> Self {
        Amount {
            low,
            high: None,
            unit,
        }
    }

    pub fn range(low: f32, high: f32, unit: Units) -> Self {
        Amount {
            low,
            high: Some(high),
            unit,
        }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit.unit_type()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.high {
            Some(high) => write!(f, "{}-{} {}", self.low, high, self.unit),
            None => write!(f, "{} {}", self.low, self.unit),
        }
    }
}

//! Accumulator filled in by token readers during one template attempt.

use crate::units::{Amount, Units};
use crate::vocabulary::node::{Form, FormNode, IngredientRef, UnitNode};

/// Separator used when several prep notes are reported as one string.
pub const PREP_SEPARATOR: &str = "//";

/// Ordered prep notes collected while matching ("ripe", "sliced").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepNotes(Vec<String>);

impl PrepNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: impl Into<String>) {
        self.0.push(note.into());
    }

    pub fn remove(&mut self, index: usize) -> String {
        self.0.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All notes joined with [`PREP_SEPARATOR`], or `None` when there are none.
    pub fn joined(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.join(PREP_SEPARATOR))
    }
}

/// What a template attempt has recognized so far.
#[derive(Debug, Clone, Default)]
pub struct MatchData {
    pub ingredient: Option<IngredientRef>,
    pub unit: Option<UnitNode>,
    pub form: Option<FormNode>,
    /// A form fixed by an anomalous phrase; needs no pairing.
    pub anomaly_form: Option<Form>,
    pub amount: Option<Amount>,
    pub preps: PrepNotes,
}

impl MatchData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parsed quantity; its unit comes from a unit already read, if any.
    pub fn set_quantity(&mut self, low: f32, high: Option<f32>) {
        let unit = self.unit_for_amount();
        self.amount = Some(Amount { low, high, unit });
    }

    /// Record a unit and carry it onto an amount already read.
    pub fn set_unit(&mut self, unit: UnitNode) {
        self.unit = Some(unit);
        let resolved = self.unit_for_amount();
        if let Some(amount) = self.amount.as_mut() {
            amount.unit = resolved;
        }
    }

    /// Built-in units measure the amount directly; custom units and bare
    /// numbers count items.
    fn unit_for_amount(&self) -> Units {
        self.unit
            .as_ref()
            .and_then(UnitNode::builtin)
            .unwrap_or(Units::Unit)
    }
}

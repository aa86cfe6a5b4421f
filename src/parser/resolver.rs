//! Turns a grammar match into a final form and amount.
//!
//! Resolution runs two [`RuleChain`]s over a [`ResolveContext`]. The form
//! chain decides which [`Form`] the line names, or fails with the reason a
//! named unit or form could not be paired with the ingredient. The verdict
//! chain then checks that form against the amount's unit type and, when they
//! disagree, tries to reinterpret the line before giving up.

use log::debug;

use crate::grammar::match_data::MatchData;
use crate::grammar::template::GrammarTemplate;
use crate::parser::result::{AnomalousResult, IngredientUsage, MatchResult, ParseResult};
use crate::rules::RuleChain;
use crate::units::{Amount, UnitType, Units};
use crate::vocabulary::node::{Form, Ingredient, UnitNode};
use crate::vocabulary::store::VocabularyStore;

/// Output of the form chain: the form found so far, or a hard failure.
pub type FormStep = std::result::Result<Option<Form>, MatchResult>;

/// Output of the verdict chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Anomalous(AnomalousResult),
    Failed(MatchResult),
}

/// State shared by the resolution rules for one line.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    pub vocabulary: &'a VocabularyStore,
    pub ingredient: &'a Ingredient,
    pub data: MatchData,
    pub amount: Amount,
    pub form: Option<Form>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        vocabulary: &'a VocabularyStore,
        ingredient: &'a Ingredient,
        data: MatchData,
        amount: Amount,
    ) -> Self {
        ResolveContext {
            vocabulary,
            ingredient,
            data,
            amount,
            form: None,
        }
    }

    fn into_usage(self, form: Form) -> IngredientUsage {
        IngredientUsage {
            ingredient: self.ingredient.clone(),
            amount: self.amount,
            form,
            prep_note: self.data.preps.joined(),
        }
    }

    fn custom_unit(&self) -> Option<&str> {
        self.data
            .unit
            .as_ref()
            .filter(|unit| unit.is_custom())
            .map(UnitNode::name)
    }

    fn unit_pairing(&self) -> Option<&'a Form> {
        let unit = self.custom_unit()?;
        self.vocabulary.units().pairings.get(unit, self.ingredient.id)
    }

    fn form_is_compatible(&self) -> bool {
        self.form
            .as_ref()
            .is_some_and(|form| form.conversion_type == self.amount.unit_type())
    }

    /// A prep note that names a volume form of this ingredient, with its position.
    fn fallthrough_candidate(&self) -> Option<(usize, &'a Form)> {
        if !self.amount.unit.is_volume() {
            return None;
        }

        let forms = self.vocabulary.forms();
        self.data.preps.iter().enumerate().find_map(|(position, prep)| {
            let key = prep.trim().to_lowercase();
            let name = forms.index.get(&key).map_or(key.as_str(), |node| node.name.as_str());
            forms
                .pairings
                .get(name, self.ingredient.id)
                .filter(|form| form.conversion_type == UnitType::Volume)
                .map(|form| (position, form))
        })
    }

    /// The form a volume form should be swapped for, given the amount's unit type.
    ///
    /// A parsed custom unit has already made its own pairing the current
    /// form, so a count amount always falls back to the unit default.
    fn auto_convert_target(&self) -> Option<&'a Form> {
        let form = self.form.as_ref()?;
        if form.conversion_type != UnitType::Volume {
            return None;
        }

        let defaults = &self.ingredient.default_pairings;
        match self.amount.unit_type() {
            UnitType::Weight => defaults.weight.as_ref(),
            UnitType::Unit => defaults.unit.as_ref(),
            UnitType::Volume => None,
        }
    }
}

fn take_anomaly_form(context: &mut ResolveContext<'_>) -> FormStep {
    Ok(context.data.anomaly_form.take())
}

fn pair_custom_unit(context: &mut ResolveContext<'_>) -> FormStep {
    match context.unit_pairing() {
        Some(form) => Ok(Some(form.clone())),
        None => Err(MatchResult::UnknownUnit),
    }
}

fn pair_form_token(context: &mut ResolveContext<'_>) -> FormStep {
    let Some(token) = &context.data.form else {
        return Ok(None);
    };
    context
        .vocabulary
        .forms()
        .pairings
        .get(&token.name, context.ingredient.id)
        .map(|form| Some(form.clone()))
        .ok_or(MatchResult::UnknownForm)
}

/// Default pairing for the amount's unit type. An ounce amount for an
/// ingredient with only a volume default is read as fluid ounces.
fn default_pairing(context: &mut ResolveContext<'_>) -> FormStep {
    let defaults = &context.ingredient.default_pairings;
    if context.amount.unit == Units::Ounce
        && defaults.weight.is_none()
        && let Some(volume) = &defaults.volume
    {
        debug!("'{}': reading oz as fl oz", context.ingredient.name);
        context.amount.unit = Units::FluidOunce;
        return Ok(Some(volume.clone()));
    }
    Ok(defaults.get(context.amount.unit_type()).cloned())
}

fn fallthrough(context: &mut ResolveContext<'_>) -> Verdict {
    let Some((position, form)) = context.fallthrough_candidate() else {
        return Verdict::Failed(MatchResult::NoForm);
    };
    context.data.preps.remove(position);
    context.form = Some(form.clone());
    Verdict::Anomalous(AnomalousResult::Fallthrough)
}

fn auto_convert(context: &mut ResolveContext<'_>) -> Verdict {
    let Some(target) = context.auto_convert_target() else {
        return Verdict::Failed(MatchResult::IncompatibleForm);
    };
    if let Some(demoted) = context.form.replace(target.clone()) {
        context.data.preps.push(demoted.name);
    }
    Verdict::Anomalous(AnomalousResult::AutoConvert)
}

/// Rules that pick the form, in priority order.
pub fn form_rules<'a>() -> RuleChain<ResolveContext<'a>, FormStep> {
    RuleChain::new("form")
        .rule("anomaly", |c| c.data.anomaly_form.is_some(), take_anomaly_form)
        .rule("custom_unit", |c| c.custom_unit().is_some(), pair_custom_unit)
        .rule("form_token", |c| c.data.form.is_some(), pair_form_token)
        .rule("default_pairing", |_| true, default_pairing)
}

/// Rules that accept, repair or reject the chosen form, in priority order.
pub fn verdict_rules<'a>() -> RuleChain<ResolveContext<'a>, Verdict> {
    RuleChain::new("verdict")
        .rule("compatible", ResolveContext::form_is_compatible, |_| Verdict::Match)
        .rule("fallthrough", |c| c.fallthrough_candidate().is_some(), fallthrough)
        .rule("auto_convert", |c| c.auto_convert_target().is_some(), auto_convert)
        .rule("no_form", |c| c.form.is_none(), |_| {
            Verdict::Failed(MatchResult::NoForm)
        })
        .rule("incompatible", |_| true, |_| {
            Verdict::Failed(MatchResult::IncompatibleForm)
        })
}

/// Resolves grammar matches into parse results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Resolver
    }

    pub fn resolve(
        &self,
        input: &str,
        template: &GrammarTemplate,
        data: MatchData,
        vocabulary: &VocabularyStore,
    ) -> ParseResult {
        let no_match = |status| ParseResult::NoMatch {
            input: input.to_string(),
            status,
        };

        let Some(node_ref) = data.ingredient else {
            return no_match(MatchResult::None);
        };
        let ingredient = vocabulary.ingredients().ingredient(node_ref);

        let Some(amount) = data.amount else {
            if template.allow_partial() {
                return ParseResult::PartialMatch {
                    input: input.to_string(),
                    ingredient: ingredient.clone(),
                    prep_note: data.preps.joined(),
                };
            }
            return no_match(MatchResult::None);
        };

        let mut context = ResolveContext::new(vocabulary, ingredient, data, amount);
        match form_rules().evaluate(&mut context) {
            Some((_, Ok(form))) => context.form = form,
            Some((rule, Err(status))) => {
                debug!("'{input}': {rule} failed with {status}");
                return no_match(status);
            }
            None => {}
        }

        let verdict = verdict_rules()
            .evaluate(&mut context)
            .map_or(Verdict::Failed(MatchResult::None), |(_, verdict)| verdict);

        match (verdict, context.form.take()) {
            (Verdict::Match, Some(form)) => ParseResult::Match {
                input: input.to_string(),
                usage: context.into_usage(form),
            },
            (Verdict::Anomalous(anomaly), Some(form)) => ParseResult::AnomalousMatch {
                input: input.to_string(),
                usage: context.into_usage(form),
                anomaly,
            },
            (Verdict::Failed(status), _) => no_match(status),
            (_, None) => no_match(MatchResult::NoForm),
        }
    }
}

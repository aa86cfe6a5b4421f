//! Ordered predicate/action chains.
//!
//! A [`RuleChain`] evaluates its rules in order and runs the action of the
//! first rule whose predicate holds. Rules are plain function pointers over
//! a context type, so a chain is a static table that can be inspected and
//! tested rule by rule.

use log::debug;

/// A named predicate/action pair over a context `C`.
pub struct Rule<C, O> {
    pub name: &'static str,
    pub predicate: fn(&C) -> bool,
    pub action: fn(&mut C) -> O,
}

impl<C, O> Rule<C, O> {
    pub const fn new(name: &'static str, predicate: fn(&C) -> bool, action: fn(&mut C) -> O) -> Self {
        Rule {
            name,
            predicate,
            action,
        }
    }
}

impl<C, O> Clone for Rule<C, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, O> Copy for Rule<C, O> {}

impl<C, O> std::fmt::Debug for Rule<C, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Rules tried in order; the first applicable one wins.
pub struct RuleChain<C, O> {
    name: &'static str,
    rules: Vec<Rule<C, O>>,
}

impl<C, O> Clone for RuleChain<C, O> {
    fn clone(&self) -> Self {
        RuleChain {
            name: self.name,
            rules: self.rules.clone(),
        }
    }
}

impl<C, O> std::fmt::Debug for RuleChain<C, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleChain")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .finish()
    }
}

impl<C, O> RuleChain<C, O> {
    pub fn new(name: &'static str) -> Self {
        RuleChain {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a rule after the existing ones.
    pub fn rule(mut self, name: &'static str, predicate: fn(&C) -> bool, action: fn(&mut C) -> O) -> Self {
        self.rules.push(Rule::new(name, predicate, action));
        self
    }

    pub fn rules(&self) -> &[Rule<C, O>] {
        &self.rules
    }

    /// Run the first applicable rule, returning its name and output.
    pub fn evaluate(&self, context: &mut C) -> Option<(&'static str, O)> {
        let rule = self.rules.iter().find(|rule| (rule.predicate)(context))?;
        debug!("{}: applying rule '{}'", self.name, rule.name);
        Some((rule.name, (rule.action)(context)))
    }
}

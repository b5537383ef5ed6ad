//! Const-constructible descriptions of variables, rules and stages.
//!
//! These are plain data. [`crate::InferenceStage::from_definition`] checks them
//! and resolves every name into keys, so nothing here is consulted during
//! evaluation.

use crate::error::DefinitionError;
use crate::membership::MembershipFunction;
use crate::terms::Term;
use crate::variable::LinguisticVariable;

#[derive(Clone, Copy, Debug)]
pub struct TermDef {
    pub name: &'static str,
    pub function: MembershipFunction,
}

impl TermDef {
    pub const fn new(name: &'static str, function: MembershipFunction) -> Self {
        Self { name, function }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct VariableDef {
    pub name: &'static str,
    /// Closed interval `(lo, hi)`
    pub universe: (f64, f64),
    pub terms: &'static [TermDef],
}

impl VariableDef {
    pub fn build(&self) -> Result<LinguisticVariable, DefinitionError> {
        let (lo, hi) = self.universe;

        LinguisticVariable::new(
            self.name,
            lo..=hi,
            self.terms.iter().map(|t| Term::new(t.name, t.function)),
        )
    }
}

/// `IF premise[0] AND premise[1] ... THEN consequence`, each side given as
/// `(variable, term)` names.
#[derive(Clone, Copy, Debug)]
pub struct RuleDef {
    pub premise: &'static [(&'static str, &'static str)],
    pub consequence: (&'static str, &'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct StageDef {
    pub name: &'static str,
    pub antecedents: &'static [VariableDef],
    pub consequent: VariableDef,
    pub rules: &'static [RuleDef],
}

/// Shorthand for a `Triangular` term in const tables
pub const fn tri(name: &'static str, a: f64, b: f64, c: f64) -> TermDef {
    TermDef::new(name, MembershipFunction::Triangular { a, b, c })
}

/// Shorthand for a `Trapezoidal` term in const tables
pub const fn trap(name: &'static str, a: f64, b: f64, c: f64, d: f64) -> TermDef {
    TermDef::new(name, MembershipFunction::Trapezoidal { a, b, c, d })
}

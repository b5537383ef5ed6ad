use crate::ops::and;
use crate::variable::VariableKey;

/// `variable IS term`, with the term given by its index in the variable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Proposition {
    pub(crate) variable: VariableKey,
    pub(crate) term: usize,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub(crate) fn add(&mut self, premise: Vec<Proposition>, consequence: usize) {
        self.0.push(Rule { premise, consequence });
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}

/// A conjunction of propositions over the antecedents implying one term of the
/// consequent.
#[derive(Clone, Debug)]
pub(crate) struct Rule {
    pub(crate) premise: Vec<Proposition>,
    /// Index of the consequent term
    pub(crate) consequence: usize,
}

impl Rule {
    /// Fuzzy AND (min) of the premise's degrees. `degree_of` looks up the
    /// fuzzified degree of a proposition.
    pub(crate) fn firing_strength(&self, degree_of: impl Fn(&Proposition) -> f64) -> f64 {
        self.premise.iter().map(degree_of).fold(1., and)
    }
}

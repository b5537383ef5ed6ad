use crate::membership::MembershipFunction;

/// A named fuzzy subset of a variable's universe.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub(crate) name: String,
    pub(crate) function: MembershipFunction,
}

impl Term {
    pub fn new(name: impl Into<String>, function: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> &MembershipFunction {
        &self.function
    }

    pub fn degree(&self, x: f64) -> f64 {
        self.function.degree(x)
    }
}

/// A term's membership function sampled across its variable's universe,
/// for plotting.
#[derive(Clone, Debug, PartialEq)]
pub struct TermCurve {
    pub name: String,
    /// `(x, degree)` pairs in increasing `x`
    pub points: Vec<(f64, f64)>,
}

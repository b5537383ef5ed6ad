use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use slotmap::new_key_type;

use crate::error::DefinitionError;
use crate::linspace::Linspace;
use crate::terms::{Term, TermCurve};

new_key_type! {
    /// A variable key
    pub(crate) struct VariableKey;
}

/// A named universe together with the fuzzy terms defined over it.
///
/// Used both for antecedents (stage inputs) and for the consequent (stage
/// output). Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    min_u: f64,
    max_u: f64,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = Term>,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        if !(max_u - min_u).is_finite() || min_u >= max_u {
            return Err(DefinitionError::InvalidUniverse {
                variable: name,
                lo: min_u,
                hi: max_u,
            });
        }

        let terms: Vec<Term> = terms.into_iter().collect();

        if terms.is_empty() {
            return Err(DefinitionError::NoTerms { variable: name });
        }

        let mut seen = HashSet::with_capacity(terms.len());

        for term in &terms {
            if !seen.insert(term.name.as_str()) {
                return Err(DefinitionError::DuplicateTerm {
                    variable: name,
                    term: term.name.clone(),
                });
            }

            term.function.validate()?;

            let (lo, hi) = term.function.support();

            if lo < min_u || hi > max_u {
                return Err(DefinitionError::TermOutsideUniverse {
                    variable: name,
                    term: term.name.clone(),
                    lo: min_u,
                    hi: max_u,
                });
            }
        }

        Ok(Self {
            name,
            min_u,
            max_u,
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Degree of `x` in every term, keyed by term name.
    ///
    /// Terms are evaluated independently; the degrees are not normalised and
    /// need not sum to one.
    pub fn membership_degrees(&self, x: f64) -> HashMap<&str, f64> {
        self.terms.iter().map(|t| (t.name.as_str(), t.degree(x))).collect()
    }

    /// Degree of `x` in every term, in term order.
    pub fn degrees(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.degree(x)).collect()
    }

    /// `resolution` evenly spaced points covering the universe.
    pub fn samples(&self, resolution: usize) -> Linspace {
        Linspace::new(self.min_u, self.max_u, resolution)
    }

    /// Every term's membership function sampled at `resolution` points.
    pub fn sample_terms(&self, resolution: usize) -> Vec<TermCurve> {
        let xs: Vec<f64> = self.samples(resolution).collect();

        self.terms
            .iter()
            .map(|term| TermCurve {
                name: term.name.clone(),
                points: xs
                    .iter()
                    .copied()
                    .zip(term.function.sample(xs.iter().copied()))
                    .collect(),
            })
            .collect()
    }
}

#[test]
fn test_membership_degrees() {
    use crate::membership::MembershipFunction::*;

    let var = LinguisticVariable::new(
        "Comida",
        0. ..=10.,
        [
            Term::new("Ruim", Trapezoidal { a: 0., b: 0., c: 3., d: 5. }),
            Term::new("Regular", Trapezoidal { a: 3., b: 5., c: 6., d: 8. }),
            Term::new("Boa", Trapezoidal { a: 6., b: 8., c: 10., d: 10. }),
        ],
    )
    .unwrap();

    let degrees = var.membership_degrees(4.);

    assert_eq!(degrees.len(), 3);
    assert_eq!(degrees["Ruim"], 0.5);
    assert_eq!(degrees["Regular"], 0.5);
    assert_eq!(degrees["Boa"], 0.);
    assert_eq!(var.degrees(7.), vec![0., 0.5, 0.5]);
    assert_eq!(var.degrees(11.), vec![0., 0., 0.]);
    assert_eq!(var.term_index("Boa"), Some(2));
    assert!(var.term("Bom").is_none());
}

#[test]
fn test_overlapping_terms_not_normalised() {
    use crate::membership::MembershipFunction::*;

    let var = LinguisticVariable::new(
        "x",
        0. ..=10.,
        [
            Term::new("wide", Trapezoidal { a: 0., b: 0., c: 10., d: 10. }),
            Term::new("narrow", Triangular { a: 4., b: 5., c: 6. }),
        ],
    )
    .unwrap();

    assert_eq!(var.degrees(5.), vec![1., 1.]);
}

#[test]
fn test_invalid_variables() {
    use crate::membership::MembershipFunction::*;

    let tri = Triangular { a: 0., b: 1., c: 2. };

    assert_eq!(
        LinguisticVariable::new("x", 5. ..=5., [Term::new("a", tri)]),
        Err(DefinitionError::InvalidUniverse {
            variable: "x".into(),
            lo: 5.,
            hi: 5.
        })
    );
    assert_eq!(
        LinguisticVariable::new("x", 0. ..=10., Vec::new()),
        Err(DefinitionError::NoTerms { variable: "x".into() })
    );
    assert_eq!(
        LinguisticVariable::new("x", 0. ..=10., [Term::new("a", tri), Term::new("a", tri)]),
        Err(DefinitionError::DuplicateTerm {
            variable: "x".into(),
            term: "a".into()
        })
    );
    assert_eq!(
        LinguisticVariable::new("x", 0. ..=1.5, [Term::new("a", tri)]),
        Err(DefinitionError::TermOutsideUniverse {
            variable: "x".into(),
            term: "a".into(),
            lo: 0.,
            hi: 1.5
        })
    );
    assert_eq!(
        LinguisticVariable::new("x", -f64::MAX..=f64::MAX, [Term::new("a", tri)]),
        Err(DefinitionError::InvalidUniverse {
            variable: "x".into(),
            lo: -f64::MAX,
            hi: f64::MAX
        })
    );
    assert!(matches!(
        LinguisticVariable::new("x", f64::NAN..=1., [Term::new("a", tri)]),
        Err(DefinitionError::InvalidUniverse { .. })
    ));
    assert!(matches!(
        LinguisticVariable::new("x", 0. ..=10., [Term::new("a", Triangular { a: 2., b: 1., c: 3. })]),
        Err(DefinitionError::UnorderedBreakpoints { .. })
    ));
}

#[test]
fn test_sample_terms() {
    use crate::membership::MembershipFunction::*;

    let var = LinguisticVariable::new(
        "x",
        0. ..=2.,
        [Term::new("peak", Triangular { a: 0., b: 1., c: 2. })],
    )
    .unwrap();
    let curves = var.sample_terms(5);

    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].name, "peak");
    assert_eq!(
        curves[0].points,
        vec![(0., 0.), (0.5, 0.5), (1., 1.), (1.5, 0.5), (2., 0.)]
    );
}

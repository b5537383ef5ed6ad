use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace};

use crate::definition::{RuleDef, StageDef};
use crate::error::{DefinitionError, FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{implication, production_link, Defuzzification};
use crate::outputs::Outputs;
use crate::rules::{Proposition, Rules};
use crate::variable::{LinguisticVariable, VariableKey};

/// Number of points the consequent universe is sampled at by default.
pub const DEFAULT_RESOLUTION: usize = 101;

/// One Mamdani inference step: antecedents in, one consequent out.
///
/// Evaluation runs fuzzification, min-AND rule evaluation, min implication,
/// max aggregation and centroid defuzzification. A stage is never mutated by
/// evaluation, so one instance can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct InferenceStage {
    name: String,
    variables: SlotMap<VariableKey, LinguisticVariable>,
    antecedents: Vec<VariableKey>,
    consequent: VariableKey,
    rules: Rules,
    resolution: usize,
    defuzz_op: Defuzzification,
    /// Sample points of the consequent universe
    universe: Vec<f64>,
    /// Consequent term memberships at each sample point, in term order
    consequent_samples: Vec<Vec<f64>>,
}

impl InferenceStage {
    pub fn new(
        name: impl Into<String>,
        antecedents: impl IntoIterator<Item = LinguisticVariable>,
        consequent: LinguisticVariable,
        rule_defs: &[RuleDef],
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        let mut variables: SlotMap<VariableKey, LinguisticVariable> = SlotMap::with_key();
        let mut antecedent_keys = Vec::new();

        for var in antecedents {
            if variables.values().any(|v| v.name() == var.name()) {
                return Err(DefinitionError::DuplicateVariable {
                    stage: name,
                    variable: var.name().to_owned(),
                });
            }

            antecedent_keys.push(variables.insert(var));
        }

        if antecedent_keys.is_empty() {
            return Err(DefinitionError::NoAntecedents { stage: name });
        }
        if variables.values().any(|v| v.name() == consequent.name()) {
            return Err(DefinitionError::DuplicateVariable {
                stage: name,
                variable: consequent.name().to_owned(),
            });
        }

        let consequent_key = variables.insert(consequent);
        let mut rules = Rules::with_capacity(rule_defs.len());

        for (i, rule_def) in rule_defs.iter().enumerate() {
            // Rules are numbered from one in messages
            let rule = i + 1;

            if rule_def.premise.is_empty() {
                return Err(DefinitionError::EmptyPremise { stage: name, rule });
            }

            let mut premise = Vec::with_capacity(rule_def.premise.len());

            for &(var_name, term_name) in rule_def.premise {
                let Some(&key) = antecedent_keys.iter().find(|k| variables[**k].name() == var_name) else {
                    return Err(DefinitionError::UnknownVariable {
                        stage: name,
                        rule,
                        variable: var_name.to_owned(),
                    });
                };
                let Some(term) = variables[key].term_index(term_name) else {
                    return Err(DefinitionError::UnknownTerm {
                        stage: name,
                        rule,
                        variable: var_name.to_owned(),
                        term: term_name.to_owned(),
                    });
                };

                premise.push(Proposition { variable: key, term });
            }

            let (var_name, term_name) = rule_def.consequence;
            let consequent = &variables[consequent_key];

            if consequent.name() != var_name {
                return Err(DefinitionError::ConsequentMismatch {
                    stage: name,
                    rule,
                    variable: var_name.to_owned(),
                    expected: consequent.name().to_owned(),
                });
            }

            let Some(consequence) = consequent.term_index(term_name) else {
                return Err(DefinitionError::UnknownTerm {
                    stage: name,
                    rule,
                    variable: var_name.to_owned(),
                    term: term_name.to_owned(),
                });
            };

            rules.add(premise, consequence);
        }

        debug!(
            stage = %name,
            antecedents = antecedent_keys.len(),
            rules = rules.len(),
            "built inference stage"
        );

        let mut this = Self {
            name,
            variables,
            antecedents: antecedent_keys,
            consequent: consequent_key,
            rules,
            resolution: DEFAULT_RESOLUTION,
            defuzz_op: Defuzzification::default(),
            universe: Vec::new(),
            consequent_samples: Vec::new(),
        };

        this.sample_consequent();

        Ok(this)
    }

    pub fn from_definition(def: &StageDef) -> Result<Self, DefinitionError> {
        let antecedents = def
            .antecedents
            .iter()
            .map(|v| v.build())
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(def.name, antecedents, def.consequent.build()?, def.rules)
    }

    /// Sets how many evenly spaced points of the consequent universe are used
    /// for defuzzification. At least two are required.
    pub fn with_resolution(mut self, resolution: usize) -> Result<Self, DefinitionError> {
        if resolution < 2 {
            return Err(DefinitionError::InvalidResolution { resolution });
        }

        self.resolution = resolution;
        self.sample_consequent();

        Ok(self)
    }

    pub fn with_defuzzification(mut self, defuzz_op: Defuzzification) -> Self {
        self.defuzz_op = defuzz_op;
        self
    }

    fn sample_consequent(&mut self) {
        let consequent = &self.variables[self.consequent];

        self.universe = consequent.samples(self.resolution).collect();
        self.consequent_samples = consequent
            .terms()
            .iter()
            .map(|term| term.function().sample(self.universe.iter().copied()))
            .collect();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn antecedents(&self) -> impl Iterator<Item = &LinguisticVariable> + '_ {
        self.antecedents.iter().map(|key| &self.variables[*key])
    }

    pub fn consequent(&self) -> &LinguisticVariable {
        &self.variables[self.consequent]
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn defuzzification(&self) -> Defuzzification {
        self.defuzz_op
    }

    /// Crisp output for the given crisp inputs.
    ///
    /// Fails with [`FuzzyError::DegenerateAggregation`] when no rule fires.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<f64> {
        self.infer(inputs).map(|outputs| outputs.value())
    }

    /// Like [`InferenceStage::evaluate`], keeping the rule firing strengths and
    /// the aggregated output set.
    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs> {
        // Fuzzificate Facts
        let mut fact_values = SecondaryMap::with_capacity(self.antecedents.len());

        for &key in &self.antecedents {
            let var = &self.variables[key];
            let Some(value) = inputs.get(var.name()) else {
                return Err(FuzzyError::MissingInput {
                    stage: self.name.clone(),
                    variable: var.name().to_owned(),
                });
            };

            fact_values.insert(key, var.degrees(value));
        }

        // Rule firing strengths
        let firing_strengths: Vec<f64> = self
            .rules
            .iter()
            .map(|rule| rule.firing_strength(|p| fact_values[p.variable][p.term]))
            .collect();

        // Implication and aggregation
        let mut aggregated = vec![0.; self.universe.len()];

        for (i, (rule, &strength)) in self.rules.iter().zip(&firing_strengths).enumerate() {
            if strength > 0. {
                trace!(stage = %self.name, rule = i + 1, strength, "rule fired");
            }

            let implied = implication(strength, self.consequent_samples[rule.consequence].iter().copied());

            aggregated = production_link(aggregated, implied).collect();
        }

        // Defuzzificate
        let Some(value) = self.defuzz_op.call(&self.universe, &aggregated) else {
            debug!(stage = %self.name, "no rule fired, aggregated set is empty");

            return Err(FuzzyError::DegenerateAggregation {
                stage: self.name.clone(),
                variable: self.consequent().name().to_owned(),
            });
        };

        debug!(stage = %self.name, value, "stage evaluated");

        Ok(Outputs::new(value, firing_strengths, self.universe.clone(), aggregated))
    }
}

#[cfg(test)]
fn shoulders() -> (LinguisticVariable, LinguisticVariable) {
    use crate::membership::MembershipFunction::*;
    use crate::terms::Term;

    let x = LinguisticVariable::new(
        "x",
        0. ..=10.,
        [
            Term::new("low", Trapezoidal { a: 0., b: 0., c: 0., d: 10. }),
            Term::new("high", Trapezoidal { a: 0., b: 10., c: 10., d: 10. }),
            Term::new("edge", Triangular { a: 9., b: 10., c: 10. }),
        ],
    )
    .unwrap();
    let y = LinguisticVariable::new(
        "y",
        0. ..=10.,
        [
            Term::new("small", Triangular { a: 0., b: 0., c: 5. }),
            Term::new("mid", Triangular { a: 2.5, b: 5., c: 7.5 }),
        ],
    )
    .unwrap();

    (x, y)
}

#[test]
fn test_aggregation_is_max_not_sum() {
    const BOTH: &[RuleDef] = &[
        RuleDef {
            premise: &[("x", "low")],
            consequence: ("y", "mid"),
        },
        RuleDef {
            premise: &[("x", "high")],
            consequence: ("y", "mid"),
        },
    ];
    const HIGH_ONLY: &[RuleDef] = &[RuleDef {
        premise: &[("x", "high")],
        consequence: ("y", "mid"),
    }];

    let (x, y) = shoulders();
    let both = InferenceStage::new("both", [x.clone()], y.clone(), BOTH).unwrap();
    let high_only = InferenceStage::new("high", [x], y, HIGH_ONLY).unwrap();
    let inputs = Inputs::new().with("x", 7.);

    let both_out = both.infer(&inputs).unwrap();
    let high_out = high_only.infer(&inputs).unwrap();

    assert!((both_out.firing_strengths()[0] - 0.3).abs() < 1e-12);
    assert!((both_out.firing_strengths()[1] - 0.7).abs() < 1e-12);
    assert_eq!(
        both_out.aggregated().collect::<Vec<_>>(),
        high_out.aggregated().collect::<Vec<_>>()
    );
    assert_eq!(both_out.value(), high_out.value());
    // The clipped triangle is symmetric around its peak
    assert!((both_out.value() - 5.).abs() < 1e-9);
}

#[test]
fn test_no_rule_fired() {
    const RULES: &[RuleDef] = &[RuleDef {
        premise: &[("x", "edge")],
        consequence: ("y", "small"),
    }];

    let (x, y) = shoulders();
    let stage = InferenceStage::new("edge", [x], y, RULES).unwrap();

    assert_eq!(
        stage.evaluate(&Inputs::new().with("x", 5.)),
        Err(FuzzyError::DegenerateAggregation {
            stage: "edge".into(),
            variable: "y".into()
        })
    );
    assert_eq!(
        stage
            .with_defuzzification(Defuzzification::AreaCentroid)
            .evaluate(&Inputs::new().with("x", 5.)),
        Err(FuzzyError::DegenerateAggregation {
            stage: "edge".into(),
            variable: "y".into()
        })
    );
}

#[test]
fn test_missing_input() {
    const RULES: &[RuleDef] = &[RuleDef {
        premise: &[("x", "low")],
        consequence: ("y", "small"),
    }];

    let (x, y) = shoulders();
    let stage = InferenceStage::new("s", [x], y, RULES).unwrap();

    assert_eq!(
        stage.evaluate(&Inputs::new().with("z", 1.)),
        Err(FuzzyError::MissingInput {
            stage: "s".into(),
            variable: "x".into()
        })
    );
}

#[test]
fn test_resolution() {
    const RULES: &[RuleDef] = &[RuleDef {
        premise: &[("x", "high")],
        consequence: ("y", "mid"),
    }];

    let (x, y) = shoulders();
    let stage = InferenceStage::new("s", [x], y, RULES).unwrap();

    assert_eq!(stage.resolution(), DEFAULT_RESOLUTION);
    assert_eq!(
        stage.clone().with_resolution(1).unwrap_err(),
        DefinitionError::InvalidResolution { resolution: 1 }
    );

    let coarse = stage.clone().with_resolution(11).unwrap();
    let outputs = coarse.infer(&Inputs::new().with("x", 10.)).unwrap();

    assert_eq!(outputs.aggregated().count(), 11);
    assert!((outputs.value() - 5.).abs() < 1e-9);
    assert_eq!(outputs.max_firing_strength(), 1.);
}

#[test]
fn test_definition_errors() {
    let (x, y) = shoulders();
    let build = |rules: &[RuleDef]| InferenceStage::new("s", [x.clone()], y.clone(), rules).map(|_| ());

    assert_eq!(
        build(&[RuleDef {
            premise: &[],
            consequence: ("y", "mid")
        }]),
        Err(DefinitionError::EmptyPremise { stage: "s".into(), rule: 1 })
    );
    assert_eq!(
        build(&[
            RuleDef {
                premise: &[("x", "low")],
                consequence: ("y", "mid")
            },
            RuleDef {
                premise: &[("w", "low")],
                consequence: ("y", "mid")
            }
        ]),
        Err(DefinitionError::UnknownVariable {
            stage: "s".into(),
            rule: 2,
            variable: "w".into()
        })
    );
    assert_eq!(
        build(&[RuleDef {
            premise: &[("x", "medium")],
            consequence: ("y", "mid")
        }]),
        Err(DefinitionError::UnknownTerm {
            stage: "s".into(),
            rule: 1,
            variable: "x".into(),
            term: "medium".into()
        })
    );
    assert_eq!(
        build(&[RuleDef {
            premise: &[("x", "low")],
            consequence: ("y", "huge")
        }]),
        Err(DefinitionError::UnknownTerm {
            stage: "s".into(),
            rule: 1,
            variable: "y".into(),
            term: "huge".into()
        })
    );
    assert_eq!(
        build(&[RuleDef {
            premise: &[("x", "low")],
            consequence: ("x", "high")
        }]),
        Err(DefinitionError::ConsequentMismatch {
            stage: "s".into(),
            rule: 1,
            variable: "x".into(),
            expected: "y".into()
        })
    );
    assert_eq!(
        InferenceStage::new("s", [x.clone(), x.clone()], y.clone(), &[]).map(|_| ()),
        Err(DefinitionError::DuplicateVariable {
            stage: "s".into(),
            variable: "x".into()
        })
    );
    assert_eq!(
        InferenceStage::new("s", [y.clone()], y.clone(), &[]).map(|_| ()),
        Err(DefinitionError::DuplicateVariable {
            stage: "s".into(),
            variable: "y".into()
        })
    );
    assert_eq!(
        InferenceStage::new("s", Vec::new(), y, &[]).map(|_| ()),
        Err(DefinitionError::NoAntecedents { stage: "s".into() })
    );
}

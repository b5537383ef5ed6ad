//! Error types for definition and evaluation.

use thiserror::Error;

/// Problems found while turning definition tables into executable stages.
///
/// These are only ever produced at construction time.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DefinitionError {
    #[error("breakpoints {points:?} are not in non-decreasing order")]
    UnorderedBreakpoints { points: Vec<f64> },
    #[error("breakpoints {points:?} contain a non-finite value or span")]
    NonFiniteBreakpoint { points: Vec<f64> },
    #[error("variable {variable} has an invalid universe [{lo}, {hi}]")]
    InvalidUniverse { variable: String, lo: f64, hi: f64 },
    #[error("variable {variable} has no terms")]
    NoTerms { variable: String },
    #[error("variable {variable} defines term {term} more than once")]
    DuplicateTerm { variable: String, term: String },
    #[error("stage {stage} defines variable {variable} more than once")]
    DuplicateVariable { stage: String, variable: String },
    #[error("term {term} of variable {variable} reaches outside the universe [{lo}, {hi}]")]
    TermOutsideUniverse {
        variable: String,
        term: String,
        lo: f64,
        hi: f64,
    },
    #[error("stage {stage} has no antecedent variables")]
    NoAntecedents { stage: String },
    #[error("rule {rule} of stage {stage} has an empty premise")]
    EmptyPremise { stage: String, rule: usize },
    #[error("rule {rule} of stage {stage} references unknown variable {variable}")]
    UnknownVariable {
        stage: String,
        rule: usize,
        variable: String,
    },
    #[error("rule {rule} of stage {stage} references unknown term {term} of variable {variable}")]
    UnknownTerm {
        stage: String,
        rule: usize,
        variable: String,
        term: String,
    },
    #[error("rule {rule} of stage {stage} concludes on {variable} but the consequent is {expected}")]
    ConsequentMismatch {
        stage: String,
        rule: usize,
        variable: String,
        expected: String,
    },
    #[error("sampling resolution {resolution} is too small (at least 2 points are needed)")]
    InvalidResolution { resolution: usize },
}

/// Errors returned by the inference engine.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    /// No rule attained a positive firing strength, so the aggregated output
    /// set is zero everywhere and has no centroid.
    #[error("no rule fired in stage {stage}: the aggregated set of {variable} is empty")]
    DegenerateAggregation { stage: String, variable: String },
    #[error("invalid fuzzy definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),
    #[error("stage {stage} is missing an input for {variable}")]
    MissingInput { stage: String, variable: String },
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

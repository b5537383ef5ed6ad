//! Hierarchical Mamdani fuzzy inference for tip recommendations.
//!
//! Five crisp ratings in `[0, 10]` go through two inference stages, Service
//! (atendimento, comida) and Structure (estacionamento, acessibilidade,
//! limpeza), whose crisp outputs feed a third Tip stage producing a score in
//! `[0, 15]`.
//!
//! ```no_run
//! use fuzzy_tip::Pipeline;
//!
//! let pipeline = Pipeline::new()?;
//! let tip = pipeline.evaluate(4., 7., 5., 7., 3.)?;
//!
//! println!("tip: {tip:.2}");
//! # Ok::<(), fuzzy_tip::FuzzyError>(())
//! ```
//!
//! The engine underneath is generic: build an [`InferenceStage`] from any
//! [`StageDef`] table or from [`LinguisticVariable`]s directly.

mod definition;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod pipeline;
mod rules;
pub mod stages;
mod terms;
mod variable;

pub use definition::{trap, tri, RuleDef, StageDef, TermDef, VariableDef};
pub use error::{DefinitionError, FuzzyError, Result};
pub use inference::{InferenceStage, DEFAULT_RESOLUTION};
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::MembershipFunction;
pub use ops::Defuzzification;
pub use outputs::Outputs;
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutputs, Ratings, Stage};
pub use terms::{Term, TermCurve};
pub use variable::LinguisticVariable;

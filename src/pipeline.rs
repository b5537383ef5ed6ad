use fixed_map::{Key, Map as FixedMap};
use tracing::debug;

use crate::definition::StageDef;
use crate::error::{DefinitionError, Result};
use crate::inference::{InferenceStage, DEFAULT_RESOLUTION};
use crate::inputs::Inputs;
use crate::ops::Defuzzification;
use crate::stages::{SERVICE, STRUCTURE, TIP};
use crate::terms::TermCurve;

/// The three stages of the tip pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Stage {
    Service,
    Structure,
    Tip,
}

/// The five raw ratings, each conventionally in `[0, 10]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ratings {
    pub atendimento: f64,
    pub comida: f64,
    pub estacionamento: f64,
    pub acessibilidade: f64,
    pub limpeza: f64,
}

/// Options applied to every stage of a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub resolution: usize,
    pub defuzzification: Defuzzification,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            defuzzification: Defuzzification::default(),
        }
    }
}

/// Crisp output of every stage from one pipeline evaluation.
#[derive(Clone, Debug)]
pub struct PipelineOutputs(FixedMap<Stage, f64>);

impl PipelineOutputs {
    pub fn get(&self, stage: Stage) -> Option<f64> {
        self.0.get(stage).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stage, f64)> + '_ {
        self.0.iter().map(|(stage, value)| (stage, *value))
    }
}

/// Service and Structure ratings feed the Tip stage.
///
/// ```text
/// Atendimento, Comida                          -> Service   --\
///                                                              > Tip -> Gorjeta
/// Estacionamento, Acessibilidade, Limpeza      -> Structure --/
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    service: InferenceStage,
    structure: InferenceStage,
    tip: InferenceStage,
}

impl Pipeline {
    pub fn new() -> Result<Self, DefinitionError> {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Result<Self, DefinitionError> {
        let build = |def: &StageDef| -> Result<InferenceStage, DefinitionError> {
            Ok(InferenceStage::from_definition(def)?
                .with_resolution(config.resolution)?
                .with_defuzzification(config.defuzzification))
        };

        Ok(Self {
            service: build(&SERVICE)?,
            structure: build(&STRUCTURE)?,
            tip: build(&TIP)?,
        })
    }

    pub fn stage(&self, stage: Stage) -> &InferenceStage {
        match stage {
            Stage::Service => &self.service,
            Stage::Structure => &self.structure,
            Stage::Tip => &self.tip,
        }
    }

    /// Tip score, conventionally in `[0, 15]`.
    pub fn evaluate(
        &self,
        atendimento: f64,
        comida: f64,
        estacionamento: f64,
        acessibilidade: f64,
        limpeza: f64,
    ) -> Result<f64> {
        self.evaluate_ratings(&Ratings {
            atendimento,
            comida,
            estacionamento,
            acessibilidade,
            limpeza,
        })
    }

    pub fn evaluate_ratings(&self, ratings: &Ratings) -> Result<f64> {
        self.run(ratings).map(|(_, _, tip)| tip)
    }

    /// Evaluates every stage, keeping each stage's crisp output.
    pub fn evaluate_detailed(&self, ratings: &Ratings) -> Result<PipelineOutputs> {
        let (service, structure, tip) = self.run(ratings)?;
        let mut outputs = FixedMap::new();

        outputs.insert(Stage::Service, service);
        outputs.insert(Stage::Structure, structure);
        outputs.insert(Stage::Tip, tip);

        Ok(PipelineOutputs(outputs))
    }

    fn run(&self, ratings: &Ratings) -> Result<(f64, f64, f64)> {
        let service = self.service.evaluate(
            &Inputs::new()
                .with("Atendimento", ratings.atendimento)
                .with("Comida", ratings.comida),
        )?;
        let structure = self.structure.evaluate(
            &Inputs::new()
                .with("Estacionamento", ratings.estacionamento)
                .with("Acessibilidade", ratings.acessibilidade)
                .with("Limpeza", ratings.limpeza),
        )?;
        let tip = self.tip.evaluate(
            &Inputs::new()
                .with("Serviço", service)
                .with("Estrutura", structure),
        )?;

        debug!(service, structure, tip, "pipeline evaluated");

        Ok((service, structure, tip))
    }

    /// The Gorjeta terms sampled across `[0, 15]` at the tip stage's
    /// resolution, for drawing membership curves next to a computed tip.
    pub fn tip_membership_curves(&self) -> Vec<TermCurve> {
        self.tip.consequent().sample_terms(self.tip.resolution())
    }
}

#[test]
fn test_stage_accessor() {
    let pipeline = Pipeline::new().unwrap();

    assert_eq!(pipeline.stage(Stage::Service).name(), "Service");
    assert_eq!(pipeline.stage(Stage::Structure).rule_count(), 27);
    assert_eq!(pipeline.stage(Stage::Tip).consequent().name(), "Gorjeta");
}

#[test]
fn test_config() {
    let config = PipelineConfig {
        resolution: 201,
        defuzzification: Defuzzification::AreaCentroid,
    };
    let pipeline = Pipeline::with_config(config).unwrap();

    for stage in [Stage::Service, Stage::Structure, Stage::Tip] {
        assert_eq!(pipeline.stage(stage).resolution(), 201);
        assert_eq!(pipeline.stage(stage).defuzzification(), Defuzzification::AreaCentroid);
    }

    assert_eq!(
        Pipeline::with_config(PipelineConfig {
            resolution: 0,
            ..PipelineConfig::default()
        })
        .unwrap_err(),
        DefinitionError::InvalidResolution { resolution: 0 }
    );
}

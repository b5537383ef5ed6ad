use approx::assert_abs_diff_eq;
use fuzzy_tip::{Defuzzification, FuzzyError, Inputs, Pipeline, PipelineConfig, Ratings, Stage};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn service_inputs(atendimento: f64, comida: f64) -> Inputs {
    Inputs::new().with("Atendimento", atendimento).with("Comida", comida)
}

fn structure_inputs(estacionamento: f64, acessibilidade: f64, limpeza: f64) -> Inputs {
    Inputs::new()
        .with("Estacionamento", estacionamento)
        .with("Acessibilidade", acessibilidade)
        .with("Limpeza", limpeza)
}

fn tip_inputs(servico: f64, estrutura: f64) -> Inputs {
    Inputs::new().with("Serviço", servico).with("Estrutura", estrutura)
}

#[test]
fn test_service_uniform_maximum() {
    init_tracing();

    let pipeline = Pipeline::new().unwrap();
    let outputs = pipeline.stage(Stage::Service).infer(&service_inputs(10., 10.)).unwrap();

    // Only Bom x Boa -> Ótimo fires
    let fired: Vec<usize> = outputs
        .firing_strengths()
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > 0.)
        .map(|(i, _)| i)
        .collect();

    assert_eq!(fired, vec![8]);
    assert_eq!(outputs.firing_strengths()[8], 1.);
    assert_abs_diff_eq!(outputs.value(), 8.59, epsilon = 0.1);
}

#[test]
fn test_structure_uniform_maximum() {
    init_tracing();

    let pipeline = Pipeline::new().unwrap();
    let outputs = pipeline
        .stage(Stage::Structure)
        .infer(&structure_inputs(10., 10., 10.))
        .unwrap();

    assert_eq!(outputs.firing_strengths().iter().filter(|s| **s > 0.).count(), 1);
    assert_eq!(outputs.firing_strengths()[26], 1.);
    assert_abs_diff_eq!(outputs.value(), 8.59, epsilon = 0.1);
}

#[test]
fn test_chained_maximum() {
    init_tracing();

    let pipeline = Pipeline::new().unwrap();
    let outputs = pipeline
        .evaluate_detailed(&Ratings {
            atendimento: 10.,
            comida: 10.,
            estacionamento: 10.,
            acessibilidade: 10.,
            limpeza: 10.,
        })
        .unwrap();
    let servico = outputs.get(Stage::Service).unwrap();
    let estrutura = outputs.get(Stage::Structure).unwrap();
    let tip = pipeline.stage(Stage::Tip).infer(&tip_inputs(servico, estrutura)).unwrap();

    // Both land on the plateau of Bom/Boa so only the last rule fires
    assert_eq!(tip.firing_strengths()[8], 1.);
    assert_eq!(tip.max_firing_strength(), 1.);
    assert_eq!(tip.firing_strengths().iter().filter(|s| **s > 0.).count(), 1);
    assert_abs_diff_eq!(outputs.get(Stage::Tip).unwrap(), 13.75, epsilon = 0.15);
    assert_abs_diff_eq!(pipeline.evaluate(10., 10., 10., 10., 10.).unwrap(), 13.75, epsilon = 0.15);
}

#[test]
fn test_uniform_minimum() {
    init_tracing();

    let pipeline = Pipeline::new().unwrap();
    let outputs = pipeline.evaluate_detailed(&Ratings::default()).unwrap();

    assert_abs_diff_eq!(outputs.get(Stage::Service).unwrap(), 1.41, epsilon = 0.1);
    assert_abs_diff_eq!(outputs.get(Stage::Structure).unwrap(), 1.41, epsilon = 0.1);
    assert_abs_diff_eq!(outputs.get(Stage::Tip).unwrap(), 1.25, epsilon = 0.1);
    assert_eq!(outputs.iter().count(), 3);
    assert_eq!(
        pipeline.evaluate(0., 0., 0., 0., 0.).unwrap(),
        outputs.get(Stage::Tip).unwrap()
    );
}

#[test]
fn test_area_centroid_matches_continuous_centroids() {
    let pipeline = Pipeline::with_config(PipelineConfig {
        defuzzification: Defuzzification::AreaCentroid,
        ..PipelineConfig::default()
    })
    .unwrap();

    let high = pipeline
        .evaluate_detailed(&Ratings {
            atendimento: 10.,
            comida: 10.,
            estacionamento: 10.,
            acessibilidade: 10.,
            limpeza: 10.,
        })
        .unwrap();

    assert_abs_diff_eq!(high.get(Stage::Service).unwrap(), 8.5909, epsilon = 0.01);
    assert_abs_diff_eq!(high.get(Stage::Structure).unwrap(), 8.5909, epsilon = 0.01);
    assert_abs_diff_eq!(high.get(Stage::Tip).unwrap(), 13.75, epsilon = 0.02);

    let low = pipeline.evaluate_detailed(&Ratings::default()).unwrap();

    assert_abs_diff_eq!(low.get(Stage::Service).unwrap(), 1.4091, epsilon = 0.01);
    assert_abs_diff_eq!(low.get(Stage::Tip).unwrap(), 1.25, epsilon = 0.02);
}

#[test]
fn test_service_diagonal_is_monotonic() {
    let pipeline = Pipeline::new().unwrap();
    let service = pipeline.stage(Stage::Service);
    // Representative points of Ruim, Regular and Bom/Boa
    let sweep = [0., 5.5, 10.];

    let by_comida: Vec<f64> = sweep
        .iter()
        .map(|&c| service.evaluate(&service_inputs(0., c)).unwrap())
        .collect();
    let by_atendimento: Vec<f64> = sweep
        .iter()
        .map(|&a| service.evaluate(&service_inputs(a, 0.)).unwrap())
        .collect();

    assert!(by_comida.windows(2).all(|w| w[0] <= w[1]), "{by_comida:?}");
    assert!(by_atendimento.windows(2).all(|w| w[0] <= w[1]), "{by_atendimento:?}");
    assert_abs_diff_eq!(by_comida[1], 3.5, epsilon = 1e-9);
    assert_abs_diff_eq!(by_comida[2], 5., epsilon = 1e-9);
}

#[test]
fn test_tip_diagonal_is_monotonic() {
    let pipeline = Pipeline::new().unwrap();
    let tip = pipeline.stage(Stage::Tip);
    let sweep = [0., 5.5, 10.];

    let by_estrutura: Vec<f64> = sweep
        .iter()
        .map(|&e| tip.evaluate(&tip_inputs(0., e)).unwrap())
        .collect();
    let by_servico: Vec<f64> = sweep
        .iter()
        .map(|&s| tip.evaluate(&tip_inputs(s, 0.)).unwrap())
        .collect();

    assert!(by_estrutura.windows(2).all(|w| w[0] <= w[1]), "{by_estrutura:?}");
    assert!(by_servico.windows(2).all(|w| w[0] <= w[1]), "{by_servico:?}");
}

#[test]
fn test_no_rule_fired_is_an_error() {
    init_tracing();

    let pipeline = Pipeline::new().unwrap();

    assert_eq!(
        pipeline.evaluate(-1., 5., 5., 5., 5.),
        Err(FuzzyError::DegenerateAggregation {
            stage: "Service".into(),
            variable: "Serviço".into()
        })
    );
    assert_eq!(
        pipeline.evaluate(5., 5., 5., 5., 10.5),
        Err(FuzzyError::DegenerateAggregation {
            stage: "Structure".into(),
            variable: "Estrutura".into()
        })
    );
    assert_eq!(
        pipeline.stage(Stage::Tip).evaluate(&tip_inputs(11., 5.)),
        Err(FuzzyError::DegenerateAggregation {
            stage: "Tip".into(),
            variable: "Gorjeta".into()
        })
    );
}

#[test]
fn test_missing_input() {
    let pipeline = Pipeline::new().unwrap();

    assert_eq!(
        pipeline
            .stage(Stage::Service)
            .evaluate(&Inputs::new().with("Atendimento", 5.)),
        Err(FuzzyError::MissingInput {
            stage: "Service".into(),
            variable: "Comida".into()
        })
    );
}

#[test]
fn test_idempotent() {
    let pipeline = Pipeline::new().unwrap();
    let first = pipeline.evaluate(4., 7., 5., 7., 3.).unwrap();

    for _ in 0..10 {
        assert_eq!(pipeline.evaluate(4., 7., 5., 7., 3.).unwrap(), first);
    }

    assert!((0. ..=15.).contains(&first));
}

#[test]
fn test_concurrent_evaluation() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Pipeline>();

    let pipeline = Pipeline::new().unwrap();
    let grid: Vec<Ratings> = (0..=10)
        .map(|i| {
            let v = i as f64;

            Ratings {
                atendimento: v,
                comida: 10. - v,
                estacionamento: v / 2.,
                acessibilidade: v,
                limpeza: 10. - v / 2.,
            }
        })
        .collect();
    let sequential: Vec<f64> = grid.iter().map(|r| pipeline.evaluate_ratings(r).unwrap()).collect();

    let grid = &grid;
    let pipeline = &pipeline;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    grid.iter()
                        .map(|r| pipeline.evaluate_ratings(r).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}

#[test]
fn test_tip_membership_curves() {
    let pipeline = Pipeline::new().unwrap();
    let curves = pipeline.tip_membership_curves();
    let names: Vec<&str> = curves.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, ["Muito baixa", "Baixa", "Média", "Alta", "Muito alta"]);

    for curve in &curves {
        assert_eq!(curve.points.len(), 101);
        assert_eq!(curve.points[0].0, 0.);
        assert_eq!(curve.points[100].0, 15.);
        assert!(curve.points.iter().all(|&(_, d)| (0. ..=1.).contains(&d)));
    }

    assert_eq!(curves[0].points[0].1, 1.);
    assert_eq!(curves[4].points[100].1, 1.);
    assert_eq!(curves[2].points[50].1, 1.);
}

//! The reference tables for the Service, Structure and Tip stages.

use crate::definition::{trap, tri, RuleDef, StageDef, TermDef, VariableDef};

const RATING: (f64, f64) = (0., 10.);

const SERVICE_RATING_MASC: &[TermDef] = &[
    trap("Ruim", 0., 0., 3., 5.),
    trap("Regular", 3., 5., 6., 8.),
    trap("Bom", 6., 8., 10., 10.),
];

const SERVICE_RATING_FEM: &[TermDef] = &[
    trap("Ruim", 0., 0., 3., 5.),
    trap("Regular", 3., 5., 6., 8.),
    trap("Boa", 6., 8., 10., 10.),
];

const STRUCTURE_RATING_MASC: &[TermDef] = &[
    trap("Ruim", 0., 0., 2., 4.),
    trap("Regular", 2., 4., 6., 8.),
    trap("Bom", 6., 8., 10., 10.),
];

const STRUCTURE_RATING_FEM: &[TermDef] = &[
    trap("Ruim", 0., 0., 2., 4.),
    trap("Regular", 2., 4., 6., 8.),
    trap("Boa", 6., 8., 10., 10.),
];

pub const ATENDIMENTO: VariableDef = VariableDef {
    name: "Atendimento",
    universe: RATING,
    terms: SERVICE_RATING_MASC,
};

pub const COMIDA: VariableDef = VariableDef {
    name: "Comida",
    universe: RATING,
    terms: SERVICE_RATING_FEM,
};

pub const SERVICO: VariableDef = VariableDef {
    name: "Serviço",
    universe: RATING,
    terms: &[
        trap("Péssimo", 0., 0., 2., 3.5),
        tri("Ruim", 2., 3.5, 5.),
        tri("Regular", 3.5, 5., 6.5),
        tri("Bom", 5., 6.5, 8.),
        trap("Ótimo", 6.5, 8., 10., 10.),
    ],
};

pub const ESTACIONAMENTO: VariableDef = VariableDef {
    name: "Estacionamento",
    universe: RATING,
    terms: STRUCTURE_RATING_MASC,
};

pub const ACESSIBILIDADE: VariableDef = VariableDef {
    name: "Acessibilidade",
    universe: RATING,
    terms: STRUCTURE_RATING_FEM,
};

pub const LIMPEZA: VariableDef = VariableDef {
    name: "Limpeza",
    universe: RATING,
    terms: STRUCTURE_RATING_FEM,
};

pub const ESTRUTURA: VariableDef = VariableDef {
    name: "Estrutura",
    universe: RATING,
    terms: &[
        trap("Péssima", 0., 0., 2., 3.5),
        tri("Ruim", 2., 3.5, 5.),
        tri("Regular", 3.5, 5., 6.5),
        tri("Boa", 5., 6.5, 8.),
        trap("Ótima", 6.5, 8., 10., 10.),
    ],
};

/// Serviço as seen by the tip stage, with its own three-term partition
pub const SERVICO_TIP: VariableDef = VariableDef {
    name: "Serviço",
    universe: RATING,
    terms: &[
        trap("Ruim", 0., 0., 2., 5.),
        tri("Regular", 2., 5., 8.),
        trap("Bom", 5., 8., 10., 10.),
    ],
};

/// Estrutura as seen by the tip stage
pub const ESTRUTURA_TIP: VariableDef = VariableDef {
    name: "Estrutura",
    universe: RATING,
    terms: SERVICE_RATING_FEM,
};

pub const GORJETA: VariableDef = VariableDef {
    name: "Gorjeta",
    universe: (0., 15.),
    terms: &[
        tri("Muito baixa", 0., 0., 3.755),
        tri("Baixa", 0., 3.75, 7.5),
        tri("Média", 3.75, 7.5, 11.25),
        tri("Alta", 7.5, 11.25, 15.),
        tri("Muito alta", 11.25, 15., 15.),
    ],
};

macro_rules! rules {
    ($( [$($var:literal = $term:literal),+] => $out_var:literal = $out_term:literal ),+ $(,)?) => {
        &[$(
            RuleDef {
                premise: &[$(($var, $term)),+],
                consequence: ($out_var, $out_term),
            }
        ),+]
    };
}

pub const SERVICE: StageDef = StageDef {
    name: "Service",
    antecedents: &[ATENDIMENTO, COMIDA],
    consequent: SERVICO,
    rules: rules![
        ["Atendimento" = "Ruim", "Comida" = "Ruim"] => "Serviço" = "Péssimo",
        ["Atendimento" = "Ruim", "Comida" = "Regular"] => "Serviço" = "Ruim",
        ["Atendimento" = "Ruim", "Comida" = "Boa"] => "Serviço" = "Regular",
        ["Atendimento" = "Regular", "Comida" = "Ruim"] => "Serviço" = "Ruim",
        ["Atendimento" = "Regular", "Comida" = "Regular"] => "Serviço" = "Regular",
        ["Atendimento" = "Regular", "Comida" = "Boa"] => "Serviço" = "Bom",
        ["Atendimento" = "Bom", "Comida" = "Ruim"] => "Serviço" = "Regular",
        ["Atendimento" = "Bom", "Comida" = "Regular"] => "Serviço" = "Bom",
        ["Atendimento" = "Bom", "Comida" = "Boa"] => "Serviço" = "Ótimo",
    ],
};

pub const STRUCTURE: StageDef = StageDef {
    name: "Structure",
    antecedents: &[ESTACIONAMENTO, ACESSIBILIDADE, LIMPEZA],
    consequent: ESTRUTURA,
    rules: rules![
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Ruim", "Limpeza" = "Ruim"] => "Estrutura" = "Péssima",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Ruim", "Limpeza" = "Regular"] => "Estrutura" = "Péssima",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Ruim", "Limpeza" = "Boa"] => "Estrutura" = "Ruim",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Regular", "Limpeza" = "Ruim"] => "Estrutura" = "Péssima",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Regular", "Limpeza" = "Regular"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Regular", "Limpeza" = "Boa"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Boa", "Limpeza" = "Ruim"] => "Estrutura" = "Ruim",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Boa", "Limpeza" = "Regular"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Ruim", "Acessibilidade" = "Boa", "Limpeza" = "Boa"] => "Estrutura" = "Boa",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Ruim", "Limpeza" = "Ruim"] => "Estrutura" = "Péssima",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Ruim", "Limpeza" = "Regular"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Ruim", "Limpeza" = "Boa"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Regular", "Limpeza" = "Ruim"] => "Estrutura" = "Ruim",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Regular", "Limpeza" = "Regular"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Regular", "Limpeza" = "Boa"] => "Estrutura" = "Boa",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Boa", "Limpeza" = "Ruim"] => "Estrutura" = "Ruim",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Boa", "Limpeza" = "Regular"] => "Estrutura" = "Boa",
        ["Estacionamento" = "Regular", "Acessibilidade" = "Boa", "Limpeza" = "Boa"] => "Estrutura" = "Ótima",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Ruim", "Limpeza" = "Ruim"] => "Estrutura" = "Péssima",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Ruim", "Limpeza" = "Regular"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Ruim", "Limpeza" = "Boa"] => "Estrutura" = "Boa",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Regular", "Limpeza" = "Ruim"] => "Estrutura" = "Ruim",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Regular", "Limpeza" = "Regular"] => "Estrutura" = "Boa",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Regular", "Limpeza" = "Boa"] => "Estrutura" = "Ótima",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Boa", "Limpeza" = "Ruim"] => "Estrutura" = "Regular",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Boa", "Limpeza" = "Regular"] => "Estrutura" = "Ótima",
        ["Estacionamento" = "Bom", "Acessibilidade" = "Boa", "Limpeza" = "Boa"] => "Estrutura" = "Ótima",
    ],
};

pub const TIP: StageDef = StageDef {
    name: "Tip",
    antecedents: &[SERVICO_TIP, ESTRUTURA_TIP],
    consequent: GORJETA,
    rules: rules![
        ["Serviço" = "Ruim", "Estrutura" = "Ruim"] => "Gorjeta" = "Muito baixa",
        ["Serviço" = "Ruim", "Estrutura" = "Regular"] => "Gorjeta" = "Baixa",
        ["Serviço" = "Ruim", "Estrutura" = "Boa"] => "Gorjeta" = "Média",
        ["Serviço" = "Regular", "Estrutura" = "Ruim"] => "Gorjeta" = "Baixa",
        ["Serviço" = "Regular", "Estrutura" = "Regular"] => "Gorjeta" = "Média",
        ["Serviço" = "Regular", "Estrutura" = "Boa"] => "Gorjeta" = "Alta",
        ["Serviço" = "Bom", "Estrutura" = "Ruim"] => "Gorjeta" = "Média",
        ["Serviço" = "Bom", "Estrutura" = "Regular"] => "Gorjeta" = "Alta",
        ["Serviço" = "Bom", "Estrutura" = "Boa"] => "Gorjeta" = "Muito alta",
    ],
};

#[test]
fn test_rule_counts() {
    assert_eq!(SERVICE.rules.len(), 9);
    assert_eq!(STRUCTURE.rules.len(), 27);
    assert_eq!(TIP.rules.len(), 9);
}

#[test]
fn test_structure_rules_cover_every_combination() {
    use std::collections::HashSet;

    let combinations: HashSet<_> = STRUCTURE.rules.iter().map(|r| r.premise.to_vec()).collect();

    assert_eq!(combinations.len(), 27);
}

#[test]
fn test_definitions_build() {
    use crate::inference::InferenceStage;

    for def in [SERVICE, STRUCTURE, TIP] {
        let stage = InferenceStage::from_definition(&def).unwrap();

        assert_eq!(stage.rule_count(), def.rules.len());
        assert_eq!(stage.antecedents().count(), def.antecedents.len());
    }
}

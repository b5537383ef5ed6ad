use std::collections::HashMap;

/// Crisp input values keyed by antecedent variable name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: impl Into<String>, val: f64) {
        self.0.insert(var.into(), val);
    }

    pub fn with(mut self, var: impl Into<String>, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn get(&self, var: &str) -> Option<f64> {
        self.0.get(var).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[test]
fn test_inputs() {
    let inputs: Inputs = [("Atendimento", 4.), ("Comida", 7.)].into_iter().collect();

    assert_eq!(inputs.get("Comida"), Some(7.));
    assert_eq!(inputs.get("Limpeza"), None);
    assert_eq!(inputs.with("Comida", 2.).get("Comida"), Some(2.));
}

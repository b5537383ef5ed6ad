/// Result of one stage evaluation, with the intermediate values that produced
/// it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    value: f64,
    firing_strengths: Vec<f64>,
    universe: Vec<f64>,
    aggregated: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(value: f64, firing_strengths: Vec<f64>, universe: Vec<f64>, aggregated: Vec<f64>) -> Self {
        Self {
            value,
            firing_strengths,
            universe,
            aggregated,
        }
    }

    /// The defuzzified crisp value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Firing strength of every rule, in rule order
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Highest firing strength of any rule
    pub fn max_firing_strength(&self) -> f64 {
        self.firing_strengths.iter().copied().fold(0., f64::max)
    }

    /// The aggregated output set as `(x, degree)` samples
    pub fn aggregated(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe.iter().copied().zip(self.aggregated.iter().copied())
    }
}

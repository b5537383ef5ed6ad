use std::iter::Sum;

use num::Float;

/// Fuzzy AND of two degrees
pub(crate) fn and<F: Float>(u: F, v: F) -> F {
    F::min(u, v)
}

/// Mamdani implication: the consequent membership clipped at the rule's
/// firing strength.
pub(crate) fn implication<F: Float>(strength: F, v: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
    v.into_iter().map(move |v| and(strength, v))
}

/// Pointwise fuzzy OR used to aggregate the rules' implied sets.
pub(crate) fn production_link<F: Float>(
    u: impl IntoIterator<Item = F>,
    v: impl IntoIterator<Item = F>,
) -> impl Iterator<Item = F> {
    u.into_iter().zip(v).map(|(u, v)| F::max(u, v))
}

/// Method for turning the aggregated output set into one crisp value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Defuzzification {
    /// Membership-weighted mean of the sample points: `Σ x·μ(x) / Σ μ(x)`
    #[default]
    Centroid,
    /// Center of gravity of the polyline through the samples, computed one
    /// trapezoid at a time
    AreaCentroid,
}

impl Defuzzification {
    /// Returns `None` when the set has no area, in which case there is no
    /// centroid.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        match self {
            Self::Centroid => {
                let den = membership.iter().copied().sum::<F>();

                if den <= F::zero() {
                    return None;
                }

                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(&x, &m)| x * m)
                    .sum::<F>();

                Some(num / den)
            },
            Self::AreaCentroid => {
                let n_areas = universe.len().saturating_sub(1);
                let mut areas = Vec::with_capacity(n_areas);
                let mut centroids = Vec::with_capacity(n_areas);
                let two = F::one() + F::one();
                let three = two + F::one();

                for i in 0..n_areas {
                    let base = universe[i + 1] - universe[i];
                    let area_rect = F::min(membership[i], membership[i + 1]) * base;
                    let center_rect = universe[i] + base / two;
                    let (area_tria, center_tri) = if membership[i + 1] == membership[i] {
                        (F::zero(), F::zero())
                    } else if membership[i + 1] > membership[i] {
                        (
                            base * F::abs(membership[i + 1] - membership[i]) / two,
                            universe[i] + two / three * base,
                        )
                    } else {
                        (
                            base * F::abs(membership[i + 1] - membership[i]) / two,
                            universe[i] + F::one() / three * base,
                        )
                    };
                    let area = area_rect + area_tria;
                    let center = if area == F::zero() {
                        F::zero()
                    } else {
                        (area_rect * center_rect + area_tria * center_tri) / area
                    };

                    areas.push(area);
                    centroids.push(center);
                }

                let den = areas.iter().copied().sum::<F>();

                if den <= F::zero() {
                    return None;
                }

                let num = areas
                    .into_iter()
                    .zip(centroids)
                    .map(|(area, cent)| area * cent)
                    .sum::<F>();

                Some(num / den)
            },
        }
    }
}

#[test]
fn test_aggregation_is_max() {
    let low: Vec<f64> = implication(0.3, [0., 0.5, 1., 0.5, 0.]).collect();
    let high: Vec<f64> = implication(0.7, [0., 0.5, 1., 0.5, 0.]).collect();

    assert_eq!(low, vec![0., 0.3, 0.3, 0.3, 0.]);
    assert_eq!(production_link(low, high.iter().copied()).collect::<Vec<_>>(), high);
}

#[test]
fn test_centroid() {
    let universe = [0., 1., 2., 3., 4.];

    assert_eq!(
        Defuzzification::Centroid.call(&universe, &[0., 1., 1., 1., 0.]),
        Some(2.)
    );
    assert_eq!(
        Defuzzification::Centroid.call(&universe, &[1., 0., 0., 0., 0.]),
        Some(0.)
    );
    assert_eq!(Defuzzification::Centroid.call(&universe, &[0.; 5]), None);
}

#[test]
fn test_area_centroid() {
    let universe = [0., 1., 2., 3.];

    // Right triangle rising from 0 to 3 has its centroid at 2
    let cog = Defuzzification::AreaCentroid
        .call(&universe, &[0., 1. / 3., 2. / 3., 1.])
        .unwrap();

    assert!((cog - 2.).abs() < 1e-12);
    assert_eq!(
        Defuzzification::AreaCentroid.call(&universe, &[0.5; 4]),
        Some(1.5)
    );
    assert_eq!(Defuzzification::AreaCentroid.call(&universe, &[0.; 4]), None);
    // A lone non-zero sample still has area
    assert!(Defuzzification::AreaCentroid
        .call(&universe, &[0., 1., 0., 0.])
        .is_some());
}

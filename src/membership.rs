use crate::error::DefinitionError;
use crate::math::{interp, interp_at};

/// Shape of a fuzzy term over its variable's universe.
///
/// The variants can be built in `const` context so term tables may live in
/// statics. Use [`MembershipFunction::triangular`] and
/// [`MembershipFunction::trapezoidal`] for checked construction; definitions
/// built from the raw variants are checked when the owning variable is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MembershipFunction {
    /// Zero outside `[a, c]`, one at `b`
    Triangular { a: f64, b: f64, c: f64 },
    /// Zero outside `[a, d]`, one on `[b, c]`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, DefinitionError> {
        let function = Self::Triangular { a, b, c };

        function.validate()?;

        Ok(function)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, DefinitionError> {
        let function = Self::Trapezoidal { a, b, c, d };

        function.validate()?;

        Ok(function)
    }

    /// Checks that every breakpoint is finite and that they never decrease.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let points = self.breakpoints();

        if points.iter().any(|p| !p.is_finite()) {
            return Err(DefinitionError::NonFiniteBreakpoint { points });
        }
        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err(DefinitionError::UnorderedBreakpoints { points });
        }

        let (lo, hi) = self.support();

        // Interpolation divides by segment widths, which must stay finite
        if !(hi - lo).is_finite() {
            return Err(DefinitionError::NonFiniteBreakpoint { points });
        }

        Ok(())
    }

    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }

    /// First and last breakpoint; the degree is zero outside of them.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        let (lo, hi) = self.support();

        if !(lo..=hi).contains(&x) {
            return 0.;
        }

        let degree = match *self {
            Self::Triangular { a, b, c } => interp_at(x, &[(a, 0.), (b, 1.), (c, 0.)]),
            Self::Trapezoidal { a, b, c, d } => interp_at(x, &[(a, 0.), (b, 1.), (c, 1.), (d, 0.)]),
        };

        clamp_degree(degree)
    }

    /// Degrees of every point in `xs`, in order.
    pub fn sample(&self, xs: impl IntoIterator<Item = f64>) -> Vec<f64> {
        let coords = match *self {
            Self::Triangular { a, b, c } => vec![(a, 0.), (b, 1.), (c, 0.)],
            Self::Trapezoidal { a, b, c, d } => vec![(a, 0.), (b, 1.), (c, 1.), (d, 0.)],
        };

        // The polyline is zero at both ends, so holding the end values
        // outside the support already gives zero there
        interp(xs, &coords).into_iter().map(clamp_degree).collect()
    }
}

fn clamp_degree(degree: f64) -> f64 {
    if degree.is_nan() {
        0.
    } else {
        degree.clamp(0., 1.)
    }
}

#[test]
fn test_triangular() {
    let tri = MembershipFunction::triangular(2., 3.5, 5.).unwrap();

    assert_eq!(tri.degree(1.), 0.);
    assert_eq!(tri.degree(2.), 0.);
    assert_eq!(tri.degree(3.5), 1.);
    assert_eq!(tri.degree(5.), 0.);
    assert_eq!(tri.degree(5.1), 0.);
    assert!((tri.degree(2.75) - 0.5).abs() < 1e-12);
    assert!((tri.degree(4.25) - 0.5).abs() < 1e-12);
}

#[test]
fn test_degenerate_triangles() {
    let left = MembershipFunction::triangular(0., 0., 3.755).unwrap();
    let right = MembershipFunction::triangular(11.25, 15., 15.).unwrap();

    assert_eq!(left.degree(0.), 1.);
    assert_eq!(left.degree(-0.01), 0.);
    assert_eq!(left.degree(3.755), 0.);
    assert_eq!(right.degree(15.), 1.);
    assert_eq!(right.degree(15.01), 0.);
    assert_eq!(right.degree(11.25), 0.);

    let spike = MembershipFunction::triangular(4., 4., 4.).unwrap();

    assert_eq!(spike.degree(4.), 1.);
    assert_eq!(spike.degree(4.0001), 0.);
}

#[test]
fn test_trapezoidal() {
    let trap = MembershipFunction::trapezoidal(3., 5., 6., 8.).unwrap();

    assert_eq!(trap.degree(3.), 0.);
    assert_eq!(trap.degree(4.), 0.5);
    assert_eq!(trap.degree(5.), 1.);
    assert_eq!(trap.degree(5.5), 1.);
    assert_eq!(trap.degree(6.), 1.);
    assert_eq!(trap.degree(7.), 0.5);
    assert_eq!(trap.degree(8.), 0.);
    assert_eq!(trap.degree(-100.), 0.);

    let shoulder = MembershipFunction::trapezoidal(6., 8., 10., 10.).unwrap();

    assert_eq!(shoulder.degree(10.), 1.);
    assert_eq!(shoulder.degree(10.5), 0.);

    let left_shoulder = MembershipFunction::trapezoidal(0., 0., 3., 5.).unwrap();

    assert_eq!(left_shoulder.degree(0.), 1.);
    assert_eq!(left_shoulder.degree(-1.), 0.);
}

#[test]
fn test_invalid_breakpoints() {
    assert_eq!(
        MembershipFunction::triangular(3., 2., 5.),
        Err(DefinitionError::UnorderedBreakpoints { points: vec![3., 2., 5.] })
    );
    assert_eq!(
        MembershipFunction::trapezoidal(0., 1., 3., 2.),
        Err(DefinitionError::UnorderedBreakpoints {
            points: vec![0., 1., 3., 2.]
        })
    );
    assert!(matches!(
        MembershipFunction::trapezoidal(0., f64::NAN, 3., 4.),
        Err(DefinitionError::NonFiniteBreakpoint { .. })
    ));
}

#[test]
fn test_overflowing_span() {
    assert_eq!(
        MembershipFunction::trapezoidal(-1.7e308, 1.7e308, 1.7e308, 1.7e308),
        Err(DefinitionError::NonFiniteBreakpoint {
            points: vec![-1.7e308, 1.7e308, 1.7e308, 1.7e308]
        })
    );
    assert!(MembershipFunction::triangular(-f64::MAX, 0., f64::MAX).is_err());
    assert!(MembershipFunction::triangular(0., 1e308, 1.7e308).is_ok());

    // Unchecked variants still never leave [0, 1]
    let raw = MembershipFunction::Trapezoidal {
        a: -1.7e308,
        b: 1.7e308,
        c: 1.7e308,
        d: 1.7e308,
    };

    assert_eq!(raw.degree(1.0e308), 0.);
    assert_eq!(raw.sample([1.0e308]), vec![0.]);
}

#[test]
fn test_sample_matches_degree() {
    let functions = [
        MembershipFunction::triangular(0., 0., 3.755).unwrap(),
        MembershipFunction::triangular(3.75, 7.5, 11.25).unwrap(),
        MembershipFunction::trapezoidal(6.5, 8., 10., 10.).unwrap(),
    ];
    let xs: Vec<f64> = (-10..=160).map(|i| i as f64 * 0.1).collect();

    for function in functions {
        let expected: Vec<f64> = xs.iter().map(|&x| function.degree(x)).collect();

        assert_eq!(function.sample(xs.iter().copied()), expected);
    }
}

#[test]
fn test_nan_degree() {
    let trap = MembershipFunction::trapezoidal(0., 0., 3., 5.).unwrap();

    assert_eq!(trap.degree(f64::NAN), 0.);
}

use num::Float;

/// Evaluates the polyline through `coords` at `x`, similar to numpy.interp.
///
/// Outside the first/last coordinate the nearest end value is held. Segments
/// of zero width are steps: they never interpolate, and a point sitting on one
/// takes the value of whichever neighbouring segment contains it. `NaN` maps to
/// zero.
pub(crate) fn interp_at<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x < first_x {
        return first_y;
    }
    if x > last_x {
        return last_y;
    }

    let mut step = None;

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 == x2 {
            if x == x1 {
                step = Some(step.map_or(F::max(y1, y2), |s: F| F::max(s, F::max(y1, y2))));
            }
            continue;
        }

        // Actual interpolation
        if x1 <= x && x <= x2 {
            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    match step {
        Some(y) => y,
        // A single coordinate, or x is NaN
        None if coords.len() == 1 && x == first_x => first_y,
        None => F::zero(),
    }
}

/// Similar to numpy.interp
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_at(x, coords)).collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_steps() {
    // Rising edge of zero width at 0, falling edge of zero width at 10
    let coords = [(0., 0.), (0., 1.), (10., 1.), (10., 0.)];

    assert_eq!(interp([-0.5, 0., 5., 10., 10.5], &coords), vec![0., 1., 1., 1., 0.]);

    // Every breakpoint equal
    let coords = [(2., 0.), (2., 1.), (2., 0.)];

    assert_eq!(interp([1.9, 2., 2.1], &coords), vec![0., 1., 0.]);
}

#[test]
fn test_interp_nan() {
    let coords = [(0., 0.), (1., 1.), (2., 0.)];

    assert_eq!(interp_at(f64::NAN, &coords), 0.);
    assert_eq!(interp_at(1.0, &[]), 0.);
}

/// `n` evenly spaced samples over `[min, max]`, endpoints included.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does, which pins the
            // last sample to the end of the range
            let i = self.index;
            self.index += 1;
            if i + 1 == self.len && self.len > 1 {
                Some(self.end)
            } else {
                Some(self.start + self.step * i as f64)
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<_> = Linspace::new(0., 10., 5).collect();

    assert_eq!(points, vec![0., 2.5, 5., 7.5, 10.]);
    assert_eq!(Linspace::new(0., 15., 101).len(), 101);
    assert_eq!(Linspace::new(0., 15., 101).last(), Some(15.));
    assert_eq!(Linspace::new(3., 4., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(3., 4., 0).next(), None);
}

//! src/chart/series.rs
//!
//! Fixed-capacity sliding window of samples for one named series, plus the
//! uniform sample generator feeding it.

use std::collections::VecDeque;

use rand::Rng;

use crate::render::scene::Rgba;

#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub color: Rgba,

    /// samples in the window (oldest at front)
    samples: VecDeque<f64>,

    capacity: usize,
}

impl Series {
    /// Create a series whose window is pre-filled with `capacity` generated samples.
    pub fn new<R: Rng>(
        name: &str,
        color: Rgba,
        capacity: usize,
        range: (f64, f64),
        rng: &mut R,
    ) -> Self {
        let mut series = Self {
            name: name.to_string(),
            color,
            samples: VecDeque::with_capacity(capacity),
            capacity,
        };
        series.refill(range, rng);
        series
    }

    /// Append to the tail, evicting the head once the window is full.
    ///
    /// Maintains invariant: samples.len() <= capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Replace every sample with freshly generated values.
    pub fn refill<R: Rng>(&mut self, range: (f64, f64), rng: &mut R) {
        self.samples.clear();
        for _ in 0..self.capacity {
            self.samples.push_back(generate(rng, range.0, range.1));
        }
    }

    pub fn samples(&self) -> &VecDeque<f64> {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
impl Series {
    /// Create a series from explicit samples. Only the newest `capacity` are kept.
    pub fn from_samples(name: &str, color: Rgba, capacity: usize, samples: &[f64]) -> Self {
        let mut series = Self {
            name: name.to_string(),
            color,
            samples: VecDeque::with_capacity(capacity),
            capacity,
        };
        for &v in samples {
            series.push(v);
        }
        series
    }
}

/// Uniformly distributed value in `[min, max]`.
///
/// Bounds given in the wrong order are swapped.
pub fn generate<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for _ in 0..10_000 {
            let v = generate(&mut rng, -50.0, 50.0);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        assert!(lo >= -50.0, "min {lo}");
        assert!(hi <= 50.0, "max {hi}");
        // uniform draws should cover most of the range
        assert!(lo < -45.0 && hi > 45.0);
    }

    #[test]
    fn generate_degenerate_and_swapped_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate(&mut rng, 3.0, 3.0), 3.0);
        let v = generate(&mut rng, 10.0, -10.0);
        assert!((-10.0..=10.0).contains(&v));
    }

    #[test]
    fn push_evicts_oldest() {
        let mut s = Series::from_samples("s", Rgba::BLACK, 3, &[1.0, 2.0, 3.0]);
        s.push(4.0);
        assert_eq!(s.samples().iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn length_always_equals_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = Series::new("s", Rgba::BLACK, 50, (-50.0, 50.0), &mut rng);
        assert_eq!(s.len(), 50);
        for _ in 0..1_000 {
            s.push(generate(&mut rng, -50.0, 50.0));
            assert_eq!(s.len(), 50);
        }
    }

    #[test]
    fn from_samples_keeps_newest() {
        let s = Series::from_samples("s", Rgba::BLACK, 2, &[1.0, 2.0, 3.0]);
        assert_eq!(s.get(0), Some(2.0));
        assert_eq!(s.get(1), Some(3.0));
        assert_eq!(s.get(2), None);
    }
}

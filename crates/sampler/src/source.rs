//! Random sources: the [`RandomSource`] trait and its implementations.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::SamplerError;

/// A stream of uniform variates plus the sampling primitives built on it.
///
/// Implementors only provide [`next_unit`](Self::next_unit); every other
/// method is defined in terms of it, so a fixed sequence of unit variates
/// fully determines every sample.
pub trait RandomSource {
    /// Returns the next uniform variate in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Draws from a normal distribution with the Box–Muller transform.
    ///
    /// Consumes two variates `u` then `v` and returns
    /// `mean + sd * sqrt(-2 ln u) * cos(2 pi v)`. A `u` of exactly zero
    /// yields a non-finite value; callers clamp.
    fn sample_normal(&mut self, mean: f64, sd: f64) -> f64 {
        let u = self.next_unit();
        let v = self.next_unit();
        mean + sd * (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }

    /// Draws from a uniform distribution on `[min, max)`. Consumes one variate.
    fn sample_uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Bernoulli trial that succeeds with probability `p`. Consumes one variate.
    fn bernoulli(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn sample_normal(&mut self, mean: f64, sd: f64) -> f64 {
        (**self).sample_normal(mean, sd)
    }

    fn sample_uniform(&mut self, min: f64, max: f64) -> f64 {
        (**self).sample_uniform(min, max)
    }

    fn bernoulli(&mut self, p: f64) -> bool {
        (**self).bernoulli(p)
    }
}

/// [`RandomSource`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: rand::Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Builds a seeded or OS-sourced [`StdRng`] source.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }
}

impl<R: rand::Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// [`RandomSource`] that replays a fixed list of unit variates, cycling
/// back to the start once exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl SequenceSource {
    /// Creates a source from values in `[0, 1]`.
    ///
    /// The closed upper bound lets tests pin edge behaviour that a real
    /// generator only reaches in the limit.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::EmptySequence`] if `values` is empty, or
    /// [`SamplerError::OutOfUnitInterval`] for the first value outside
    /// `[0, 1]` (including NaN).
    pub fn new(values: Vec<f64>) -> Result<Self, SamplerError> {
        if values.is_empty() {
            return Err(SamplerError::EmptySequence);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(SamplerError::OutOfUnitInterval { index, value });
        }
        Ok(Self {
            values,
            cursor: 0,
            draws: 0,
        })
    }

    /// Creates a source that always returns `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::OutOfUnitInterval`] if `value` is outside `[0, 1]`.
    pub fn constant(value: f64) -> Result<Self, SamplerError> {
        Self::new(vec![value])
    }

    /// Returns the total number of variates handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        v
    }
}

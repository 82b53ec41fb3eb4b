//! Two-parameter distributions sampled through a [`RandomSource`].

use std::fmt;

use crate::source::RandomSource;

/// Distribution family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionKind {
    /// Normal with mean / standard deviation.
    #[default]
    Normal,
    /// Uniform with min / max.
    Uniform,
}

impl DistributionKind {
    /// Interprets a free-form label.
    ///
    /// Exactly `"Uniform"` selects [`Uniform`](Self::Uniform); every
    /// other label, including other spellings and an empty one, selects
    /// [`Normal`](Self::Normal).
    pub fn from_label(label: &str) -> Self {
        if label == "Uniform" {
            Self::Uniform
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("Normal"),
            Self::Uniform => f.write_str("Uniform"),
        }
    }
}

/// A parameterised distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    /// Normal distribution.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        sd: f64,
    },
    /// Uniform distribution on `[min, max)`.
    Uniform {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl Distribution {
    /// Returns the distribution family.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Normal { .. } => DistributionKind::Normal,
            Self::Uniform { .. } => DistributionKind::Uniform,
        }
    }

    /// Returns the shape parameters `(p1, p2)`.
    pub fn params(&self) -> (f64, f64) {
        match *self {
            Self::Normal { mean, sd } => (mean, sd),
            Self::Uniform { min, max } => (min, max),
        }
    }

    /// Draws one value.
    pub fn sample<S: RandomSource + ?Sized>(&self, source: &mut S) -> f64 {
        match *self {
            Self::Normal { mean, sd } => source.sample_normal(mean, sd),
            Self::Uniform { min, max } => source.sample_uniform(min, max),
        }
    }
}

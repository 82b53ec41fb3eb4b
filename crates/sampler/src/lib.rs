//! # quarry-sampler
//!
//! Sampling primitives behind an injectable [`RandomSource`].
//!
//! Production code wraps a [`rand::Rng`] in [`RngSource`]; tests replay a
//! fixed list of unit variates with [`SequenceSource`] so that every
//! downstream computation is reproducible to the last bit.

mod distribution;
mod error;
mod source;

pub use distribution::{Distribution, DistributionKind};
pub use error::SamplerError;
pub use source::{RandomSource, RngSource, SequenceSource};

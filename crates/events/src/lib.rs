//! # quarry-events
//!
//! Probabilistic transient events (outages, surges) and their localized
//! influence on generated values.
//!
//! An [`Event`] is active on the inclusive window `[day, day + duration]`
//! and contributes a Gaussian-shaped multiplier peaking at `factor` on the
//! window midpoint. [`EventEngine`] applies all active events in configured
//! order, each gated by an independent Bernoulli trial drawn from the
//! caller's [`RandomSource`](quarry_sampler::RandomSource).

mod engine;
mod error;
mod event;

pub use engine::EventEngine;
pub use error::EventError;
pub use event::Event;

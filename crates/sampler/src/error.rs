//! Error types for the quarry-sampler crate.

/// Error type for all fallible operations in the quarry-sampler crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplerError {
    /// Returned when a fixed sequence source is built from no values.
    #[error("fixed sequence is empty")]
    EmptySequence,

    /// Returned when a fixed sequence value lies outside `[0, 1]`.
    #[error("sequence value {value} at index {index} is outside [0, 1]")]
    OutOfUnitInterval {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

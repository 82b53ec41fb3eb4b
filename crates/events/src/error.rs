//! Error types for the quarry-events crate.

/// Error type for all fallible operations in the quarry-events crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventError {
    /// Returned when an event window has no length.
    #[error("event duration must be > 0, got {duration}")]
    NonPositiveDuration {
        /// The rejected duration in days.
        duration: i64,
    },

    /// Returned when the peak factor is NaN or infinite.
    #[error("event factor is not finite: {factor}")]
    NonFiniteFactor {
        /// The rejected factor.
        factor: f64,
    },

    /// Returned when the trigger probability lies outside `[0, 1]`.
    #[error("event probability {probability} is outside [0, 1]")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_non_positive_duration() {
        let e = EventError::NonPositiveDuration { duration: 0 };
        assert_eq!(e.to_string(), "event duration must be > 0, got 0");
    }

    #[test]
    fn display_non_finite_factor() {
        let e = EventError::NonFiniteFactor { factor: f64::NAN };
        assert!(e.to_string().contains("NaN"));
    }

    #[test]
    fn display_invalid_probability() {
        let e = EventError::InvalidProbability { probability: 1.5 };
        assert!(e.to_string().contains("1.5"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<EventError>();
    }
}

//! Boundary validation errors.

/// Result type for record validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised when a record fails validation at the engine boundary.
///
/// Data-quality conditions (degenerate key results, missing check-ins) are
/// not errors; they surface as flags on the computed results instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Quarter number outside 1-4
    #[error("Invalid quarter number: {0} (expected 1-4)")]
    InvalidQuarter(u8),

    /// Range whose start lies after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Range start
        start: String,
        /// Range end
        end: String,
    },

    /// Year the calendar cannot represent
    #[error("Unsupported year: {0}")]
    InvalidYear(i32),

    /// NaN or infinite numeric field
    #[error("Non-finite value in field '{field}': {value}")]
    NonFiniteValue {
        /// Offending field name
        field: &'static str,
        /// Offending value
        value: f64,
    },
}

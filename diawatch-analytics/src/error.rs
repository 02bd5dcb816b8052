//! Error types for journal recording.

use thiserror::Error;

/// Errors raised when a record is rejected at the input boundary.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Glucose value outside the physiologically plausible band.
    #[error("glucose value {value} mmol/L is outside the accepted range 0.5-35")]
    OutOfRange {
        /// The rejected value, mmol/L.
        value: f64,
    },

    /// Insulin dose outside the accepted 0-100 unit band.
    #[error("insulin dose {dose} U is outside the accepted range 0-100")]
    InvalidDose {
        /// The rejected dose, in insulin units.
        dose: f64,
    },

    /// Journal document written by an incompatible schema version.
    #[error("journal schema version {major}.{minor} is not supported")]
    IncompatibleVersion {
        /// Major version found in the document.
        major: u32,
        /// Minor version found in the document.
        minor: u32,
    },
}

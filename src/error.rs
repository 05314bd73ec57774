//! Refusals reported by the measurement session.
//!
//! None of these are fatal: the session state is unchanged (or the affected
//! reference line is marked declined) and the caller may simply ignore them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The operation is not allowed in the current session state.
    #[error("Not permitted: {0}")]
    NotPermitted(&'static str),

    /// A calibration answer arrived with no reference line waiting for one.
    #[error("No reference line is waiting for a length")]
    NoPendingCalibration,

    /// The supplied real-world length is not a positive number.
    #[error("Invalid length '{0}': expected a positive number of feet")]
    InvalidLength(String),

    /// The reference line has no extent along its axis.
    #[error("Reference line has zero length along its axis")]
    DegenerateLine,
}

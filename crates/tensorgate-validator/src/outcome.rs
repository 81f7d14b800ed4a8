//! Validation outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use tensorgate_types::{GateError, StatusCode};

/// Reconfiguration a request needs before it can be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    ReshapeRequired,
    BatchSizeChangeRequired,
}

impl Signal {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Signal::ReshapeRequired => StatusCode::ReshapeRequired,
            Signal::BatchSizeChangeRequired => StatusCode::BatchSizeChangeRequired,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_code().as_str())
    }
}

/// Admissible request, possibly only after a reconfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Ok,
    OkWithSignal(Signal),
}

impl ValidationOutcome {
    pub fn signal(&self) -> Option<Signal> {
        match self {
            ValidationOutcome::Ok => None,
            ValidationOutcome::OkWithSignal(signal) => Some(*signal),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.signal()
            .map(|s| s.status_code())
            .unwrap_or(StatusCode::Ok)
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_code().as_str())
    }
}

/// Result of validating one request
pub type ValidationResult = std::result::Result<ValidationOutcome, GateError>;

/// Signal accumulator owned by a single validation call.
///
/// Only one signal is surfaced: the last one recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingSignal(Option<Signal>);

impl PendingSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(self, signal: Signal) -> Self {
        Self(Some(signal))
    }

    pub fn get(&self) -> Option<Signal> {
        self.0
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        match self.0 {
            None => ValidationOutcome::Ok,
            Some(signal) => ValidationOutcome::OkWithSignal(signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_recorded_signal_is_surfaced() {
        let pending = PendingSignal::new()
            .record(Signal::ReshapeRequired)
            .record(Signal::BatchSizeChangeRequired);
        assert_eq!(pending.get(), Some(Signal::BatchSizeChangeRequired));

        let pending = pending.record(Signal::ReshapeRequired);
        assert_eq!(
            pending.into_outcome(),
            ValidationOutcome::OkWithSignal(Signal::ReshapeRequired)
        );
    }

    #[test]
    fn empty_accumulator_is_ok() {
        assert_eq!(PendingSignal::new().into_outcome(), ValidationOutcome::Ok);
        assert_eq!(ValidationOutcome::Ok.status_code(), StatusCode::Ok);
        assert_eq!(
            ValidationOutcome::OkWithSignal(Signal::ReshapeRequired).to_string(),
            "RESHAPE_REQUIRED"
        );
    }
}

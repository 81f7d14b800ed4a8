//! Validation outcome counters

use crate::outcome::ValidationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tensorgate_types::StatusCode;

const CODE_COUNT: usize = StatusCode::ALL.len();

/// Lock-free counters over validation outcomes
pub struct ValidationStats {
    /// Outcomes without a signal
    accepted: AtomicU64,
    /// Outcomes carrying a reshape or batch size signal
    signalled: AtomicU64,
    rejected: AtomicU64,
    /// One counter per status code, indexed like `StatusCode::ALL`
    by_code: [AtomicU64; CODE_COUNT],
    start_time: Instant,
}

/// Point-in-time copy of [`ValidationStats`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub accepted: u64,
    pub signalled: u64,
    pub rejected: u64,
    /// Non-zero counters only
    pub by_code: BTreeMap<StatusCode, u64>,
    pub uptime_ms: u64,
}

impl StatsSnapshot {
    pub fn count(&self, code: StatusCode) -> u64 {
        self.by_code.get(&code).copied().unwrap_or(0)
    }

    /// Share of requests that ended in an error
    pub fn rejection_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.rejected as f64 / self.total as f64
        }
    }
}

impl ValidationStats {
    pub fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            signalled: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            by_code: std::array::from_fn(|_| AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Count one validation result
    pub fn record(&self, result: &ValidationResult) {
        let code = match result {
            Ok(outcome) => {
                let bucket = if outcome.signal().is_some() {
                    &self.signalled
                } else {
                    &self.accepted
                };
                bucket.fetch_add(1, Ordering::Relaxed);
                outcome.status_code()
            }
            Err(err) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                err.code()
            }
        };
        if let Some(slot) = StatusCode::ALL.iter().position(|c| *c == code) {
            self.by_code[slot].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let accepted = self.accepted.load(Ordering::Relaxed);
        let signalled = self.signalled.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        let by_code = StatusCode::ALL
            .iter()
            .zip(self.by_code.iter())
            .map(|(code, counter)| (*code, counter.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        StatsSnapshot {
            total: accepted + signalled + rejected,
            accepted,
            signalled,
            rejected,
            by_code,
            uptime_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.signalled.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        for counter in &self.by_code {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationStats")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

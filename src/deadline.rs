// src/deadline.rs
// DOCUMENTATION: Per-request deadline budget
// PURPOSE: Carry an absolute expiry instant through the query path

use std::future::Future;
use std::time::Duration;
use tokio::time::{error::Elapsed, timeout_at, Instant};

/// Absolute point in time after which an operation must give up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Drive `fut` until it completes or the deadline passes.
    /// On expiry the future is dropped, cancelling whatever it was awaiting.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Elapsed> {
        timeout_at(self.at, fut).await
    }
}

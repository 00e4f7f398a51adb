//! Cooperative cancellation for a planning request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::search::PlanError;

/// Cancellation flag plus optional deadline, checked between blocking steps.
///
/// Clones share the flag, so the caller can keep one and hand another to
/// the worker running the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A token that is never cancelled and never times out.
    pub fn none() -> Self {
        Self::default()
    }

    /// A token that times out `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// A token with the given optional timeout.
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Self::none, Self::with_timeout)
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true once `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Fail if the request was cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), PlanError> {
        if self.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(PlanError::Timeout),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_passes() {
        assert!(Cancellation::none().check().is_ok());
        assert!(
            Cancellation::with_timeout(Duration::from_secs(60))
                .check()
                .is_ok()
        );
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = Cancellation::none();
        let worker = token.clone();

        token.cancel();
        assert!(worker.is_cancelled());
        assert!(matches!(worker.check(), Err(PlanError::Cancelled)));
    }

    #[test]
    fn elapsed_deadline_times_out() {
        let token = Cancellation::with_timeout(Duration::ZERO);
        assert!(matches!(token.check(), Err(PlanError::Timeout)));
    }

    #[test]
    fn cancellation_wins_over_timeout() {
        let token = Cancellation::with_timeout(Duration::ZERO);
        token.cancel();
        assert!(matches!(token.check(), Err(PlanError::Cancelled)));
    }
}

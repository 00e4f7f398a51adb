//! Asynchronous planning entry point.
//!
//! The pipeline blocks on catalog and scoring queries, so each request
//! runs on tokio's blocking pool. The caller gets a [`PlanHandle`] future
//! that resolves exactly once with the plan or a failure.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::debug;

use super::cancel::Cancellation;
use super::search::{Plan, PlanError, PlanRequest, Planner};
use crate::catalog::{FareQuotes, LegCatalog};

/// Shared front end to a [`Planner`].
///
/// Cloning is cheap; clones share the planner. Requests share no mutable
/// state, so any number may run at once.
pub struct JourneyService<C, Q> {
    planner: Arc<Planner<C, Q>>,
}

impl<C, Q> Clone for JourneyService<C, Q> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
        }
    }
}

impl<C, Q> JourneyService<C, Q>
where
    C: LegCatalog + 'static,
    Q: FareQuotes + 'static,
{
    /// Create a service around a planner.
    pub fn new(planner: Planner<C, Q>) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    /// The underlying planner.
    pub fn planner(&self) -> &Planner<C, Q> {
        &self.planner
    }

    /// Start planning a journey.
    ///
    /// The configured timeout starts now. Dropping the returned handle
    /// cancels the request.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn plan_journey(&self, request: PlanRequest) -> PlanHandle {
        let cancel = Cancellation::from_timeout(self.planner.config().timeout());
        let planner = Arc::clone(&self.planner);
        let worker = cancel.clone();

        let task = tokio::task::spawn_blocking(move || planner.plan(&request, &worker));
        PlanHandle { cancel, task }
    }

    /// Plan several independent journeys concurrently.
    ///
    /// Results come back in request order.
    pub async fn plan_all(&self, requests: Vec<PlanRequest>) -> Vec<Result<Plan, PlanError>> {
        let count = requests.len();
        let handles: Vec<PlanHandle> = requests
            .into_iter()
            .map(|request| self.plan_journey(request))
            .collect();

        let results = join_all(handles).await;
        debug!(
            requests = count,
            failed = results.iter().filter(|r| r.is_err()).count(),
            "Batch planning complete"
        );
        results
    }
}

/// A planning request in flight.
///
/// Resolves to the plan, or to the failure that stopped it.
pub struct PlanHandle {
    cancel: Cancellation,
    task: JoinHandle<Result<Plan, PlanError>>,
}

impl PlanHandle {
    /// Ask the request to stop. It fails with [`PlanError::Cancelled`] at
    /// its next check, without issuing further provider calls.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Future for PlanHandle {
    type Output = Result<Plan, PlanError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) if e.is_cancelled() => Poll::Ready(Err(PlanError::Cancelled)),
            Poll::Ready(Err(e)) => Poll::Ready(Err(PlanError::WorkerFailed(e.to_string()))),
        }
    }
}

impl Drop for PlanHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

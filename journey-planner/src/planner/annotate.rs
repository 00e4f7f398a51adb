//! Delay annotation of ranked routes.

use tracing::trace;

use super::cancel::Cancellation;
use super::search::PlanError;
use crate::domain::Route;
use crate::scoring::Scorers;

/// Attach a predicted delay to every leg of every route.
///
/// Each leg is queried by train and boarding station. The routes handed
/// in are left untouched; annotated copies are returned in the same order.
/// Only call this on the ranked shortlist: every leg costs one estimator
/// query.
///
/// # Errors
///
/// Only cancellation and timeout, checked before each query. A failing
/// estimator yields a zero-minute prediction.
pub fn annotate(
    routes: Vec<Route>,
    scorers: &Scorers,
    cancel: &Cancellation,
) -> Result<Vec<Route>, PlanError> {
    routes
        .iter()
        .map(|route| {
            route.try_with_predicted_delays(|leg| -> Result<i32, PlanError> {
                cancel.check()?;
                let minutes = scorers.predicted_delay(leg.train_id(), leg.from());
                trace!(
                    train = %leg.train_id(),
                    station = %leg.from(),
                    minutes,
                    "Predicted delay"
                );
                Ok(minutes)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{StationCode, TrainId};
    use crate::planner::test_support::*;
    use crate::scoring::{DelayEstimator, DelayHistory, ProviderError};

    struct Broken;

    impl DelayEstimator for Broken {
        fn predict_delay(&self, _: &TrainId, _: &StationCode) -> Result<i32, ProviderError> {
            Err(ProviderError::Unavailable("model offline".into()))
        }
    }

    #[test]
    fn every_leg_annotated() {
        let history = DelayHistory::new();
        history.record(&train("T1"), &code("A"), 12).unwrap();
        history.record(&train("T2"), &code("B"), 4).unwrap();
        let scorers = Scorers::neutral().with_delay(Arc::new(history));

        let original = route(abd_legs());
        let annotated = annotate(vec![original.clone()], &scorers, &Cancellation::none()).unwrap();

        let delays: Vec<Option<i32>> = annotated[0]
            .legs()
            .iter()
            .map(|leg| leg.predicted_delay())
            .collect();
        assert_eq!(delays, vec![Some(12), Some(4)]);

        // The input route is not touched
        assert!(original.legs().iter().all(|leg| leg.predicted_delay().is_none()));
        assert_eq!(stops(&annotated[0]), stops(&original));
    }

    #[test]
    fn failing_estimator_predicts_zero() {
        let scorers = Scorers::neutral().with_delay(Arc::new(Broken));

        let annotated = annotate(vec![route(abd_legs())], &scorers, &Cancellation::none()).unwrap();
        assert!(annotated[0].legs().iter().all(|leg| leg.predicted_delay() == Some(0)));
    }

    #[test]
    fn sibling_routes_unaffected() {
        // Two routes sharing the first leg
        let prefix = route(vec![leg("T1", "A", "B", 0, 60, 1)]);
        let via_d = prefix
            .extend(Arc::new(leg("T2", "B", "D", 90, 150, 1)))
            .unwrap();
        let via_c = prefix
            .extend(Arc::new(leg("T3", "B", "C", 90, 150, 1)))
            .unwrap();

        let history = DelayHistory::new();
        history.record(&train("T1"), &code("A"), 7).unwrap();
        let scorers = Scorers::neutral().with_delay(Arc::new(history));

        let annotated = annotate(vec![via_d], &scorers, &Cancellation::none()).unwrap();

        assert_eq!(annotated[0].legs()[0].predicted_delay(), Some(7));
        assert_eq!(via_c.legs()[0].predicted_delay(), None);
    }

    #[test]
    fn cancelled_annotation_fails() {
        let cancel = Cancellation::none();
        cancel.cancel();

        let err = annotate(vec![route(abd_legs())], &Scorers::neutral(), &cancel).unwrap_err();
        assert!(matches!(err, PlanError::Cancelled));
    }

    #[test]
    fn empty_input() {
        let annotated = annotate(Vec::new(), &Scorers::neutral(), &Cancellation::none()).unwrap();
        assert!(annotated.is_empty());
    }
}

//! SubmissionRunner – owns the [`LoanApplication`] and drives one submission cycle:
//! begin (under the lock) → call the prediction service (lock released) → resolve (under
//! the lock again).
//!
//! Front ends normally just call [`SubmissionRunner::submit`]. The split
//! [`begin`](SubmissionRunner::begin) / [`complete`](SubmissionRunner::complete) pair exists for
//! callers that want to render the loading state between the two halves.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::{
    client::PredictionService,
    error::Result,
    form::{Field, FormState},
    prediction::Prediction,
    state::{LoanApplication, Resolution, SubmissionTicket},
};

/// Result of one finished submission cycle.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub seq: u64,
    pub correlation_id: Uuid,
    pub prediction: Prediction,
    pub resolution: Resolution,
}

#[derive(Clone)]
pub struct SubmissionRunner {
    state: Arc<Mutex<LoanApplication>>,
    service: Arc<dyn PredictionService>,
}

impl SubmissionRunner {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self::with_state(LoanApplication::new(), service)
    }

    pub fn with_state(state: LoanApplication, service: Arc<dyn PredictionService>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            service,
        }
    }

    /// Copy of the current state, for rendering.
    pub async fn snapshot(&self) -> LoanApplication {
        self.state.lock().await.clone()
    }

    pub async fn form(&self) -> FormState {
        self.state.lock().await.form().clone()
    }

    pub async fn edit(&self, name: &str, value: impl Into<String>) -> Result<()> {
        self.state.lock().await.apply_field_edit(name, value)
    }

    pub async fn set(&self, field: Field, value: impl Into<String>) {
        self.state.lock().await.set(field, value);
    }

    pub async fn begin(&self) -> SubmissionTicket {
        self.state.lock().await.begin_submission()
    }

    /// Send the ticket's form and apply the answer if the ticket is still current.
    pub async fn complete(&self, ticket: SubmissionTicket) -> SubmissionReport {
        let correlation_id = Uuid::new_v4();
        let span = info_span!("submission", seq = ticket.seq, correlation_id = %correlation_id);

        async move {
            info!("sending loan application for prediction");
            let prediction = self.service.predict(&ticket.form).await;

            let resolution = self
                .state
                .lock()
                .await
                .resolve_submission(ticket.seq, prediction.clone());

            match resolution {
                Resolution::Applied => info!(prediction = ?prediction, "submission resolved"),
                Resolution::Stale { latest } => {
                    info!(latest, "discarding response of superseded submission")
                }
            }

            SubmissionReport {
                seq: ticket.seq,
                correlation_id,
                prediction,
                resolution,
            }
        }
        .instrument(span)
        .await
    }

    pub async fn submit(&self) -> SubmissionReport {
        let ticket = self.begin().await;
        self.complete(ticket).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers from the LoanAmount field: "approve", "reject", "slow-approve" or an echo.
    struct ScriptedService {
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PredictionService for ScriptedService {
        async fn predict(&self, form: &FormState) -> Prediction {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match form.get(Field::LoanAmount) {
                "approve" => Prediction::Approved,
                "reject" => Prediction::Rejected,
                "slow-approve" => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Prediction::Approved
                }
                other => Prediction::Message(other.to_string()),
            }
        }
    }

    #[tokio::test]
    async fn submit_resolves_and_clears_loading() {
        let service = ScriptedService::new();
        let runner = SubmissionRunner::new(service.clone());
        runner.edit("LoanAmount", "approve").await.unwrap();

        let report = runner.submit().await;
        assert_eq!(report.seq, 1);
        assert_eq!(report.resolution, Resolution::Applied);

        let state = runner.snapshot().await;
        assert_eq!(state.prediction(), Some(&Prediction::Approved));
        assert!(!state.is_loading());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn loading_is_visible_between_begin_and_complete() {
        let runner = SubmissionRunner::new(ScriptedService::new());
        runner.set(Field::LoanAmount, "reject").await;

        let ticket = runner.begin().await;
        assert!(runner.snapshot().await.is_loading());

        runner.complete(ticket).await;
        let state = runner.snapshot().await;
        assert!(!state.is_loading());
        assert_eq!(state.prediction(), Some(&Prediction::Rejected));
    }

    #[tokio::test]
    async fn late_answer_from_older_submission_is_dropped() {
        let runner = SubmissionRunner::new(ScriptedService::new());

        runner.set(Field::LoanAmount, "approve").await;
        let first = runner.begin().await;
        runner.set(Field::LoanAmount, "reject").await;
        let second = runner.begin().await;

        let newer = runner.complete(second).await;
        let older = runner.complete(first).await;

        assert_eq!(newer.resolution, Resolution::Applied);
        assert_eq!(older.resolution, Resolution::Stale { latest: 2 });
        assert_eq!(older.prediction, Prediction::Approved);
        assert_eq!(
            runner.snapshot().await.prediction(),
            Some(&Prediction::Rejected)
        );
    }

    #[tokio::test]
    async fn concurrent_submissions_keep_the_latest() {
        let runner = SubmissionRunner::new(ScriptedService::new());
        runner.set(Field::LoanAmount, "slow-approve").await;

        let slow = runner.begin().await;
        runner.set(Field::LoanAmount, "reject").await;

        let (slow_report, fast_report) = tokio::join!(runner.complete(slow), runner.submit());

        assert!(matches!(slow_report.resolution, Resolution::Stale { .. }));
        assert_eq!(fast_report.resolution, Resolution::Applied);
        let state = runner.snapshot().await;
        assert_eq!(state.prediction(), Some(&Prediction::Rejected));
        assert!(!state.is_loading());
    }
}

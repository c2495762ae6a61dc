pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod prediction;
pub mod presentation;
pub mod runner;
pub mod state;

// Re-export commonly used types
pub use client::{HttpPredictionClient, PredictionService};
pub use config::ClientConfig;
pub use error::{LoanFlowError, Result};
pub use form::{Field, FieldKind, FormState};
pub use prediction::{Prediction, SERVER_ERROR};
pub use presentation::{Outcome, submit_label};
pub use runner::{SubmissionReport, SubmissionRunner};
pub use state::{LoanApplication, Resolution, SubmissionTicket};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn runner_against(server: &MockServer) -> SubmissionRunner {
        let config =
            ClientConfig::new(&format!("{}/predict", server.uri()), Duration::from_secs(5))
                .unwrap();
        let client = HttpPredictionClient::new(config).unwrap();
        let runner = SubmissionRunner::new(Arc::new(client));
        for field in Field::ALL {
            runner.set(field, "1").await;
        }
        runner
    }

    async fn outcome_for(body: serde_json::Value) -> Outcome {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let runner = runner_against(&server).await;
        runner.submit().await;
        Outcome::of(&runner.snapshot().await)
    }

    #[tokio::test]
    async fn test_approved_response_shows_approved() {
        assert_eq!(outcome_for(json!({"prediction": 1})).await, Outcome::Approved);
    }

    #[tokio::test]
    async fn test_rejected_response_shows_rejected() {
        assert_eq!(outcome_for(json!({"prediction": 0})).await, Outcome::Rejected);
    }

    #[tokio::test]
    async fn test_other_prediction_shows_message() {
        let outcome = outcome_for(json!({"prediction": "Maybe"})).await;
        assert_eq!(outcome, Outcome::Message("Maybe".to_string()));
        assert_eq!(outcome.to_string(), "Maybe");
    }

    #[tokio::test]
    async fn test_unreachable_service_shows_server_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config =
            ClientConfig::new(&format!("http://{addr}/predict"), Duration::from_secs(2)).unwrap();
        let runner =
            SubmissionRunner::new(Arc::new(HttpPredictionClient::new(config).unwrap()));

        runner.submit().await;
        let state = runner.snapshot().await;
        assert!(!state.is_loading());
        assert_eq!(Outcome::of(&state).to_string(), "Server Error");
    }

    #[tokio::test]
    async fn test_form_stays_usable_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prediction": "1"})))
            .mount(&server)
            .await;

        let runner = runner_against(&server).await;
        let first = runner.submit().await;
        assert_eq!(first.prediction, Prediction::server_error());

        runner.edit("LoanAmount", "250").await.unwrap();
        let second = runner.submit().await;
        assert_eq!(second.seq, 2);
        assert_eq!(
            Outcome::of(&runner.snapshot().await),
            Outcome::Approved
        );
    }
}

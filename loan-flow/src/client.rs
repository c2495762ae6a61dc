use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::Result,
    form::FormState,
    prediction::{self, Prediction},
};

/// Something that turns a filled form into a prediction.
///
/// Implementations never fail: transport problems are folded into
/// [`Prediction::server_error`].
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, form: &FormState) -> Prediction;
}

/// [`PredictionService`] backed by a JSON `POST` to the remote predictor.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpPredictionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, form: &FormState) -> reqwest::Result<Value> {
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(form)
            .send()
            .await?;
        debug!(status = %response.status(), "prediction service responded");
        // The status code is not inspected: error responses carry an `error` field.
        response.json::<Value>().await
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, form: &FormState) -> Prediction {
        match self.send(form).await {
            Ok(body) => prediction::from_body(body),
            Err(e) => {
                warn!(
                    endpoint = %self.config.endpoint,
                    error = %e,
                    "prediction request failed"
                );
                Prediction::server_error()
            }
        }
    }
}

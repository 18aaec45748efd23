//! HTTP remote actor adapter
//!
//! Speaks the backend's envelope protocol: every response body is either
//! `{"ok": <payload>}` or `{"err": "<reason>"}`. An `err` envelope becomes
//! `ClientError::Rejected`; everything that keeps a response from being
//! decoded at all (connection failures, non-success status codes, malformed
//! bodies) becomes `ClientError::Transport`.

use async_trait::async_trait;
use sentiment_application::ports::remote_actor::{ClientError, RemoteActorClient};
use sentiment_domain::{AnalysisOutcome, Identity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result envelope wrapping every backend response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Envelope<T> {
    Ok(T),
    Err(String),
}

/// Wire shape of a profile response
#[derive(Debug, Deserialize)]
struct ProfilePayload {
    id: String,
    name: String,
}

/// Wire shape of an analysis response
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    result: String,
    confidence: f64,
}

#[derive(Debug, Serialize)]
struct SetProfileRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// `RemoteActorClient` adapter over HTTP
pub struct HttpRemoteActor {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRemoteActor {
    /// Build an adapter for the backend at `base_url`
    ///
    /// With no timeout, a hung request keeps its operation in flight
    /// indefinitely; the session stays usable either way.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and unwrap its envelope
    async fn roundtrip<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let start = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{}: {}", operation, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transport(format!(
                "{}: HTTP {} {}",
                operation,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            ClientError::Transport(format!("{}: undecodable response body: {}", operation, e))
        })?;

        debug!(
            "{} completed in {}ms",
            operation,
            start.elapsed().as_millis()
        );

        match envelope {
            Envelope::Ok(payload) => Ok(payload),
            Envelope::Err(reason) => {
                warn!("{} rejected: {}", operation, reason);
                Err(ClientError::Rejected(reason))
            }
        }
    }

    /// Promote a profile payload to a confirmed identity
    fn identity_from(payload: ProfilePayload) -> Result<Identity, ClientError> {
        Identity::try_new(payload.id, payload.name)
            .ok_or_else(|| ClientError::Rejected("profile payload missing id or name".to_string()))
    }

    /// Promote an analysis payload, holding the confidence range invariant
    fn outcome_from(payload: AnalysisPayload) -> Result<AnalysisOutcome, ClientError> {
        if !(0.0..=1.0).contains(&payload.confidence) {
            return Err(ClientError::Rejected(format!(
                "analysis confidence {} outside [0, 1]",
                payload.confidence
            )));
        }
        Ok(AnalysisOutcome::new(payload.result, payload.confidence))
    }
}

#[async_trait]
impl RemoteActorClient for HttpRemoteActor {
    async fn get_profile(&self) -> Result<Identity, ClientError> {
        let payload: ProfilePayload = self
            .roundtrip("get_profile", self.http.get(self.url("/profile")))
            .await?;
        Self::identity_from(payload)
    }

    async fn set_profile(&self, name: &str) -> Result<Identity, ClientError> {
        let payload: ProfilePayload = self
            .roundtrip(
                "set_profile",
                self.http
                    .post(self.url("/profile"))
                    .json(&SetProfileRequest { name }),
            )
            .await?;
        Self::identity_from(payload)
    }

    async fn get_results(&self) -> Result<Vec<String>, ClientError> {
        // The results payload is the bare array of encoded records
        self.roundtrip("get_results", self.http.get(self.url("/results")))
            .await
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<AnalysisOutcome, ClientError> {
        let payload: AnalysisPayload = self
            .roundtrip(
                "analyze_sentiment",
                self.http
                    .post(self.url("/analyze-sentiment"))
                    .json(&AnalyzeRequest { text }),
            )
            .await?;
        Self::outcome_from(payload)
    }
}

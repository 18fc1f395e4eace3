use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tubelink_logging::{tl_debug, tl_info, tl_warn};

use crate::{DispatchError, DispatchOutcome, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5678/webhook/youtube";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    pub endpoint: String,
    /// `None` keeps the HTTP client default.
    pub connect_timeout: Option<Duration>,
    /// `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Sends one URL. Never retries; every failure is folded into the outcome.
    async fn submit(&self, url: &str) -> DispatchOutcome;
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestSubmitter {
    pub fn new(settings: &WebhookSettings) -> Result<Self, DispatchError> {
        let endpoint = parse_endpoint(&settings.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn send(&self, url: &str) -> Result<(u16, String), DispatchError> {
        let payload = serde_json::to_string(&WebhookPayload { url })
            .map_err(|err| DispatchError::new(FailureKind::Body, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        // Read the whole body whatever the status; it is only ever logged.
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, url: &str) -> DispatchOutcome {
        tl_debug!("POST {} url={}", self.endpoint, url);
        match self.send(url).await {
            Ok((status, body)) if (200..300).contains(&status) => {
                tl_info!("Webhook accepted url={} status={} body={}", url, status, body);
                DispatchOutcome::Succeeded { status, body }
            }
            Ok((status, body)) => {
                tl_warn!("Webhook rejected url={} status={} body={}", url, status, body);
                DispatchOutcome::Failed { status, body }
            }
            Err(err) => {
                tl_warn!("Webhook unreachable url={}: {}", url, err);
                DispatchOutcome::Errored(err)
            }
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<reqwest::Url, DispatchError> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|err| DispatchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(DispatchError::new(
            FailureKind::InvalidEndpoint,
            format!("unsupported scheme {other}"),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return DispatchError::new(FailureKind::Connect, err.to_string());
    }
    if err.is_body() || err.is_decode() {
        return DispatchError::new(FailureKind::Body, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}

//! HTTP binding to a JobSpy-compatible scrape endpoint.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::table::{JobTable, JsonMap};

use super::ScrapeEngine;

/// Errors from the HTTP binding itself.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("scrape request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected scrape response: {0}")]
    Response(String),
}

/// Forwards the assembled parameter map verbatim to a JobSpy-compatible
/// HTTP endpoint and decodes the returned rows. No retries, throttling, or
/// pagination here — those belong to the engine behind the endpoint.
pub struct HttpScrapeEngine {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpScrapeEngine {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScrapeEngine for HttpScrapeEngine {
    async fn scrape(&self, params: &JsonMap) -> anyhow::Result<JobTable> {
        tracing::debug!("POST {} ({} parameters)", self.endpoint, params.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(params)
            .send()
            .await
            .map_err(EngineError::Http)?
            .error_for_status()
            .map_err(EngineError::Http)?;

        let body: Value = response.json().await.map_err(EngineError::Http)?;
        Ok(decode_response(body)?)
    }
}

/// Accepts a bare array of job records, or an object carrying that array
/// under `jobs` or `data`.
fn decode_response(body: Value) -> Result<JobTable, EngineError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("jobs").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(EngineError::Response(format!(
                    "expected an array of jobs, got {other}"
                )))
            }
            None => {
                return Err(EngineError::Response(
                    "response object has no jobs array".to_string(),
                ))
            }
        },
        other => {
            return Err(EngineError::Response(format!(
                "expected an array or object, got {other}"
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(record) => records.push(record),
            other => {
                return Err(EngineError::Response(format!(
                    "expected a job record object, got {other}"
                )))
            }
        }
    }

    Ok(JobTable::from_records(records))
}

//! Problem metadata client for the solved.ac API.
//!
//! One blocking `GET` per problem, bounded by `metadata.timeout_secs`.
//! Every failure becomes a [`Lookup`] absence; nothing here returns an error
//! for a bad response.

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::config::MetadataConfig;
use crate::models::{Lookup, ProblemId, ProblemMetadata};
use crate::traits::MetadataSource;

pub struct SolvedAcClient {
    client: Client,
    endpoint: String,
}

impl SolvedAcClient {
    pub fn new(config: &MetadataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl MetadataSource for SolvedAcClient {
    fn fetch(&self, id: ProblemId) -> Lookup<ProblemMetadata> {
        debug!("GET {}?problemId={}", self.endpoint, id);

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("problemId", id.0)])
            .header(CONTENT_TYPE, "application/json")
            .send()
        {
            Ok(r) => r,
            Err(e) => return Lookup::Failed(format!("request failed: {}", e)),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Lookup::NotFound;
        }
        if !status.is_success() {
            return Lookup::Failed(format!("HTTP {}", status));
        }

        match response.text() {
            Ok(body) => parse_problem(&body),
            Err(e) => Lookup::Failed(format!("failed to read body: {}", e)),
        }
    }
}

/// Decode a `problem/show` response body.
pub fn parse_problem(body: &str) -> Lookup<ProblemMetadata> {
    match serde_json::from_str::<ProblemMetadata>(body) {
        Ok(meta) => Lookup::Found(meta),
        Err(e) => Lookup::Failed(format!("malformed response: {}", e)),
    }
}

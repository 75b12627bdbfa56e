//! Ranking client: the single point of entry for calls to the ranking service.
//!
//! One `submit` is one POST. No retries, no caching; the caller decides what to
//! do with a failure.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::RankError;
use crate::models::{RankRequest, RankResponse};

pub mod form;

/// The ranking operations the presentation layer depends on.
/// `RankingClient` is the production implementation.
#[async_trait]
pub trait RankingService: Send + Sync {
    async fn submit(&self, request: &RankRequest) -> Result<RankResponse, RankError>;
    async fn health_check(&self) -> Result<Value, RankError>;
}

#[derive(Clone)]
pub struct RankingClient {
    client: Client,
    base_url: String,
}

impl RankingClient {
    pub fn new(config: &Config) -> Result<Self, RankError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Validates, then POSTs the request to `/rank` as multipart form data.
    pub async fn submit(&self, request: &RankRequest) -> Result<RankResponse, RankError> {
        request.validate()?;

        let form = build_form(request)?;
        let url = self.endpoint("/rank");
        info!(
            "Submitting ranking request to {url}: top_k={}, skill_vs_exp_weight={}",
            request.top_k, request.skill_vs_exp_weight
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let (status, body) = read_success_body(response).await?;

        let ranked: RankResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Ranking response was not valid JSON: {e}");
            RankError::Service {
                status: Some(status),
                message: format!("unparseable response ({e}): {body}"),
            }
        })?;

        info!(
            "Ranking succeeded: {} candidates, {} job skills",
            ranked.results.len(),
            ranked.job_skills.len()
        );
        Ok(ranked)
    }

    /// GET `/health`. Any 2xx is healthy; the JSON body is returned as-is.
    pub async fn health_check(&self) -> Result<Value, RankError> {
        let url = self.endpoint("/health");
        debug!("Checking ranking service health at {url}");

        let response = self.client.get(&url).send().await?;
        let (_, body) = read_success_body(response).await?;

        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}

#[async_trait]
impl RankingService for RankingClient {
    async fn submit(&self, request: &RankRequest) -> Result<RankResponse, RankError> {
        RankingClient::submit(self, request).await
    }

    async fn health_check(&self) -> Result<Value, RankError> {
        RankingClient::health_check(self).await
    }
}

/// Builds the four-field multipart body: `resumes_zip`, `job_description`,
/// `top_k`, `skill_vs_exp_weight`.
fn build_form(request: &RankRequest) -> Result<Form, RankError> {
    let zip = request
        .zip_file
        .as_ref()
        .ok_or_else(|| RankError::validation("ZIP file is required"))?;

    let zip_part = Part::stream_with_length(zip.bytes.clone(), zip.bytes.len() as u64)
        .file_name(zip.file_name.clone())
        .mime_str(form::ZIP_MIME)?;

    let fields = form::text_fields(request);
    debug!(
        "Built multipart body: resumes_zip={} ({} bytes), {} text fields",
        zip.file_name,
        zip.bytes.len(),
        fields.len()
    );

    Ok(fields
        .into_iter()
        .fold(Form::new().part(form::ZIP_FIELD, zip_part), |form, (name, value)| {
            form.text(name, value)
        }))
}

/// Returns the status and body text of a 2xx response, or a `Service` error
/// carrying the status and the body verbatim.
/// A failed status wins over a failed body read.
async fn read_success_body(response: Response) -> Result<(u16, String), RankError> {
    let status = response.status();

    if !status.is_success() {
        let message = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("{status} (response body unreadable: {e})"),
        };
        warn!("Ranking service returned {status}: {message}");
        return Err(RankError::Service {
            status: Some(status.as_u16()),
            message,
        });
    }

    let body = response.text().await?;
    Ok((status.as_u16(), body))
}

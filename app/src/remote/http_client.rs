use std::time::Duration;

use job_core::{normalize, FetchError};

use super::{FetchFuture, JobSource};

#[derive(Clone)]
pub struct HttpJobSource {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpJobSource {
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(timeout).build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl JobSource for HttpJobSource {
    fn fetch_jobs(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            tracing::debug!(endpoint = %self.endpoint, "requesting job feed");

            let response = self
                .http_client
                .get(&self.endpoint)
                .header("accept", "application/json")
                .send()
                .await
                .map_err(|error| FetchError::NetworkError(error.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::NetworkError(format!(
                    "job feed responded with HTTP {status}"
                )));
            }

            let body = response
                .text()
                .await
                .map_err(|error| FetchError::NetworkError(error.to_string()))?;

            let jobs = normalize::normalize_body(&body)?;
            tracing::info!(count = jobs.len(), "fetched job feed");
            Ok(jobs)
        })
    }
}

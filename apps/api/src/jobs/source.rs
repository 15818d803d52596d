//! Source Client: one timeout-bounded attempt against the remote job listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Guest listing endpoint that returns job cards as an HTML fragment.
pub const LINKEDIN_GUEST_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Every way the source can fail. All of them mean "source unavailable" to the pipeline.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("source returned status {0}")]
    Status(u16),
}

/// Fetches the raw listing payload for a role and location.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, role: &str, location: &str) -> Result<String, SourceError>;
}

/// Builds the request target. Both terms are percent-encoded; empty terms stay empty.
pub fn build_search_url(base_url: &str, role: &str, location: &str) -> String {
    format!(
        "{base_url}?keywords={}&location={}&start=0",
        urlencoding::encode(role),
        urlencoding::encode(location)
    )
}

/// Scrapes the LinkedIn guest job search. No retries: the pipeline's fallback
/// is the recovery path.
#[derive(Clone)]
pub struct LinkedInGuestSource {
    client: Client,
    base_url: String,
}

impl LinkedInGuestSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl JobSource for LinkedInGuestSource {
    async fn fetch(&self, role: &str, location: &str) -> Result<String, SourceError> {
        let url = build_search_url(&self.base_url, role, location);
        debug!("Fetching job listing: {url}");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, HTML_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

//! API client for the coaching program backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests to fetch teams, workshop history and attendance, and to record
//! new workshop occurrences.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Community, Team, WorkshopAttendance, WorkshopInfo, WorkshopSubmission};

use super::{ApiError, PersistenceBoundary};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
/// 1 second is polite to the server while not making users wait too long.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for the program backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    /// This is more efficient than creating a new client for each request.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            // Rate limited - signal to retry
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .headers(self.auth_headers()?)
                .send()
                .await
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    // Rate limited
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .post(url)
                .headers(self.auth_headers()?)
                .json(body)
                .send()
                .await
                .with_context(|| format!("Failed to send POST request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    // Rate limited
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch the communities visible to the caller, for team selection
    pub async fn get_communities(&self) -> Result<Vec<Community>> {
        let url = format!("{}/communities", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to fetch communities")?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Communities response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text).into());
        }

        // Try to parse as array directly first, then as wrapped object
        if let Ok(communities) = serde_json::from_str::<Vec<Community>>(&text) {
            return Ok(communities);
        }

        #[derive(Deserialize)]
        struct CommunitiesWrapper {
            #[serde(default)]
            communities: Vec<Community>,
            #[serde(default)]
            data: Vec<Community>,
        }

        if let Ok(wrapper) = serde_json::from_str::<CommunitiesWrapper>(&text) {
            if !wrapper.communities.is_empty() {
                return Ok(wrapper.communities);
            }
            if !wrapper.data.is_empty() {
                return Ok(wrapper.data);
            }
        }

        warn!("Failed to parse communities response");
        Ok(vec![])
    }
}

#[async_trait]
impl PersistenceBoundary for ApiClient {
    /// Fetch a team's roster and progress counter
    async fn get_team_by_id(&self, team_id: i64) -> Result<Team> {
        let url = format!("{}/teams/{}", self.base_url, team_id);
        self.get(&url).await
    }

    /// Fetch recorded workshop occurrences for a team
    async fn get_workshops_by_team(&self, team_id: i64) -> Result<Vec<WorkshopInfo>> {
        let url = format!("{}/teams/{}/workshops", self.base_url, team_id);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to fetch workshop list")?;

        let status = response.status();
        let text = response.text().await?;
        debug!(team_id, status = %status, "Workshop list response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text).into());
        }

        // Try to parse as array directly first, then as wrapped object
        if let Ok(workshops) = serde_json::from_str::<Vec<WorkshopInfo>>(&text) {
            return Ok(workshops);
        }

        #[derive(Deserialize)]
        struct WorkshopsWrapper {
            #[serde(default)]
            workshops: Vec<WorkshopInfo>,
        }

        let wrapper: WorkshopsWrapper =
            serde_json::from_str(&text).context("Failed to parse workshop list response")?;
        Ok(wrapper.workshops)
    }

    /// Fetch the finalized attendance snapshot for one occurrence
    async fn get_workshop_attendance(
        &self,
        team_id: i64,
        workshop_id: i64,
    ) -> Result<WorkshopAttendance> {
        let url = format!(
            "{}/teams/{}/workshops/{}/attendance",
            self.base_url, team_id, workshop_id
        );
        self.get(&url).await
    }

    /// Record a new workshop occurrence for a team. The backend advances the
    /// progress counter; the returned snapshot carries the authoritative
    /// new position.
    async fn append_workshop_to_team(
        &self,
        team_id: i64,
        submission: &WorkshopSubmission,
    ) -> Result<WorkshopAttendance> {
        let url = format!("{}/teams/{}/workshops", self.base_url, team_id);
        debug!(team_id, workshop = submission.workshop_number, "Recording workshop occurrence");
        self.post(&url, submission).await
    }
}

// ============================================================================
// Tests
// ============================================================================

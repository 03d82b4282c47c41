use crate::domain::model::{Gist, GistSummary};
use crate::domain::ports::{Cache, ConfigProvider, GistSource};
use crate::utils::error::{GistError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("gistapi/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub REST client. Gist details and raw file bodies go through `cache`.
pub struct GithubClient {
    client: Client,
    api_url: String,
    per_page: usize,
    max_pages: usize,
    cache: Arc<dyn Cache>,
}

impl GithubClient {
    pub fn new<C: ConfigProvider>(config: &C, cache: Arc<dyn Cache>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        if let Some(token) = config.github_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                GistError::InvalidConfigValueError {
                    field: "github.token".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "Token contains characters not allowed in a header".to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            api_url: config.github_api_url().trim_end_matches('/').to_string(),
            per_page: config.per_page(),
            max_pages: config.max_pages(),
            cache,
        })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "upstream request failed");
            GistError::external(url, e.to_string())
        })?;
        tracing::debug!("API response status: {}", response.status());
        Ok(response)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.send(url).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, %status, "upstream returned an error status");
            return Err(GistError::external(url, format!("unexpected status {}", status)));
        }
        response
            .text()
            .await
            .map_err(|e| GistError::external(url, e.to_string()))
    }

    fn gists_page_url(&self, username: &str, page: usize) -> String {
        format!(
            "{}/users/{}/gists?per_page={}&page={}",
            self.api_url, username, self.per_page, page
        )
    }
}

#[async_trait]
impl GistSource for GithubClient {
    async fn user_exists(&self, username: &str) -> Result<bool> {
        let url = format!("{}/users/{}", self.api_url, username);
        let response = self.send(&url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if status.is_success() {
            return Ok(true);
        }
        tracing::warn!(url, %status, "user lookup returned an error status");
        Err(GistError::external(url, format!("unexpected status {}", status)))
    }

    async fn list_gists(&self, username: &str) -> Result<Vec<GistSummary>> {
        let mut all_gists = Vec::new();

        // GitHub returns no total count, so keep going while pages come back full.
        for page in 1..=self.max_pages {
            let url = self.gists_page_url(username, page);
            let body = self.fetch_text(&url).await?;
            let batch: Vec<GistSummary> =
                serde_json::from_str(&body).map_err(|e| GistError::external(&url, e.to_string()))?;

            let received = batch.len();
            all_gists.extend(batch);
            tracing::debug!(username, page, received, "fetched gist listing page");

            if received < self.per_page {
                break;
            }
            if page == self.max_pages {
                tracing::warn!(
                    username,
                    max_pages = self.max_pages,
                    "gist listing stopped at the page limit"
                );
            }
        }

        Ok(all_gists)
    }

    async fn fetch_gist(&self, url: &str) -> Result<Gist> {
        if let Some(cached) = self.cache.get(url) {
            match serde_json::from_str::<Gist>(&cached) {
                Ok(gist) => {
                    tracing::debug!(url, "gist served from cache");
                    return Ok(gist);
                }
                Err(e) => tracing::warn!(url, error = %e, "discarding unreadable cached gist"),
            }
        }

        let body = self.fetch_text(url).await?;
        let gist: Gist =
            serde_json::from_str(&body).map_err(|e| GistError::external(url, e.to_string()))?;
        self.cache.set(url, body);
        Ok(gist)
    }

    async fn fetch_raw(&self, raw_url: &str) -> Result<String> {
        if let Some(cached) = self.cache.get(raw_url) {
            tracing::debug!(raw_url, "file content served from cache");
            return Ok(cached);
        }

        let text = self.fetch_text(raw_url).await?;
        self.cache.set(raw_url, text.clone());
        Ok(text)
    }
}

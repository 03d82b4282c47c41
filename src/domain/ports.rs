use crate::domain::model::{Gist, GistSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to a gist host.
#[async_trait]
pub trait GistSource: Send + Sync {
    async fn user_exists(&self, username: &str) -> Result<bool>;
    async fn list_gists(&self, username: &str) -> Result<Vec<GistSummary>>;
    async fn fetch_gist(&self, url: &str) -> Result<Gist>;
    async fn fetch_raw(&self, raw_url: &str) -> Result<String>;
}

/// String key/value cache for upstream responses.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

pub trait ConfigProvider: Send + Sync {
    fn github_api_url(&self) -> &str;
    fn gist_web_url(&self) -> &str;
    fn github_token(&self) -> Option<&str>;
    fn per_page(&self) -> usize;
    fn max_pages(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout_secs(&self) -> u64;
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of `GET /users/:username/gists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistSummary {
    pub id: String,
    pub url: String,
}

/// Full gist detail. `files` keeps the order GitHub returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub files: IndexMap<String, GistFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub size: Option<u64>,
}

impl GistFile {
    /// Inline content is only usable when GitHub did not cut it short.
    pub fn inline_content(&self) -> Option<&str> {
        if self.truncated {
            None
        } else {
            self.content.as_deref()
        }
    }
}

/// Body of `POST /api/v1/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub username: String,
    pub pattern: String,
    pub matches: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    pub username: String,
    pub pattern: String,
    pub matches: Vec<String>,
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            status: "success".to_string(),
            username: result.username,
            pattern: result.pattern,
            matches: result.matches,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code,
            message: message.into(),
        }
    }
}

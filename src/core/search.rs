use crate::domain::model::{Gist, GistSummary, SearchRequest, SearchResult};
use crate::domain::ports::{ConfigProvider, GistSource};
use crate::utils::error::{GistError, Result};
use crate::utils::validation::{validate_required_field, validate_username};
use futures::stream::{self, StreamExt, TryStreamExt};
use regex::Regex;
use std::borrow::Cow;
use std::sync::Arc;

/// A user-supplied pattern, matched only at the start of a file's text.
#[derive(Debug, Clone)]
pub struct GistMatcher {
    anchored: Regex,
}

impl GistMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        // Compile the bare pattern first so that text like `a)|(b` cannot
        // escape the anchoring group below.
        Regex::new(pattern)?;
        let anchored = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self { anchored })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

pub struct SearchService {
    source: Arc<dyn GistSource>,
    gist_web_url: String,
    concurrent_requests: usize,
}

impl SearchService {
    pub fn new<C: ConfigProvider>(source: Arc<dyn GistSource>, config: &C) -> Self {
        Self {
            source,
            gist_web_url: config.gist_web_url().trim_end_matches('/').to_string(),
            concurrent_requests: config.concurrent_requests().max(1),
        }
    }

    /// Returns the web links of every gist owned by `username` that has at
    /// least one file matching `pattern`, in listing order.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResult> {
        let username = validate_required_field("username", &request.username)?.clone();
        let pattern = validate_required_field("pattern", &request.pattern)?.clone();
        validate_username(&username)?;
        let matcher = GistMatcher::new(&pattern)?;

        if !self.source.user_exists(&username).await? {
            return Err(GistError::UserNotFound { username });
        }

        let gists = self.source.list_gists(&username).await?;
        let gist_count = gists.len();

        let matches: Vec<String> = stream::iter(
            gists
                .into_iter()
                .map(|summary| self.match_gist(&username, summary, &matcher)),
        )
        .buffered(self.concurrent_requests)
        .try_collect::<Vec<Option<String>>>()
        .await?
        .into_iter()
        .flatten()
        .collect();

        tracing::info!(
            username = %username,
            gist_count,
            match_count = matches.len(),
            "search completed"
        );

        Ok(SearchResult {
            username,
            pattern,
            matches,
        })
    }

    async fn match_gist(
        &self,
        username: &str,
        summary: GistSummary,
        matcher: &GistMatcher,
    ) -> Result<Option<String>> {
        let gist = self.source.fetch_gist(&summary.url).await?;

        for (name, file) in &gist.files {
            let text = match (file.inline_content(), file.raw_url.as_deref()) {
                (Some(content), _) => Cow::Borrowed(content),
                (None, Some(raw_url)) => Cow::Owned(self.source.fetch_raw(raw_url).await?),
                (None, None) => {
                    tracing::debug!(gist = %gist.id, file = %name, "file has no readable content");
                    continue;
                }
            };

            if matcher.is_match(&text) {
                tracing::debug!(gist = %gist.id, file = %name, "pattern matched");
                return Ok(Some(self.gist_link(username, &gist)));
            }
        }

        Ok(None)
    }

    fn gist_link(&self, username: &str, gist: &Gist) -> String {
        format!("{}/{}/{}", self.gist_web_url, username, gist.id)
    }
}

use crate::config::ConfigOverrides;
use crate::utils::error::{GistError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubSection {
    pub api_url: Option<String>,
    pub gist_web_url: Option<String>,
    pub token: Option<String>,
    pub per_page: Option<usize>,
    pub max_pages: Option<usize>,
    pub concurrent_requests: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSection {
    pub capacity: Option<usize>,
    pub ttl_secs: Option<u64>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"))
}

impl TomlConfig {
    /// Loads a config file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GistError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses config text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GistError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.server.bind.clone(),
            github_api_url: self.github.api_url.clone(),
            gist_web_url: self.github.gist_web_url.clone(),
            github_token: self.github.token.clone(),
            per_page: self.github.per_page,
            max_pages: self.github.max_pages,
            concurrent_requests: self.github.concurrent_requests,
            request_timeout_secs: self.github.request_timeout_secs,
            cache_capacity: self.cache.capacity,
            cache_ttl_secs: self.cache.ttl_secs,
        }
    }
}

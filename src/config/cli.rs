use crate::config::toml_config::TomlConfig;
use crate::config::{ConfigOverrides, ServiceConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "gistapi")]
#[command(about = "Search a GitHub user's public gists with a regular expression")]
pub struct CliConfig {
    #[arg(long, env = "GISTAPI_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GISTAPI_BIND", help = "Listen address [default: 0.0.0.0:8000]")]
    pub bind: Option<String>,

    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    #[arg(long, env = "GIST_WEB_URL")]
    pub gist_web_url: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long)]
    pub per_page: Option<usize>,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long, env = "GISTAPI_CONCURRENT_REQUESTS")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Upstream request timeout in seconds")]
    pub request_timeout: Option<u64>,

    #[arg(long, env = "GISTAPI_CACHE_CAPACITY", help = "Cached upstream responses, 0 disables")]
    pub cache_capacity: Option<usize>,

    #[arg(long, env = "GISTAPI_CACHE_TTL", help = "Cache entry lifetime in seconds")]
    pub cache_ttl: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            github_api_url: self.github_api_url.clone(),
            gist_web_url: self.gist_web_url.clone(),
            github_token: self.github_token.clone(),
            per_page: self.per_page,
            max_pages: self.max_pages,
            concurrent_requests: self.concurrent_requests,
            request_timeout_secs: self.request_timeout,
            cache_capacity: self.cache_capacity,
            cache_ttl_secs: self.cache_ttl,
        }
    }

    /// Layers the optional config file under the command line.
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut layers = Vec::with_capacity(2);
        if let Some(path) = &self.config {
            layers.push(TomlConfig::from_file(path)?.overrides());
        }
        layers.push(self.overrides());
        ServiceConfig::from_layers(&layers)
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GistError, Result};
use crate::utils::validation::{self, Validate};
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GIST_WEB_URL: &str = "https://gist.github.com";
/// GitHub's documented page size ceiling.
pub const DEFAULT_PER_PAGE: usize = 100;
/// 30 pages of 100 is the 3000 gists GitHub will list.
pub const DEFAULT_MAX_PAGES: usize = 30;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 8;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// One layer of optional settings. Layers are applied in order and later
/// layers win (file, then command line).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub github_api_url: Option<String>,
    pub gist_web_url: Option<String>,
    pub github_token: Option<String>,
    pub per_page: Option<usize>,
    pub max_pages: Option<usize>,
    pub concurrent_requests: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub cache_capacity: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
}

/// Fully resolved service configuration.
#[derive(Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub github_api_url: String,
    pub gist_web_url: String,
    pub github_token: Option<String>,
    pub per_page: usize,
    pub max_pages: usize,
    pub concurrent_requests: usize,
    pub request_timeout_secs: u64,
    pub cache_capacity: usize,
    pub cache_ttl_secs: Option<u64>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind", &self.bind)
            .field("github_api_url", &self.github_api_url)
            .field("gist_web_url", &self.gist_web_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("per_page", &self.per_page)
            .field("max_pages", &self.max_pages)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_capacity", &self.cache_capacity)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            gist_web_url: DEFAULT_GIST_WEB_URL.to_string(),
            github_token: None,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_capacity: 0,
            cache_ttl_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Applies `layers` over the defaults and validates the result.
    pub fn from_layers(layers: &[ConfigOverrides]) -> Result<Self> {
        let mut config = Self::default();
        let mut bind = DEFAULT_BIND.to_string();

        for layer in layers {
            if let Some(value) = &layer.bind {
                bind = value.clone();
            }
            if let Some(value) = &layer.github_api_url {
                config.github_api_url = value.clone();
            }
            if let Some(value) = &layer.gist_web_url {
                config.gist_web_url = value.clone();
            }
            if let Some(value) = &layer.github_token {
                config.github_token = Some(value.clone()).filter(|token| !token.is_empty());
            }
            if let Some(value) = layer.per_page {
                config.per_page = value;
            }
            if let Some(value) = layer.max_pages {
                config.max_pages = value;
            }
            if let Some(value) = layer.concurrent_requests {
                config.concurrent_requests = value;
            }
            if let Some(value) = layer.request_timeout_secs {
                config.request_timeout_secs = value;
            }
            if let Some(value) = layer.cache_capacity {
                config.cache_capacity = value;
            }
            if let Some(value) = layer.cache_ttl_secs {
                config.cache_ttl_secs = Some(value);
            }
        }

        config.bind = parse_bind(&bind)?;
        config.github_api_url = config.github_api_url.trim_end_matches('/').to_string();
        config.gist_web_url = config.gist_web_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_capacity > 0
    }
}

fn parse_bind(value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|e: std::net::AddrParseError| GistError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("github.api_url", &self.github_api_url)?;
        validation::validate_url("github.gist_web_url", &self.gist_web_url)?;
        validation::validate_range("github.per_page", self.per_page, 1, DEFAULT_PER_PAGE)?;
        validation::validate_positive_number("github.max_pages", self.max_pages, 1)?;
        validation::validate_positive_number(
            "github.concurrent_requests",
            self.concurrent_requests,
            1,
        )?;
        validation::validate_positive_number(
            "github.request_timeout_secs",
            self.request_timeout_secs,
            1,
        )?;
        if let Some(ttl) = self.cache_ttl_secs {
            validation::validate_positive_number("cache.ttl_secs", ttl, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ServiceConfig {
    fn github_api_url(&self) -> &str {
        &self.github_api_url
    }

    fn gist_web_url(&self) -> &str {
        &self.gist_web_url
    }

    fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    fn per_page(&self) -> usize {
        self.per_page
    }

    fn max_pages(&self) -> usize {
        self.max_pages
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_listen_on_port_8000() {
        let config = ServiceConfig::from_layers(&[]).unwrap();
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.per_page, 100);
        assert_eq!(config.max_pages, 30);
        assert!(!config.cache_enabled());
    }

    #[test]
    fn test_later_layers_win() {
        let file = ConfigOverrides {
            bind: Some("127.0.0.1:9000".to_string()),
            per_page: Some(50),
            cache_capacity: Some(128),
            ..Default::default()
        };
        let cli = ConfigOverrides {
            per_page: Some(25),
            github_api_url: Some("http://localhost:4000/".to_string()),
            ..Default::default()
        };

        let config = ServiceConfig::from_layers(&[file, cli]).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:9000");
        assert_eq!(config.per_page, 25);
        assert_eq!(config.cache_capacity, 128);
        assert_eq!(config.github_api_url, "http://localhost:4000");
    }

    #[test]
    fn test_empty_token_is_treated_as_absent() {
        let layer = ConfigOverrides {
            github_token: Some(String::new()),
            ..Default::default()
        };
        let config = ServiceConfig::from_layers(&[layer]).unwrap();
        assert!(config.github_token().is_none());
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let layer = ConfigOverrides {
            github_token: Some("ghp_secret".to_string()),
            ..Default::default()
        };
        let config = ServiceConfig::from_layers(&[layer]).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_large_timeouts_are_accepted() {
        let layer = ConfigOverrides {
            request_timeout_secs: Some(1u64 << 32),
            cache_ttl_secs: Some(1u64 << 32),
            ..Default::default()
        };
        let config = ServiceConfig::from_layers(&[layer]).unwrap();
        assert_eq!(config.request_timeout_secs, 1u64 << 32);

        let zero_timeout = ConfigOverrides {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(ServiceConfig::from_layers(&[zero_timeout]).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_bind = ConfigOverrides {
            bind: Some("not-an-address".to_string()),
            ..Default::default()
        };
        assert!(ServiceConfig::from_layers(&[bad_bind]).is_err());

        let bad_page = ConfigOverrides {
            per_page: Some(500),
            ..Default::default()
        };
        assert!(ServiceConfig::from_layers(&[bad_page]).is_err());

        let bad_concurrency = ConfigOverrides {
            concurrent_requests: Some(0),
            ..Default::default()
        };
        assert!(ServiceConfig::from_layers(&[bad_concurrency]).is_err());

        let bad_url = ConfigOverrides {
            github_api_url: Some("ftp://github.com".to_string()),
            ..Default::default()
        };
        assert!(ServiceConfig::from_layers(&[bad_url]).is_err());
    }
}

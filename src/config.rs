use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Runtime configuration
    pub environment: String,
    pub log_level: String,

    // Remote authoritative store (absent = local-only mode)
    pub remote_api_url: Option<String>,
    pub remote_api_token: Option<String>,

    // List pagination
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            remote_api_url: env::var("REMOTE_API_URL").ok().filter(|s| !s.is_empty()),
            remote_api_token: env::var("REMOTE_API_TOKEN").ok().filter(|s| !s.is_empty()),

            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            max_page_size: env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 是否配置了远程权威存储
    pub fn has_remote(&self) -> bool {
        self.remote_api_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            remote_api_url: None,
            remote_api_token: None,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

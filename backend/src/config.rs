use anyhow::{Context, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::time::Duration;

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base of the YouTube Data API, without the `/videos` suffix.
    pub youtube_api_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_var: String,
    pub upstream_timeout: Duration,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            allowed_origins: Vec::new(),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.upstream_timeout);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            youtube_api_url: env::var("YOUTUBE_API_URL").unwrap_or(defaults.youtube_api_url),
            api_key_var: env::var("YOUTUBE_API_KEY_VAR").unwrap_or(defaults.api_key_var),
            upstream_timeout,
            allowed_origins,
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.youtube_api_url)
            .with_context(|| format!("Invalid YOUTUBE_API_URL: {}", self.youtube_api_url))?;
        Ok(())
    }

    /// Looked up on every call. An empty value counts as missing.
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn videos_endpoint(&self) -> String {
        format!("{}/videos", self.youtube_api_url.trim_end_matches('/'))
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting stats proxy...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_http_client(config: &ProxyConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .context("Failed to build upstream HTTP client")?;
    Ok(client)
}

pub fn create_cors(config: &ProxyConfig) -> Result<rocket_cors::Cors> {
    let allowed_origins = if config.allowed_origins.is_empty() {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&config.allowed_origins)
    };

    let cors = CorsOptions::default()
        .allowed_origins(allowed_origins)
        .allowed_methods(
            vec![Method::Get, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .allow_credentials(false)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

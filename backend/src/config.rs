use crate::services::youtube_service::{VideoPlatform, YouTubeClient};
use crate::AppState;
use anyhow::{Context, Result};
use env_logger::{Builder, Env};
use log::info;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SEARCH_REGION: &str = "KR";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: String,
    pub youtube_api_base_url: Url,
    pub request_timeout: Duration,
    pub search_region: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let youtube_api_key = lookup("YOUTUBE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("YOUTUBE_API_KEY environment variable must be set")?;

        let base_url =
            lookup("YOUTUBE_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        // join() drops the last path segment unless the base ends with a slash
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        let youtube_api_base_url = Url::parse(&base_url)
            .with_context(|| format!("YOUTUBE_API_BASE_URL is not a valid URL: {base_url}"))?;

        let request_timeout = match lookup("YOUTUBE_REQUEST_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| {
                    format!("YOUTUBE_REQUEST_TIMEOUT_SECS must be a positive integer, got '{secs}'")
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let search_region = lookup("SEARCH_REGION")
            .filter(|region| !region.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_REGION.to_string());

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            youtube_api_key,
            youtube_api_base_url,
            request_timeout: Duration::from_secs(request_timeout),
            search_region,
            allowed_origins,
        })
    }
}

pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_youtube_client(config: &Config) -> Result<YouTubeClient> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    info!(
        "Using YouTube Data API at {} (timeout {:?})",
        config.youtube_api_base_url, config.request_timeout
    );

    Ok(YouTubeClient::new(
        client,
        config.youtube_api_base_url.clone(),
        config.youtube_api_key.clone(),
    ))
}

pub fn create_app_state(config: &Config) -> Result<AppState> {
    let platform: Arc<dyn VideoPlatform> = Arc::new(create_youtube_client(config)?);
    Ok(AppState::new(platform, &config.search_region))
}

pub fn create_cors(config: &Config) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(config.allowed_origins.as_slice()))
        .allowed_methods(
            vec![Method::Get, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

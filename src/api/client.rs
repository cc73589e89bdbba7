//! HTTP client for the upstream listing and search endpoints
//!
//! Thin wrapper over `reqwest`. No retries and no client-imposed timeout:
//! the transport's default behavior governs, and a retry is always a fresh
//! call initiated by the caller.

use super::wire::ListingResponse;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::{Category, Page};
use reqwest::Client;
use tracing::{debug, warn};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// API key, sent as the `key` query parameter on every request
    pub api_key: String,
    /// User agent string
    pub user_agent: String,
}

impl ApiClientConfig {
    /// Create a new config builder
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }

    /// Build a client config from the application config
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::builder()
            .base_url(&config.base_url)
            .api_key(config.require_api_key()?)
            .build())
    }
}

/// Builder for the API client config
#[derive(Debug, Default)]
pub struct ApiClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl ApiClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| "https://www.googleapis.com/youtube/v3".to_string()),
            api_key: self.api_key.unwrap_or_default(),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("tubefeed/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Parameters for the popular-videos listing endpoint
#[derive(Debug, Clone)]
pub struct PopularQuery {
    /// Region code (e.g. "US")
    pub region: String,
    /// Optional category filter
    pub category: Option<Category>,
    /// Results per page
    pub max_results: u32,
}

/// Parameters for the search endpoint
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Search text
    pub query: String,
    /// Results per page
    pub max_results: u32,
    /// Restrict to short-duration videos
    pub short_duration: bool,
}

/// Client for the upstream video platform
#[derive(Debug, Clone)]
pub struct VideoApi {
    client: Client,
    config: ApiClientConfig,
}

impl VideoApi {
    /// Create a new API client
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    /// Fetch a page of the popular listing
    pub async fn popular(&self, query: &PopularQuery, cursor: Option<&str>) -> Result<Page> {
        let mut params = vec![
            ("part".to_string(), "snippet".to_string()),
            ("chart".to_string(), "mostPopular".to_string()),
            ("regionCode".to_string(), query.region.clone()),
            ("maxResults".to_string(), query.max_results.to_string()),
        ];
        if let Some(id) = query.category.and_then(|c| c.listing_id()) {
            params.push(("videoCategoryId".to_string(), id.to_string()));
        }
        self.fetch_page("videos", params, cursor).await
    }

    /// Fetch a page of search results
    pub async fn search(&self, query: &SearchQuery, cursor: Option<&str>) -> Result<Page> {
        let mut params = vec![
            ("part".to_string(), "snippet".to_string()),
            ("q".to_string(), query.query.clone()),
            ("type".to_string(), "video".to_string()),
            ("maxResults".to_string(), query.max_results.to_string()),
        ];
        if query.short_duration {
            params.push(("videoDuration".to_string(), "short".to_string()));
        }
        self.fetch_page("search", params, cursor).await
    }

    /// Issue a GET and normalize the response into a `Page`
    async fn fetch_page(
        &self,
        path: &str,
        mut params: Vec<(String, String)>,
        cursor: Option<&str>,
    ) -> Result<Page> {
        if let Some(token) = cursor {
            params.push(("pageToken".to_string(), token.to_string()));
        }
        params.push(("key".to_string(), self.config.api_key.clone()));

        let url = self.build_url(path);
        debug!(%url, cursor = cursor.unwrap_or(""), "fetching page");

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The upstream embeds a human-readable message in error payloads
            if let Ok(parsed) = serde_json::from_str::<ListingResponse>(&body) {
                if let Some(message) = parsed.error_message() {
                    warn!(status = status.as_u16(), message, "upstream error");
                    return Err(Error::api(message));
                }
            }
            return Err(Error::http_status(status.as_u16(), body));
        }

        let parsed: ListingResponse = serde_json::from_str(&body)?;
        parsed.into_page()
    }

    /// Build full URL from a path
    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

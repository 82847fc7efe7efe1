//! Radio Browser directory client
//!
//! Searches the community station directory at radio-browser.info.
//! API docs: https://api.radio-browser.info

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::Station;

/// Public mirror used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://de1.api.radio-browser.info";

/// Stations per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the client will ask for
pub const MAX_PAGE_SIZE: u32 = 500;

/// Directory failures. Every variant means the directory is unavailable for
/// this query; callers keep whatever list they already have.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Directory returned HTTP {0}")]
    Status(u16),

    #[error("Invalid directory response: {0}")]
    Decode(String),
}

/// Radio Browser API client
#[derive(Debug, Clone)]
pub struct RadioBrowserClient {
    base_url: String,
    client: reqwest::Client,
    page_size: u32,
}

impl RadioBrowserClient {
    /// Create a client against the default public mirror
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (other mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent(concat!("radiotui/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size, kept within 1..=MAX_PAGE_SIZE
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search stations by name, most voted first.
    ///
    /// An empty `term` returns the unfiltered top stations. Pages start at 1;
    /// page 0 is read as page 1.
    pub async fn search(&self, term: &str, page: u32) -> Result<Vec<Station>, DirectoryError> {
        let page = page.max(1);
        let offset = u64::from(page - 1).saturating_mul(u64::from(self.page_size));
        let url = format!("{}/json/stations/search", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("limit", self.page_size.to_string()),
            ("offset", offset.to_string()),
            ("order", "votes".to_string()),
            ("reverse", "true".to_string()),
        ];
        let term = term.trim();
        if !term.is_empty() {
            query.push(("name", term.to_string()));
        }

        debug!(%url, term, page, "directory search");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let raw: Vec<StationRaw> = serde_json::from_str(&body)
                    .map_err(|e| DirectoryError::Decode(format!("JSON parse error: {}", e)))?;
                Ok(raw.into_iter().filter_map(StationRaw::into_station).collect())
            }
            status => Err(DirectoryError::Status(status.as_u16())),
        }
    }
}

impl Default for RadioBrowserClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct StationRaw {
    // The directory calls it "stationuuid"; older mirrors and fixtures use "id"
    stationuuid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    url_resolved: Option<String>,
    country: Option<String>,
    tags: Option<String>,
    votes: Option<u64>,
}

impl StationRaw {
    fn into_station(self) -> Option<Station> {
        let url_resolved = self.url_resolved.unwrap_or_default().trim().to_string();
        if url_resolved.is_empty() {
            return None;
        }

        Some(Station {
            id: self.stationuuid.or(self.id).unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_string(),
            url_resolved,
            country: self.country.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            votes: self.votes.unwrap_or(0),
        })
    }
}

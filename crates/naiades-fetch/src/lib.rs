use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use naiades_config::ViewerConfig;
use naiades_listing::{Listing, ListingError};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

pub use reqwest::StatusCode;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Coarse failure classes shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Status,
    Malformed,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "service unreachable",
            Self::Status => "service returned an error",
            Self::Malformed => "unexpected response",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid listing url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("listing service answered {0}")]
    Status(StatusCode),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error(transparent)]
    Malformed(#[from] ListingError),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } | Self::Transport(_) | Self::Body(_) => FailureKind::Transport,
            Self::Status(_) => FailureKind::Status,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }
}

/// Where a listing comes from. The view holds one of these for its lifetime
/// and asks it exactly once per mount.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(&self) -> Result<Listing, FetchError>;
    fn describe(&self) -> String;
}

pub struct HttpListingSource {
    client: Client,
    url: Url,
}

impl HttpListingSource {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self, FetchError> {
        Self::new(&config.downloads_url())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_listing(&self) -> Result<Listing, FetchError> {
        tracing::info!(url = %self.url, "fetching the latest");

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        let listing = Listing::from_json(&body)?;

        tracing::info!(
            groups = listing.len(),
            entries = listing.entry_count(),
            "listing received"
        );
        Ok(listing)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

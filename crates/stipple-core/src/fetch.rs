//! HTTP retrieval of the contribution-graph document.

use tracing::debug;

use crate::domain::error::TransportError;

/// Host serving public contribution graphs.
pub const DEFAULT_BASE_URL: &str = "https://github.com/users";

/// Client for fetching a user's contribution-graph SVG.
pub struct GraphClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GraphClient {
    /// Create a client against `base_url`; the graph for a user lives at
    /// `<base_url>/<username>/contributions`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("stipple/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Fetch the raw SVG document for `username`.
    ///
    /// A non-success response status maps to [`TransportError::Status`];
    /// anything that keeps the request from completing maps to
    /// [`TransportError::Connection`].
    pub async fn fetch(&self, username: &str) -> Result<String, TransportError> {
        let url = format!("{}/{}/contributions", self.base_url, username);
        debug!(%url, "fetching contribution graph");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))
    }
}

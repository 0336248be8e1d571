//! Podcast API client: a thin HTTP wrapper over the episodes endpoint

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;

use super::episode::{Episode, RawEpisode};

/// Development server of the podcast API
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

const USER_AGENT: &str = concat!("podcast-rs/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client configured with the API base URL.
///
/// No retry policy anywhere: every failure surfaces once to the caller.
#[derive(Clone)]
pub struct PodcastClient {
    http: reqwest::Client,
    base_url: String,
}

impl PodcastClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// Build a client from the `PODCAST_API_URL` environment variable,
    /// falling back to the local development server.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("PODCAST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("building HTTP client")?;

        tracing::info!(base_url = %base_url, "Podcast API client initialized");
        Ok(Self::new(http, base_url))
    }

    /// Fetch the most recent episodes, newest first.
    pub async fn list_episodes(&self, limit: u32) -> Result<Vec<Episode>> {
        let url = format!("{}/episodes", self.base_url);
        tracing::debug!(url = %url, limit, "Fetching episode list");

        let raw: Vec<RawEpisode> = self
            .http
            .get(&url)
            .query(&[
                ("_limit", limit.to_string().as_str()),
                ("_sort", "published_at"),
                ("_order", "desc"),
            ])
            .send()
            .await
            .context("podcast API unreachable")?
            .error_for_status()
            .context("episode list request failed")?
            .json()
            .await
            .context("malformed episode list response")?;

        tracing::info!(count = raw.len(), "Episode list fetched");
        Ok(raw.into_iter().map(Episode::from_raw).collect())
    }

    /// Fetch a single episode by id, mapping 404 to a not-found error.
    pub async fn get_episode(&self, id: &str) -> Result<Episode> {
        let url = format!("{}/episodes/{}", self.base_url, id);
        tracing::debug!(url = %url, "Fetching episode detail");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("podcast API unreachable")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(anyhow!("episode not found: {}", id));
        }

        let raw: RawEpisode = response
            .error_for_status()
            .context("episode detail request failed")?
            .json()
            .await
            .context("malformed episode detail response")?;

        Ok(Episode::from_raw(raw))
    }

    /// Download the audio file of an episode.
    pub async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %url, "Downloading episode audio");

        let bytes = self
            .http
            .get(url)
            .send()
            .await
            .context("audio host unreachable")?
            .error_for_status()
            .context("audio download failed")?
            .bytes()
            .await
            .context("audio download interrupted")?;

        tracing::info!(url = %url, size = bytes.len(), "Episode audio downloaded");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let http = reqwest::Client::new();
        let client = PodcastClient::new(http, "http://localhost:3333//");
        assert_eq!(client.base_url, "http://localhost:3333");
    }
}

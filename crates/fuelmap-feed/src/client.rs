//! HTTP and file access for station documents.

use std::time::Duration;

use fuelmap_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::source::DatasetSource;

/// Fetches raw station documents.
///
/// Remote documents are requested with the configured timeout and
/// `User-Agent`. When `cache_bust` is set, a `t=<unix millis>` query
/// parameter is appended so intermediate caches never serve a stale
/// price list.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    cache_bust: bool,
}

impl FeedClient {
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, cache_bust: bool) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, cache_bust })
    }

    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.cache_bust,
        )
    }

    /// Read a document body from a URL or a local file.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] if a URL source cannot be parsed.
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::UnexpectedStatus`] on any non-2xx response.
    /// - [`FeedError::Io`] if a file source cannot be read.
    pub async fn fetch_document(&self, source: &DatasetSource) -> Result<String, FeedError> {
        match source {
            DatasetSource::Url(url) => self.fetch_url(url).await,
            DatasetSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FeedError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FeedError> {
        let request_url = self.request_url(url)?;
        tracing::debug!(url, "fetching station document");

        let response = self
            .client
            .get(request_url)
            .header(reqwest::header::ACCEPT, "application/xml, text/xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    fn request_url(&self, url: &str) -> Result<Url, FeedError> {
        let mut parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if self.cache_bust {
            let stamp = chrono::Utc::now().timestamp_millis().to_string();
            parsed.query_pairs_mut().append_pair("t", &stamp);
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_appends_cache_buster() {
        let client = FeedClient::new(5, "fuelmap-test/0.1", true).expect("client");
        let url = client
            .request_url("https://example.test/publicaciones/places")
            .expect("url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "t");
        assert!(pairs[0].1.parse::<i64>().is_ok());
    }

    #[test]
    fn request_url_keeps_existing_query() {
        let client = FeedClient::new(5, "fuelmap-test/0.1", true).expect("client");
        let url = client
            .request_url("https://example.test/prices?region=bc")
            .expect("url");
        assert!(url.as_str().starts_with("https://example.test/prices?region=bc&t="));
    }

    #[test]
    fn request_url_without_cache_bust_is_unchanged() {
        let client = FeedClient::new(5, "fuelmap-test/0.1", false).expect("client");
        let url = client.request_url("https://example.test/places").expect("url");
        assert_eq!(url.as_str(), "https://example.test/places");
    }

    #[test]
    fn request_url_rejects_garbage() {
        let client = FeedClient::new(5, "fuelmap-test/0.1", false).expect("client");
        let err = client.request_url("not a url").unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl { .. }));
    }
}

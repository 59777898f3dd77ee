//! HTTP client for the URL-shortening provider
//!
//! Implements [`UrlShortener`]. Every failure path answers `None`; the
//! caller degrades to the unshortened URL.

use async_trait::async_trait;

use crate::services::url_shortener::UrlShortener;

pub struct UrlShortenerClient {
    api_url: String,
    client: reqwest::Client,
}

impl UrlShortenerClient {
    pub fn new(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { api_url, client }
    }
}

#[async_trait]
impl UrlShortener for UrlShortenerClient {
    async fn shorten(&self, url: &str) -> Option<String> {
        let request_url = format!("{}?url={}", self.api_url, urlencoding::encode(url));

        let response = match self.client.get(&request_url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("URL shortener request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!("URL shortener returned {}", response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => {
                let short = body.trim();
                if short.starts_with("http") {
                    Some(short.to_string())
                } else {
                    log::warn!("URL shortener returned unusable body: {}", short);
                    None
                }
            }
            Err(e) => {
                log::warn!("URL shortener body read failed: {}", e);
                None
            }
        }
    }
}

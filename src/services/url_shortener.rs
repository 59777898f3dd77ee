//! Branding URL shortening
//!
//! The shortened branding URL is memoized on the company: once stored it is
//! never re-shortened. A shortener failure degrades to returning the input
//! URL unshortened; this path never errors.

use async_trait::async_trait;

use crate::models::company::Company;

/// External URL-shortening collaborator. `None` means the shortener could
/// not produce a short URL.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Option<String>;
}

/// Outcome of a shortening attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlResult {
    pub url: String,
    /// True when a freshly shortened URL was stored on the company and the
    /// caller must persist the change.
    pub newly_stored: bool,
}

/// Return the stored short URL if present; otherwise ask the shortener.
/// On success the short URL is stored on the company (the caller persists
/// it); on failure the original URL is returned and nothing is stored.
pub async fn get_or_create_short_brand_url(
    company: &mut Company,
    url: &str,
    shortener: &dyn UrlShortener,
) -> ShortUrlResult {
    if let Some(stored) = company.short_h_brand_url.as_deref() {
        return ShortUrlResult {
            url: stored.to_string(),
            newly_stored: false,
        };
    }

    match shortener.shorten(url).await {
        Some(short) => {
            company.short_h_brand_url = Some(short.clone());
            ShortUrlResult {
                url: short,
                newly_stored: true,
            }
        }
        None => {
            log::warn!(
                "URL shortening failed for company {}, returning the long URL",
                company.id
            );
            ShortUrlResult {
                url: url.to_string(),
                newly_stored: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingShortener {
        calls: AtomicUsize,
        result: Option<String>,
    }

    impl CountingShortener {
        fn returning(result: Option<&str>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: result.map(|s| s.to_string()),
            }
        }
    }

    #[async_trait]
    impl UrlShortener for CountingShortener {
        async fn shorten(&self, _url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn company() -> Company {
        Company::new("Hundgruppen AB".to_string(), "5560360793".to_string(), None)
    }

    #[tokio::test]
    async fn test_second_call_returns_stored_value_without_shortening() {
        let mut company = company();
        let shortener = CountingShortener::returning(Some("https://s.example/abc"));

        let first =
            get_or_create_short_brand_url(&mut company, "https://example.se/long", &shortener)
                .await;
        assert_eq!(first.url, "https://s.example/abc");
        assert!(first.newly_stored);
        assert_eq!(company.short_h_brand_url.as_deref(), Some("https://s.example/abc"));

        let second =
            get_or_create_short_brand_url(&mut company, "https://example.se/long", &shortener)
                .await;
        assert_eq!(second.url, "https://s.example/abc");
        assert!(!second.newly_stored);
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_long_url() {
        let mut company = company();
        let shortener = CountingShortener::returning(None);

        let result =
            get_or_create_short_brand_url(&mut company, "https://example.se/long", &shortener)
                .await;
        assert_eq!(result.url, "https://example.se/long");
        assert!(!result.newly_stored);
        // nothing stored: the next call tries the shortener again
        assert!(company.short_h_brand_url.is_none());

        get_or_create_short_brand_url(&mut company, "https://example.se/long", &shortener).await;
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pre_stored_url_is_returned_unchanged() {
        let mut company = company();
        company.short_h_brand_url = Some("https://s.example/old".to_string());
        let shortener = CountingShortener::returning(Some("https://s.example/new"));

        let result =
            get_or_create_short_brand_url(&mut company, "https://example.se/long", &shortener)
                .await;
        assert_eq!(result.url, "https://s.example/old");
        assert!(!result.newly_stored);
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 0);
    }
}

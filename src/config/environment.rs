//! Environment configuration

use std::env;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// Base URL of the external event-calendar provider
    pub calendar_api_url: String,
    /// Endpoint of the URL-shortening provider
    pub url_shortener_api_url: String,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            calendar_api_url: env::var("CALENDAR_API_URL")
                .expect("CALENDAR_API_URL must be set"),
            url_shortener_api_url: env::var("URL_SHORTENER_API_URL")
                .expect("URL_SHORTENER_API_URL must be set"),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub api_token: String,
    pub user_email: String,
    pub dashboard_origin: Option<String>, // Sent as Origin/Referer when the upstream checks them
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            api_base_url: std::env::var("ASC_API_BASE_URL")
                .map_err(|_| anyhow::anyhow!("ASC_API_BASE_URL environment variable required"))
                .and_then(|url| validate_base_url(&url).map(|_| url))?,
            api_token: std::env::var("ASC_API_TOKEN")
                .map_err(|_| anyhow::anyhow!("ASC_API_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("ASC_API_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            user_email: std::env::var("ASC_USER_EMAIL")
                .map_err(|_| anyhow::anyhow!("ASC_USER_EMAIL environment variable required"))
                .and_then(|email| {
                    if !email.contains('@') {
                        anyhow::bail!("ASC_USER_EMAIL must be an email address");
                    }
                    Ok(email.trim().to_string())
                })?,
            dashboard_origin: std::env::var("ASC_DASHBOARD_ORIGIN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            request_timeout_secs: std::env::var("ASC_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("ASC_REQUEST_TIMEOUT_SECS must be a whole number of seconds")
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Upstream API base URL: {}", config.api_base_url);
        tracing::debug!("Wallet lookup email: {}", config.user_email);
        if let Some(ref origin) = config.dashboard_origin {
            tracing::info!("Dashboard origin configured: {}", origin);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Checks that the upstream base URL is an absolute http(s) URL.
pub fn validate_base_url(url: &str) -> anyhow::Result<()> {
    if url.trim().is_empty() {
        anyhow::bail!("ASC_API_BASE_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("ASC_API_BASE_URL must start with http:// or https://");
    }
    url::Url::parse(url)
        .map_err(|e| anyhow::anyhow!("ASC_API_BASE_URL is not a valid URL: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validation() {
        assert!(validate_base_url("https://api.example.com/api/v1").is_ok());
        assert!(validate_base_url("http://localhost:8000/api/v1").is_ok());
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("https://").is_err());
    }

    #[test]
    fn test_request_timeout_never_zero() {
        let config = Config {
            port: 3000,
            api_base_url: "https://api.example.com".to_string(),
            api_token: "token".to_string(),
            user_email: "ops@example.com".to_string(),
            dashboard_origin: None,
            request_timeout_secs: 0,
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}

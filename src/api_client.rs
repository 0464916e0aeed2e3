use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CoverType, PolicyType};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, ORIGIN, REFERER};
use serde_json::Value;
use std::time::Duration;

/// Client for the issuance platform's REST API.
///
/// Every method returns the raw JSON body; shaping it for display is the
/// normalizers' job. A non-2xx status or a transport failure is the only
/// error raised.
#[derive(Clone)]
pub struct AscApiClient {
    client: reqwest::Client,
    base_url: String,
    user_email: String,
}

impl AscApiClient {
    /// Creates a new `AscApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API base URL, e.g. `https://host/api/v1`.
    /// * `token` - Bearer token sent on every request.
    /// * `user_email` - Email used for the wallet lookup.
    /// * `origin` - Optional dashboard origin sent as `Origin` and `Referer`.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: String,
        token: &str,
        user_email: String,
        origin: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::InternalError(format!("Invalid API token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        if let Some(origin) = origin {
            let value = HeaderValue::from_str(origin)
                .map_err(|e| AppError::InternalError(format!("Invalid dashboard origin: {}", e)))?;
            headers.insert(ORIGIN, value.clone());
            let referer = HeaderValue::from_str(&format!("{}/", origin.trim_end_matches('/')))
                .unwrap_or(value);
            headers.insert(REFERER, referer);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create API client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_email,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.api_base_url.clone(),
            &config.api_token,
            config.user_email.clone(),
            config.dashboard_origin.as_deref(),
            config.request_timeout(),
        )
    }

    /// Builds the URL for `path` with URL-encoded query parameters.
    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Url, AppError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if params.is_empty() {
            reqwest::Url::parse(&raw)
        } else {
            reqwest::Url::parse_with_params(&raw, params)
        };
        url.map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = self.url(path, params)?;
        tracing::info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("API request failed: {}", e)))?;

        Self::read_body(path, response).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let url = self.url(path, &[])?;
        tracing::info!("PUT {}", url);

        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("API request failed: {}", e)))?;

        Self::read_body(path, response).await
    }

    /// Checks the status and parses the body. A 2xx body that is not JSON reads as `null`.
    async fn read_body(path: &str, response: reqwest::Response) -> Result<Value, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("API {} returned {}: {}", path, status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "API error: {}",
                status.as_u16()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Failed to read response: {}", e)))?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("API {} returned a non-JSON body: {}", path, e);
                Ok(Value::Null)
            }
        }
    }

    /// Payment history, one page.
    pub async fn fetch_payments(&self, page: u32) -> Result<Value, AppError> {
        let page = page.max(1).to_string();
        self.get_json("/issuance/user-specific-payments/", &[("page", page.as_str())])
            .await
    }

    /// Cover plans assigned to the operator.
    pub async fn fetch_assign_plans(&self) -> Result<Value, AppError> {
        self.get_json("/issuance/assign-plan/", &[]).await
    }

    /// Policy counts by trip status for one cover type.
    pub async fn fetch_trip_status(&self, cover_type: CoverType) -> Result<Value, AppError> {
        self.get_json("/dashboard/trip-status/", &[("cover_type", cover_type.as_str())])
            .await
    }

    /// Wallet balance of the configured user.
    pub async fn fetch_wallet(&self) -> Result<Value, AppError> {
        self.get_json("/asc-wallet/user-wallet/", &[("email", self.user_email.as_str())])
            .await
    }

    /// Wallet transaction history, one page.
    pub async fn fetch_wallet_transactions(&self, page: u32) -> Result<Value, AppError> {
        let page = page.max(1).to_string();
        self.get_json("/asc-wallet/user-wallet/transactions/", &[("page", page.as_str())])
            .await
    }

    /// Covers the operator may issue for a policy type.
    pub async fn fetch_cover_plan_access(&self, policy_type: PolicyType) -> Result<Value, AppError> {
        self.get_json(
            "/issuance/user-cover-plan-access/",
            &[("policy_type", policy_type.as_str())],
        )
        .await
    }

    /// Flat pricing list for one cover.
    pub async fn fetch_cover_pricing(&self, cover_id: i64) -> Result<Value, AppError> {
        self.get_json(
            &format!("/cover-api/customize-covers/{}/pricing/issuance/", cover_id),
            &[],
        )
        .await
    }

    /// Generated quote links, one page.
    pub async fn fetch_quote_links(&self, page: u32) -> Result<Value, AppError> {
        let page = page.max(1).to_string();
        self.get_json("/generate-quote/quotes/create/", &[("page", page.as_str())])
            .await
    }

    pub async fn fetch_operator(&self) -> Result<Value, AppError> {
        self.get_json("/operator/operator/", &[]).await
    }

    /// Replaces the operator record with `record`.
    pub async fn update_operator(&self, record: &Value) -> Result<Value, AppError> {
        let result = self.put_json("/operator/operator/", record).await?;
        tracing::info!("✓ Operator details updated");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> AscApiClient {
        AscApiClient::new(
            base_url.to_string(),
            "token",
            "ops@example.com".to_string(),
            Some("https://dashboard.example.com"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = AscApiClient::new(
            "https://example.com/api/v1".to_string(),
            "token",
            "ops@example.com".to_string(),
            None,
            Duration::from_secs(30),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let client = AscApiClient::new(
            "https://example.com".to_string(),
            "bad\ntoken",
            "ops@example.com".to_string(),
            None,
            Duration::from_secs(30),
        );
        assert!(client.is_err());
    }

    #[test]
    fn test_url_encodes_query_values() {
        let url = client("https://example.com/api/v1/")
            .url("/asc-wallet/user-wallet/", &[("email", "ops+1@example.com")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/v1/asc-wallet/user-wallet/?email=ops%2B1%40example.com"
        );
    }

    #[test]
    fn test_url_without_params_keeps_trailing_slash() {
        let url = client("https://example.com/api/v1")
            .url("/operator/operator/", &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/operator/operator/");
    }
}

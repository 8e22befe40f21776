//! HTTP client wrapper for the Upstox v2 API.
//!
//! Every request is issued exactly once. Order placement is not idempotent,
//! so the client never retries; reconciliation happens at the engine level
//! through status checks on the next monitor cycle.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::UpstoxConfig;
use super::error::UpstoxError;

/// HTTP client for the Upstox API.
#[derive(Debug, Clone)]
pub struct UpstoxHttpClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl UpstoxHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns error if the access token is empty or the client cannot be
    /// built.
    pub fn new(config: &UpstoxConfig) -> Result<Self, UpstoxError> {
        if config.access_token.is_empty() {
            return Err(UpstoxError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstoxError::Network(e.to_string()))?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, UpstoxError> {
        let url = format!("{}{path_and_query}", self.base_url);
        let request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .bearer_auth(&self.access_token);

        Self::execute(request).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstoxError> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .bearer_auth(&self.access_token)
            .json(body);

        Self::execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstoxError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstoxError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstoxError::Network(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(UpstoxError::AuthenticationFailed);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstoxError::Network("rate limited by broker".to_string()));
        }

        // A 5xx leaves the request outcome unknown; only 4xx responses are
        // definitive refusals.
        if status.is_server_error() {
            return Err(UpstoxError::Network(format!(
                "server error {}: {}",
                status.as_u16(),
                extract_error_message(&text)
            )));
        }

        if !status.is_success() {
            let message = extract_error_message(&text);
            return Err(UpstoxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstoxError::JsonParse(e.to_string()))
    }
}

/// Pull the most specific message out of an error body, falling back to the
/// raw text when the body is not the expected envelope.
fn extract_error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        #[serde(default)]
        errors: Option<Vec<ErrorEntry>>,
        #[serde(default)]
        message: Option<String>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorEntry {
        #[serde(default)]
        message: Option<String>,
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(errors) = envelope.errors
            && let Some(first) = errors.into_iter().next()
            && let Some(message) = first.message
        {
            return message;
        }
        if let Some(message) = envelope.message {
            return message;
        }
    }

    if body.is_empty() {
        "empty error response".to_string()
    } else {
        body.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn client_rejects_empty_token() {
        let config = UpstoxConfig::new("");
        assert!(matches!(
            UpstoxHttpClient::new(&config),
            Err(UpstoxError::AuthenticationFailed)
        ));
    }

    #[test]
    fn client_builds_with_token() {
        let config = UpstoxConfig::new("token").with_timeout(Duration::from_secs(5));
        assert!(UpstoxHttpClient::new(&config).is_ok());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let config = UpstoxConfig::new("token").with_base_url("http://localhost:1234/");
        let client = UpstoxHttpClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn extract_error_message_prefers_errors_array() {
        let body = r#"{"status":"error","message":"top","errors":[{"message":"specific"}]}"#;
        assert_eq!(extract_error_message(body), "specific");
    }

    #[test]
    fn extract_error_message_falls_back_to_message() {
        let body = r#"{"status":"error","message":"top"}"#;
        assert_eq!(extract_error_message(body), "top");
    }

    #[test]
    fn extract_error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
        assert_eq!(extract_error_message(""), "empty error response");
    }
}

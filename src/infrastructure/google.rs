//! Google ID token verification against the tokeninfo endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::verifier::{GoogleProfile, IdTokenVerifier};
use crate::error::AppError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifies Google ID tokens by asking Google's tokeninfo endpoint and
/// checking the `aud` claim against the configured client id.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    client_id: String,
    endpoint: String,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            client_id,
            endpoint: TOKENINFO_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(client_id: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            endpoint,
        }
    }
}

#[derive(Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    name: Option<String>,
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Google tokeninfo request failed");
                AppError::internal("Google token verification failed", json!({}))
            })?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized(
                "Invalid Google token",
                json!({ "reason": "Token rejected by Google" }),
            ));
        }

        let info: TokenInfo = response.json().await.map_err(|_| {
            AppError::unauthorized(
                "Invalid Google token",
                json!({ "reason": "Malformed tokeninfo response" }),
            )
        })?;

        if info.aud != self.client_id {
            return Err(AppError::unauthorized(
                "Invalid Google token",
                json!({ "reason": "Audience mismatch" }),
            ));
        }

        let name = info.name.unwrap_or_else(|| {
            info.email.split('@').next().unwrap_or("user").to_string()
        });

        Ok(GoogleProfile {
            subject: info.sub,
            email: info.email,
            name,
        })
    }
}

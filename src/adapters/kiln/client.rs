use std::{fmt, time::Duration};

use error_stack::{report, ResultExt};
use tracing::instrument;

use crate::config::kiln_config::KilnConfig;
use crate::ports::staking_api::{ApiResponse, StakingApi, StakingApiError};

/// Kiln REST API client authenticated with a bearer token.
pub struct KilnClient {
    http: reqwest::Client,
    token: String,
}

impl fmt::Debug for KilnClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KilnClient")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl KilnClient {
    pub fn new(
        config: &KilnConfig,
        token: String,
    ) -> error_stack::Result<Self, StakingApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .change_context(StakingApiError::ClientBuild)?;

        Ok(KilnClient { http, token })
    }

    #[instrument(name = "KilnClient::from_config", skip(config))]
    pub async fn from_config(config: &KilnConfig) -> error_stack::Result<Self, StakingApiError> {
        let token = read_token(&config.token_path).await?;
        Self::new(config, token)
    }
}

/// Reads the bearer token from a plain text file, surrounding whitespace removed.
pub async fn read_token(path: &str) -> error_stack::Result<String, StakingApiError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .change_context(StakingApiError::TokenUnavailable)
        .attach_printable_lazy(|| format!("Could not read token file '{}'", path))?;

    let token = contents.trim();
    if token.is_empty() {
        return Err(report!(StakingApiError::TokenUnavailable))
            .attach_printable_lazy(|| format!("Token file '{}' is empty", path));
    }

    Ok(token.to_owned())
}

#[async_trait::async_trait]
impl StakingApi for KilnClient {
    #[instrument(skip(self))]
    async fn get(&self, route: &str) -> error_stack::Result<ApiResponse, StakingApiError> {
        let response = self
            .http
            .get(route)
            .bearer_auth(&self.token)
            .send()
            .await
            .change_context(StakingApiError::RequestFailed)
            .attach_printable_lazy(|| format!("GET {}", route))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .change_context(StakingApiError::RequestFailed)
            .attach_printable_lazy(|| format!("Failed to read body of GET {}", route))?;

        tracing::debug!(status, "Kiln answered");

        Ok(ApiResponse { status, body })
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StakingApiError {
    #[error("Failed to build the staking API client")]
    ClientBuild,
    #[error("Failed to read the staking API token")]
    TokenUnavailable,
    #[error("Request to the staking API failed")]
    RequestFailed,
}

/// Raw answer of the staking API; status handling is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[async_trait::async_trait]
pub trait StakingApi: Send + Sync {
    /// Issues an authenticated GET on a fully built route.
    ///
    /// Non-200 statuses are not errors at this level; only transport failures are.
    async fn get(&self, route: &str) -> error_stack::Result<ApiResponse, StakingApiError>;
}

/// Upper bound of addresses per stakes request accepted by the API.
pub const MAX_BATCH_SIZE: usize = 80;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct KilnConfig {
    #[serde(default = "default_api_url")]
    pub api_url: Box<str>,
    /// Plain text file holding the bearer token.
    pub token_path: Box<str>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> Box<str> {
    "https://api.kiln.fi/v1".into()
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl KilnConfig {
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }
}

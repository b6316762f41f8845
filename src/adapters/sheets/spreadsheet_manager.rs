use error_stack::ResultExt;
use google_sheets4::{
    api::{BatchUpdateValuesRequest, ValueRange},
    Sheets,
};
use std::fmt::Debug;
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    auth,
    http_client::{self, HttpsConnector},
};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate with the service account")]
    Authentication,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write ranges")]
    FailedToWriteRanges,
}

/// Cells are stored exactly as sent: balances stay digit-exact text and flags stay `True`/`False`.
pub const VALUE_INPUT_OPTION: &str = "RAW";

pub fn batch_update_request(value_ranges: Vec<ValueRange>) -> BatchUpdateValuesRequest {
    BatchUpdateValuesRequest {
        data: Some(value_ranges),
        value_input_option: Some(VALUE_INPUT_OPTION.to_string()),
        ..Default::default()
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone()).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    #[instrument]
    pub async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1)
    }

    /// Writes every value range in a single `values:batchUpdate` request.
    #[instrument(skip(value_ranges), fields(count = value_ranges.len()))]
    pub async fn batch_write_ranges(
        &self,
        value_ranges: Vec<ValueRange>,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_batch_update(batch_update_request(value_ranges), &self.config.spreadsheet_id)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRanges)
    }
}

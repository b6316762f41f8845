use std::{fmt, sync::Arc};

use error_stack::ResultExt;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{kiln_config::KilnConfig, sheets_config::SpreadsheetConfig};
use crate::domain::{
    address_record::ProtocolGroup, call_type::CallType, date_range::DateRange,
    sheets::cell_position::CellPosition, update::UpdateMap,
};
use crate::ports::{
    report_sheet::ReportSheet,
    routine::{Routine, RoutineError},
    staking_api::StakingApi,
};

use super::{
    decimal_annotator::build_decimal_annotations,
    fetcher::StakingFetcher,
    input_reader::{group_by_protocol, read_address_records},
    sheet_writer::build_cell_updates,
};

#[derive(Error, Debug)]
enum StakingReportRoutineError {
    #[error("failed to execute spreadsheet operation")]
    SpreadsheetError,
}

/// Refreshes the data sheet: stakes first, then rewards over the overview period, then the
/// decimal scale of every row.
pub struct StakingReportRoutine {
    sheet: Arc<dyn ReportSheet>,
    api: Arc<dyn StakingApi>,
    sheets_config: SpreadsheetConfig,
    kiln_config: KilnConfig,
}

impl fmt::Debug for StakingReportRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StakingReportRoutine")
            .field("data_sheet", &self.sheets_config.data_sheet)
            .field("api_url", &self.kiln_config.api_url)
            .finish_non_exhaustive()
    }
}

impl StakingReportRoutine {
    pub fn new(
        sheet: Arc<dyn ReportSheet>,
        api: Arc<dyn StakingApi>,
        sheets_config: SpreadsheetConfig,
        kiln_config: KilnConfig,
    ) -> Self {
        Self {
            sheet,
            api,
            sheets_config,
            kiln_config,
        }
    }

    fn fetcher(&self) -> StakingFetcher<'_> {
        StakingFetcher::new(self.api.as_ref(), &self.kiln_config)
    }

    async fn read_data_rows(
        &self,
    ) -> error_stack::Result<Vec<Vec<String>>, StakingReportRoutineError> {
        self.sheet
            .read_rows(&self.sheets_config.data_sheet)
            .await
            .change_context(StakingReportRoutineError::SpreadsheetError)
    }

    #[instrument(skip(self))]
    async fn read_groups(&self) -> error_stack::Result<ProtocolGroup, StakingReportRoutineError> {
        let rows = self.read_data_rows().await?;
        Ok(group_by_protocol(read_address_records(&rows)))
    }

    async fn read_date_cell(
        &self,
        position: &CellPosition,
    ) -> error_stack::Result<Option<String>, StakingReportRoutineError> {
        self.sheet
            .read_cell(&self.sheets_config.overview_sheet, position)
            .await
            .change_context(StakingReportRoutineError::SpreadsheetError)
            .attach_printable_lazy(|| format!("Failed to read date cell {}", position))
    }

    /// `None` when either date is missing from the overview sheet.
    #[instrument(skip(self))]
    async fn read_date_range(
        &self,
    ) -> error_stack::Result<Option<DateRange>, StakingReportRoutineError> {
        let start_date = self
            .read_date_cell(&self.sheets_config.start_date_cell)
            .await?;
        let end_date = self.read_date_cell(&self.sheets_config.end_date_cell).await?;

        let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
            return Ok(None);
        };

        let date_range = DateRange::new(start_date.trim(), end_date.trim());
        if !date_range.is_well_formed() {
            warn!(
                start_date = %date_range.start_date,
                end_date = %date_range.end_date,
                "Reward dates are not a valid YYYY-MM-DD range, sending them as they are"
            );
        }

        Ok(Some(date_range))
    }

    /// Writes the collected updates in one batch, against a fresh read of the data sheet so that
    /// rows moved during the run land on the right cells.
    #[instrument(skip(self, updates), fields(addresses = updates.len()))]
    async fn write_updates(
        &self,
        call_type: CallType,
        updates: &UpdateMap,
    ) -> error_stack::Result<(), StakingReportRoutineError> {
        if updates.is_empty() {
            info!("No {} updates to write", call_type);
            return Ok(());
        }

        let rows = self.read_data_rows().await?;
        let cells = build_cell_updates(&self.sheets_config.data_sheet, call_type, &rows, updates);

        debug!(cells = cells.len(), "Writing {} updates", call_type);
        self.sheet
            .write_cells(&cells)
            .await
            .change_context(StakingReportRoutineError::SpreadsheetError)
    }

    #[instrument(skip(self))]
    async fn update_stakes(&self) -> error_stack::Result<(), StakingReportRoutineError> {
        info!("Staking: 📋 Listing all addresses in the data sheet");
        let groups = self.read_groups().await?;

        info!("Staking: ☁️  Getting stakes from Kiln");
        let updates = self.fetcher().fetch_stakes(&groups).await;

        info!("Staking: 📝 Updating custody flags and balances");
        self.write_updates(CallType::Stakes, &updates).await
    }

    #[instrument(skip(self))]
    async fn update_rewards(
        &self,
        date_range: &DateRange,
    ) -> error_stack::Result<(), StakingReportRoutineError> {
        info!("Rewards: 📋 Listing all addresses in the data sheet");
        let groups = self.read_groups().await?;

        info!(
            "Rewards: ☁️  Getting rewards from {} to {}",
            date_range.start_date,
            date_range.end_date
        );
        let updates = self.fetcher().fetch_rewards(&groups, date_range).await;

        info!("Rewards: 📝 Updating rewards");
        self.write_updates(CallType::Rewards, &updates).await
    }

    #[instrument(skip(self))]
    async fn annotate_decimal_scales(&self) -> error_stack::Result<(), StakingReportRoutineError> {
        let rows = self.read_data_rows().await?;
        let cells = build_decimal_annotations(&self.sheets_config.data_sheet, &rows);

        if cells.is_empty() {
            info!("No rows to annotate with a decimal scale");
            return Ok(());
        }

        self.sheet
            .write_cells(&cells)
            .await
            .change_context(StakingReportRoutineError::SpreadsheetError)
    }
}

#[async_trait::async_trait]
impl Routine for StakingReportRoutine {
    fn name(&self) -> &str {
        "StakingReportRoutine"
    }

    #[instrument(skip(self), name = "StakingReportRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        info!("Running StakingReportRoutine");

        self.update_stakes()
            .await
            .change_context(RoutineError::routine_failure("Failed to update stakes"))?;

        let date_range = self
            .read_date_range()
            .await
            .change_context(RoutineError::routine_failure(
                "Failed to read the reward dates from the overview sheet",
            ))?;

        match date_range {
            Some(date_range) => self
                .update_rewards(&date_range)
                .await
                .change_context(RoutineError::routine_failure("Failed to update rewards"))?,
            None => error!(
                "Start date or end date is missing in the {} sheet, skipping rewards",
                self.sheets_config.overview_sheet
            ),
        }

        info!("Decimals: 📝 Annotating decimal scales");
        self.annotate_decimal_scales()
            .await
            .change_context(RoutineError::routine_failure(
                "Failed to annotate decimal scales",
            ))?;

        info!("Staking: ✅ Updated the data sheet");

        Ok(())
    }
}

use error_stack::ResultExt;
use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::{whole_sheet, ToA1Notation},
    cell_position::CellPosition,
    cell_update::CellUpdate,
};
use crate::ports::report_sheet::{ReportSheet, ReportSheetError};

use super::{
    spreadsheet_manager::SpreadsheetManager, text_rows::IntoTextRows,
    value_range_factory::ValueRangeFactory,
};

#[async_trait::async_trait]
impl ReportSheet for SpreadsheetManager {
    #[instrument(skip(self))]
    async fn read_rows(
        &self,
        sheet_name: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, ReportSheetError> {
        let value_range = self
            .read_range(&whole_sheet(sheet_name))
            .await
            .change_context_lazy(|| ReportSheetError::ReadFailed(sheet_name.to_owned()))?;

        // An empty sheet comes back without `values`
        Ok(value_range.values.unwrap_or_default().into_text_rows())
    }

    #[instrument(skip(self))]
    async fn read_cell(
        &self,
        sheet_name: &str,
        position: &CellPosition,
    ) -> error_stack::Result<Option<String>, ReportSheetError> {
        let value_range = self
            .read_range(&position.to_a1_notation(Some(sheet_name)))
            .await
            .change_context_lazy(|| ReportSheetError::ReadFailed(sheet_name.to_owned()))?;

        Ok(value_range
            .values
            .unwrap_or_default()
            .into_text_rows()
            .into_iter()
            .flatten()
            .next()
            .filter(|value| !value.trim().is_empty()))
    }

    #[instrument(skip(self, updates), fields(count = updates.len()))]
    async fn write_cells(&self, updates: &[CellUpdate]) -> error_stack::Result<(), ReportSheetError> {
        if updates.is_empty() {
            return Ok(());
        }

        let value_ranges = updates
            .iter()
            .map(ValueRange::from_cell_update)
            .collect::<Vec<_>>();

        self.batch_write_ranges(value_ranges)
            .await
            .change_context(ReportSheetError::WriteFailed)
    }
}

use thiserror::Error;

use crate::domain::sheets::{cell_position::CellPosition, cell_update::CellUpdate};

#[derive(Error, Debug)]
pub enum ReportSheetError {
    #[error("Failed to read sheet '{0}'")]
    ReadFailed(String),
    #[error("Failed to write cells")]
    WriteFailed,
}

/// The spreadsheet as seen by the report: whole-sheet reads and batched cell writes.
#[async_trait::async_trait]
pub trait ReportSheet: Send + Sync {
    /// Every row of the sheet, header included, as displayed text.
    async fn read_rows(
        &self,
        sheet_name: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, ReportSheetError>;

    /// `None` when the cell is empty.
    async fn read_cell(
        &self,
        sheet_name: &str,
        position: &CellPosition,
    ) -> error_stack::Result<Option<String>, ReportSheetError>;

    /// Writes all updates in one request.
    async fn write_cells(&self, updates: &[CellUpdate]) -> error_stack::Result<(), ReportSheetError>;
}

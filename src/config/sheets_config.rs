use crate::domain::sheets::{cell_position::CellPosition, column::Column, row::Row};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account key file.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    /// Sheet holding one row per tracked address.
    pub data_sheet: Box<str>,
    #[serde(default = "default_overview_sheet")]
    pub overview_sheet: Box<str>,
    #[serde(default = "default_start_date_cell")]
    pub start_date_cell: CellPosition,
    #[serde(default = "default_end_date_cell")]
    pub end_date_cell: CellPosition,
}

fn default_overview_sheet() -> Box<str> {
    "Overview".into()
}

fn default_start_date_cell() -> CellPosition {
    CellPosition::new(Column::from_number(5), Row::from_row(2)) // E2
}

fn default_end_date_cell() -> CellPosition {
    CellPosition::new(Column::from_number(5), Row::from_row(3)) // E3
}

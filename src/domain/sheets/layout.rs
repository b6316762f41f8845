// The data sheet columns are hardcoded; only sheet names and cells of the overview come from the config

pub mod data_sheet {
    use crate::domain::sheets::column::Column;

    pub const HEADER_ROWS: usize = 1;

    pub const RO_IDENTIFIER: Column = Column::from_number(2); // B
    pub const RO_ADDRESS: Column = Column::from_number(3); // C
    pub const RW_CUSTODY_FLAG: Column = Column::from_number(4); // D
    pub const RW_REWARDS: Column = Column::from_number(5); // E
    pub const RW_DECIMAL_SCALE: Column = Column::from_number(6); // F
    pub const RW_BALANCE: Column = Column::from_number(8); // H
}

/// Reads a cell out of a row returned by the Sheets API, which omits trailing empty cells.
pub fn cell_text(row: &[String], column: crate::domain::sheets::column::Column) -> &str {
    row.get(column.offset()).map(String::as_str).unwrap_or("")
}

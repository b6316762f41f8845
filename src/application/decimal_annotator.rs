use crate::domain::{
    decimal_scale::DecimalScale,
    sheets::{
        a1_notation::ToA1Notation,
        cell_position::CellPosition,
        cell_update::{CellUpdate, CellValue},
        layout::{cell_text, data_sheet},
        row::Row,
    },
};

/// Writes the decimal scale of each row's network next to it, so amounts can be converted in
/// the sheet. Rows without a known scale are left alone.
pub fn build_decimal_annotations(sheet_name: &str, rows: &[Vec<String>]) -> Vec<CellUpdate> {
    rows.iter()
        .enumerate()
        .skip(data_sheet::HEADER_ROWS)
        .filter_map(|(row_index, row)| {
            let scale = DecimalScale::for_identifier(cell_text(row, data_sheet::RO_IDENTIFIER))?;
            let position = CellPosition::new(data_sheet::RW_DECIMAL_SCALE, Row::from(row_index));

            Some(CellUpdate::new(
                position.to_a1_notation(Some(sheet_name)),
                CellValue::Number(scale.factor()),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_annotations_per_network() {
        let rows = vec![
            row(&["#", "ethereum header", "Address"]),
            row(&["1", "ethereum_v1", "0xa"]),
            row(&["2", "near_pool", "pool.near"]),
            row(&["3", "ksm_stash", "stash"]),
            row(&["4", "cosmos_val_del", "val_del"]),
            row(&["5"]),
        ];

        let cells = build_decimal_annotations("Staking", &rows);

        assert_eq!(
            cells,
            vec![
                CellUpdate::new("'Staking'!F2".to_owned().into(), CellValue::Number(1e18)),
                CellUpdate::new("'Staking'!F3".to_owned().into(), CellValue::Number(1e23)),
                CellUpdate::new("'Staking'!F5".to_owned().into(), CellValue::Number(1e6)),
            ]
        );
    }
}

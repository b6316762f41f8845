use crate::domain::{
    call_type::CallType,
    sheets::{
        a1_notation::ToA1Notation,
        cell_position::CellPosition,
        cell_update::{CellUpdate, CellValue},
        column::Column,
        layout::{cell_text, data_sheet},
        row::Row,
    },
    update::{UpdateMap, UpdateRecord},
};

/// Lays the collected updates onto every data row whose address matches.
///
/// Stakes fill the custody flag and balance columns, rewards the reward column.
pub fn build_cell_updates(
    sheet_name: &str,
    call_type: CallType,
    rows: &[Vec<String>],
    updates: &UpdateMap,
) -> Vec<CellUpdate> {
    rows.iter()
        .enumerate()
        .skip(data_sheet::HEADER_ROWS)
        .flat_map(|(row_index, row)| {
            let address = cell_text(row, data_sheet::RO_ADDRESS).trim();
            updates
                .get(address)
                .map(|record| row_updates(sheet_name, call_type, Row::from(row_index), record))
                .unwrap_or_default()
        })
        .collect()
}

fn row_updates(
    sheet_name: &str,
    call_type: CallType,
    row: Row,
    record: &UpdateRecord,
) -> Vec<CellUpdate> {
    let cell = |column: Column| CellPosition::new(column, row).to_a1_notation(Some(sheet_name));

    match call_type {
        CallType::Stakes => record
            .stake
            .as_ref()
            .map(|stake| {
                vec![
                    CellUpdate::new(
                        cell(data_sheet::RW_CUSTODY_FLAG),
                        stake.custody.cell_value(),
                    ),
                    CellUpdate::new(cell(data_sheet::RW_BALANCE), stake.balance_cell_value()),
                ]
            })
            .unwrap_or_default(),
        CallType::Rewards => record
            .rewards
            .map(|rewards| {
                vec![CellUpdate::new(
                    cell(data_sheet::RW_REWARDS),
                    CellValue::Integer(rewards.cell_value()),
                )]
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::update::{CustodyFlag, Rewards, StakeSnapshot};

    fn rows() -> Vec<Vec<String>> {
        [
            vec!["#", "ID", "Address"],
            vec!["1", "eth_a", "0xa"],
            vec!["2", "eth_b", "0xb"],
            vec!["3", "eth_a_again", "0xa"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(str::to_owned).collect())
        .collect()
    }

    fn ranges(updates: &[CellUpdate]) -> Vec<&str> {
        updates.iter().map(|update| update.range.as_ref()).collect()
    }

    #[test]
    fn test_stakes_write_custody_and_balance() {
        let mut updates = UpdateMap::new();
        updates.record_stake(
            "0xb",
            StakeSnapshot {
                custody: CustodyFlag::Reported(true),
                balance: Some("32".to_owned()),
            },
        );

        let cells = build_cell_updates("Staking", CallType::Stakes, &rows(), &updates);

        assert_eq!(
            cells,
            vec![
                CellUpdate::new("'Staking'!D3".to_owned().into(), "True"),
                CellUpdate::new("'Staking'!H3".to_owned().into(), "32"),
            ]
        );
    }

    #[test]
    fn test_every_matching_row_is_written() {
        let mut updates = UpdateMap::new();
        updates.record_stake("0xa", StakeSnapshot::no_response());

        let cells = build_cell_updates("Staking", CallType::Stakes, &rows(), &updates);

        assert_eq!(
            ranges(&cells),
            vec!["'Staking'!D2", "'Staking'!H2", "'Staking'!D4", "'Staking'!H4"]
        );
        assert!(cells
            .iter()
            .all(|cell| cell.value == CellValue::Text("noresponseTrue".to_owned())));
    }

    #[test]
    fn test_rewards_write_reward_column_only() {
        let mut updates = UpdateMap::new();
        updates.record_rewards("0xb", Rewards::NoResponse);
        updates.record_stake("0xa", StakeSnapshot::no_response());

        let cells = build_cell_updates("Staking", CallType::Rewards, &rows(), &updates);

        assert_eq!(
            cells,
            vec![CellUpdate::new(
                "'Staking'!E3".to_owned().into(),
                CellValue::Integer(-1)
            )]
        );
    }

    #[test]
    fn test_no_updates_no_cells() {
        let cells = build_cell_updates("Staking", CallType::Stakes, &rows(), &UpdateMap::new());
        assert!(cells.is_empty());
    }
}

use std::{collections::HashMap, sync::Arc, sync::Mutex};

use error_stack::report;
use staking_report::{
    application::staking_report_routine::StakingReportRoutine,
    config::{kiln_config::KilnConfig, sheets_config::SpreadsheetConfig},
    domain::sheets::{
        cell_position::CellPosition,
        cell_update::{CellUpdate, CellValue},
    },
    ports::{
        report_sheet::{ReportSheet, ReportSheetError},
        routine::Routine,
        staking_api::{ApiResponse, StakingApi, StakingApiError},
    },
};

const DATA_SHEET: &str = "Staking";
const OVERVIEW_SHEET: &str = "Overview";

/// In-memory spreadsheet recording every batch written to it.
struct FakeSheet {
    rows: Vec<Vec<String>>,
    /// `None` makes every overview read fail.
    overview: Option<HashMap<String, String>>,
    writes: Mutex<Vec<Vec<CellUpdate>>>,
}

impl FakeSheet {
    fn new(rows: &[&[&str]], overview: Option<&[(&str, &str)]>) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
            overview: overview.map(|cells| {
                cells
                    .iter()
                    .map(|(cell, value)| (cell.to_string(), value.to_string()))
                    .collect()
            }),
            writes: Mutex::new(Vec::new()),
        }
    }

    fn writes(&self) -> Vec<Vec<CellUpdate>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReportSheet for FakeSheet {
    async fn read_rows(
        &self,
        sheet_name: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, ReportSheetError> {
        if sheet_name != DATA_SHEET {
            return Err(report!(ReportSheetError::ReadFailed(sheet_name.to_owned())));
        }
        Ok(self.rows.clone())
    }

    async fn read_cell(
        &self,
        sheet_name: &str,
        position: &CellPosition,
    ) -> error_stack::Result<Option<String>, ReportSheetError> {
        match (&self.overview, sheet_name) {
            (Some(cells), OVERVIEW_SHEET) => Ok(cells.get(&position.to_string()).cloned()),
            _ => Err(report!(ReportSheetError::ReadFailed(sheet_name.to_owned()))),
        }
    }

    async fn write_cells(&self, updates: &[CellUpdate]) -> error_stack::Result<(), ReportSheetError> {
        self.writes.lock().unwrap().push(updates.to_vec());
        Ok(())
    }
}

/// Answers from a url -> (status, body) table, 404 for anything else.
struct FakeApi {
    responses: HashMap<String, (u16, String)>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn new(responses: &[(&str, u16, &str)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(url, status, body)| (url.to_string(), (*status, body.to_string())))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StakingApi for FakeApi {
    async fn get(&self, route: &str) -> error_stack::Result<ApiResponse, StakingApiError> {
        self.calls.lock().unwrap().push(route.to_owned());
        let (status, body) = self
            .responses
            .get(route)
            .cloned()
            .unwrap_or((404, String::new()));
        Ok(ApiResponse { status, body })
    }
}

fn sheets_config() -> SpreadsheetConfig {
    SpreadsheetConfig {
        priv_key: "credentials.json".into(),
        spreadsheet_id: "sheet-id".into(),
        data_sheet: DATA_SHEET.into(),
        overview_sheet: OVERVIEW_SHEET.into(),
        start_date_cell: "E2".parse().unwrap(),
        end_date_cell: "E3".parse().unwrap(),
    }
}

fn kiln_config() -> KilnConfig {
    KilnConfig {
        api_url: "https://api.kiln.fi/v1".into(),
        token_path: "kiln_token.txt".into(),
        batch_size: 80,
        timeout_secs: 30,
    }
}

fn routine(sheet: &Arc<FakeSheet>, api: &Arc<FakeApi>) -> StakingReportRoutine {
    StakingReportRoutine::new(
        Arc::clone(sheet) as Arc<dyn ReportSheet>,
        Arc::clone(api) as Arc<dyn StakingApi>,
        sheets_config(),
        kiln_config(),
    )
}

fn cell(range: &str, value: impl Into<CellValue>) -> CellUpdate {
    CellUpdate::new(range.to_owned().into(), value)
}

const HEADER: &[&str] = &["#", "ID", "Address", "Kiln", "Rewards", "Decimals", "", "Balance"];
const ETH_ROW: &[&str] = &["1", "eth_0x1234", "0x1234"];
const ATOM_ROW: &[&str] = &["2", "atom_val1_del1", "val1_del1"];
const UNKNOWN_ROW: &[&str] = &["3", "bitcoin_x", "bc1"];

const DATES: &[(&str, &str)] = &[("E2", "2024-01-01"), ("E3", "2024-01-31")];

const ETH_STAKES: &str = "https://api.kiln.fi/v1/eth/stakes?validators=0x1234";
const ATOM_STAKES: &str = "https://api.kiln.fi/v1/atom/stakes?validators=val1&delegators=del1";
const ETH_REWARDS: &str =
    "https://api.kiln.fi/v1/eth/rewards?validators=0x1234&start_date=2024-01-01&end_date=2024-01-31";
const ATOM_REWARDS: &str = "https://api.kiln.fi/v1/atom/rewards?validators=val1&delegators=del1&start_date=2024-01-01&end_date=2024-01-31";

#[tokio::test]
async fn test_full_run_writes_stakes_rewards_and_decimals() {
    let sheet = Arc::new(FakeSheet::new(
        &[HEADER, ETH_ROW, ATOM_ROW, UNKNOWN_ROW],
        Some(DATES),
    ));
    let api = Arc::new(FakeApi::new(&[
        (
            ETH_STAKES,
            200,
            r#"{"data":[{"validator_address":"0x1234","is_kiln":true,"balance":"32000000000000000000"}]}"#,
        ),
        (ATOM_STAKES, 200, r#"{"data":[{"balance":"5000000"}]}"#),
        (
            ETH_REWARDS,
            200,
            r#"{"data":[{"rewards":"10"},{"rewards":15}]}"#,
        ),
    ]));

    routine(&sheet, &api).run().await.unwrap();

    assert_eq!(
        api.calls(),
        vec![ETH_STAKES, ATOM_STAKES, ETH_REWARDS, ATOM_REWARDS]
    );
    assert_eq!(
        sheet.writes(),
        vec![
            vec![
                cell("'Staking'!D2", "True"),
                cell("'Staking'!H2", "32000000000000000000"),
                cell("'Staking'!D3", "defaultTrue"),
                cell("'Staking'!H3", "5000000"),
            ],
            vec![
                cell("'Staking'!E2", CellValue::Integer(25)),
                cell("'Staking'!E3", CellValue::Integer(-1)),
            ],
            vec![
                cell("'Staking'!F2", CellValue::Number(1e18)),
                cell("'Staking'!F3", CellValue::Number(1e6)),
            ],
        ]
    );
}

#[tokio::test]
async fn test_failed_stakes_write_sentinels_and_missing_dates_skip_rewards() {
    let sheet = Arc::new(FakeSheet::new(&[HEADER, ETH_ROW], Some(&[("E2", "2024-01-01")])));
    let api = Arc::new(FakeApi::new(&[(ETH_STAKES, 500, "")]));

    routine(&sheet, &api).run().await.unwrap();

    assert_eq!(api.calls(), vec![ETH_STAKES]);
    assert_eq!(
        sheet.writes(),
        vec![
            vec![
                cell("'Staking'!D2", "noresponseTrue"),
                cell("'Staking'!H2", "noresponseTrue"),
            ],
            vec![cell("'Staking'!F2", CellValue::Number(1e18))],
        ]
    );
}

#[tokio::test]
async fn test_empty_responses_write_nothing_but_decimals() {
    let sheet = Arc::new(FakeSheet::new(&[HEADER, ETH_ROW], Some(DATES)));
    let api = Arc::new(FakeApi::new(&[
        (ETH_STAKES, 200, r#"{"data":[]}"#),
        (ETH_REWARDS, 200, r#"{"data":null}"#),
    ]));

    routine(&sheet, &api).run().await.unwrap();

    assert_eq!(api.calls(), vec![ETH_STAKES, ETH_REWARDS]);
    assert_eq!(
        sheet.writes(),
        vec![vec![cell("'Staking'!F2", CellValue::Number(1e18))]]
    );
}

#[tokio::test]
async fn test_unknown_networks_are_never_requested() {
    let sheet = Arc::new(FakeSheet::new(&[HEADER, UNKNOWN_ROW], Some(DATES)));
    let api = Arc::new(FakeApi::new(&[]));
    let routine = routine(&sheet, &api);

    assert_eq!(routine.name(), "StakingReportRoutine");
    routine.run().await.unwrap();

    assert!(api.calls().is_empty());
    assert!(sheet.writes().is_empty());
}

#[tokio::test]
async fn test_unreadable_overview_fails_the_run_after_stakes() {
    let sheet = Arc::new(FakeSheet::new(&[HEADER, ETH_ROW], None));
    let api = Arc::new(FakeApi::new(&[(
        ETH_STAKES,
        200,
        r#"{"data":[{"validator_address":"0x1234","is_kiln":false,"balance":"1"}]}"#,
    )]));

    let result = routine(&sheet, &api).run().await;

    assert!(result.is_err());
    assert_eq!(
        sheet.writes(),
        vec![vec![
            cell("'Staking'!D2", "False"),
            cell("'Staking'!H2", "1"),
        ]]
    );
}

pub mod report_sheet;
pub mod routine;
pub mod staking_api;

pub mod auth;
pub mod http_client;
pub mod report_sheet;
pub mod spreadsheet_manager;
pub mod text_rows;
pub mod value_range_factory;

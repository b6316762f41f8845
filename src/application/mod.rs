pub mod decimal_annotator;
pub mod fetcher;
pub mod input_reader;
pub mod normalizer;
pub mod routes;
pub mod sheet_writer;
pub mod staking_report_routine;

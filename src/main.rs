use std::sync::{Arc, Mutex};

use error_stack::ResultExt;
use thiserror::Error;
use tracing::{error, info, instrument, Instrument, Level};
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use staking_report::{
    adapters::{kiln::client::KilnClient, sheets::spreadsheet_manager::SpreadsheetManager},
    application::staking_report_routine::StakingReportRoutine,
    config::app_config::AppConfig,
    ports::routine::Routine,
};

const LOG_FILE: &str = "staking_report.log";

#[derive(Error, Debug)]
enum AppError {
    #[error("failed to set up logging")]
    Tracing,
    #[error("failed to load the configuration")]
    Config,
    #[error("failed to set up the staking API client")]
    StakingApi,
    #[error("failed to connect to the spreadsheet")]
    Spreadsheet,
    #[error("routine failed")]
    Routine,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> error_stack::Result<(), AppError> {
    setup_tracing()?;
    setup_panic_hook();

    info!("Starting staking report");

    match run().await {
        Ok(()) => {
            info!("✅ Staking report completed");
            Ok(())
        }
        Err(report) => {
            error!("Staking report failed");
            Err(report)
        }
    }
}

#[instrument]
async fn run() -> error_stack::Result<(), AppError> {
    let config = AppConfig::load().change_context(AppError::Config)?;

    let api = KilnClient::from_config(&config.kiln)
        .await
        .change_context(AppError::StakingApi)?;
    let sheet = SpreadsheetManager::new(config.sheets.clone())
        .await
        .change_context(AppError::Spreadsheet)?;

    let routine = StakingReportRoutine::new(
        Arc::new(sheet),
        Arc::new(api),
        config.sheets,
        config.kiln,
    );

    run_routine(&routine).await
}

async fn run_routine(routine: &dyn Routine) -> error_stack::Result<(), AppError> {
    let result = routine
        .run()
        .instrument(tracing::info_span!("routine", routine = routine.name()))
        .await;

    match &result {
        Ok(()) => info!("✅ {}: OK", routine.name()),
        Err(report) => error!("❌ {}: {:?}", routine.name(), report),
    }

    result.change_context(AppError::Routine)
}

fn setup_tracing() -> error_stack::Result<(), AppError> {
    let log_file = std::fs::File::create(LOG_FILE)
        .change_context(AppError::Tracing)
        .attach_printable_lazy(|| format!("Could not create log file '{}'", LOG_FILE))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(Targets::new().with_target("staking_report", Level::INFO));

    let log_file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_filter(Targets::new().with_target("staking_report", Level::TRACE));

    Registry::default()
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()
        .change_context(AppError::Tracing)
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Routine failed: {details}")]
    RoutineFailure { details: String },
}

impl RoutineError {
    pub fn routine_failure<S: Into<String>>(details: S) -> Self {
        RoutineError::RoutineFailure {
            details: details.into(),
        }
    }
}

/// One unit of work run by the binary against the spreadsheet.
#[async_trait::async_trait]
pub trait Routine: Send + Sync {
    /// Label of the routine in spans and result logs.
    fn name(&self) -> &str;

    /// Runs to completion; per-address API failures end up in the sheet, not here.
    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}

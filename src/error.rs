use thiserror::Error;

/// Domain failures of the loading and reshaping pipeline.
///
/// Functions return `anyhow::Result`; callers that need to react to a
/// specific failure can `downcast_ref::<PipelineError>()`.
#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Duplicate {direction} row for station '{station}' on {date}")]
    DuplicateKey {
        date: String,
        station: String,
        direction: String,
    },

    #[error("Invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Passenger count overflow in band {band} for station '{station}' on {date}")]
    CountOverflow {
        date: String,
        station: String,
        band: String,
    },
}

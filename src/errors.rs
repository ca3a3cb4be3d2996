use thiserror::Error;

/// Error type covering the engine's few fallible surfaces.
///
/// The calculations themselves are total functions; errors only arise when
/// constructing inputs (date ranges, percent validation) or when loading a
/// taxonomy table from JSON.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid percent: {0}")]
    InvalidPercent(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

use thiserror::Error;

use crate::data::model::Antibiotic;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Invalid numeric input found while deriving measurements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("non-positive MIC {mic} for {species} / {antibiotic}")]
    NonPositiveMic {
        species: String,
        antibiotic: Antibiotic,
        mic: f64,
    },
    #[error("non-finite MIC for {species} / {antibiotic}")]
    NonFiniteMic {
        species: String,
        antibiotic: Antibiotic,
    },
}

/// Unrecognised enum value or an option that cannot produce a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown antibiotic `{0}`")]
    UnknownAntibiotic(String),
    #[error("chart dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("chart title must not be blank")]
    BlankTitle,
    #[error("wrap width must be at least 1")]
    ZeroWrapWidth,
    #[error("invalid colour `{0}`, expected #rrggbb")]
    InvalidColor(String),
    #[error("no measurements to chart")]
    EmptyData,
    #[error("resistant species `{0}` has no annotation note")]
    MissingAnnotation(String),
}

/// Anything the dataset → chart pipeline can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

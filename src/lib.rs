//! MIC resistance profile: embedded table → long-form measurements →
//! declarative chart spec, plus the viewer state that drives the egui app.

pub mod captions;
pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;

pub use chart::{ChartOptions, ChartSpec, ChartSpecBuilder, Preset, build_chart};
pub use data::dataset::{DatasetBuilder, MIC_TABLE, RESISTANT_SPECIES};
pub use data::model::{Antibiotic, Measurement, Observation};
pub use error::{ConfigError, DomainError, PipelineError};
pub use pipeline::{chart_for, default_chart, measurements_for};

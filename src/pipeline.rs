use log::debug;

use crate::chart::{ChartOptions, ChartSpec, ChartSpecBuilder};
use crate::data::dataset::{DatasetBuilder, embedded_observations};
use crate::data::filter::{self, FilterState};
use crate::data::model::{Measurement, Observation};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Observations → measurements → ChartSpec
// ---------------------------------------------------------------------------

/// Long-form measurements with labels wrapped per `options`.
pub fn measurements_for(
    observations: &[Observation],
    options: &ChartOptions,
) -> Result<Vec<Measurement>, PipelineError> {
    options.validate()?;
    let mut builder = DatasetBuilder::from_observations(observations);
    if let Some(width) = options.wrap_width {
        builder = builder.wrap_width(width)?;
    }
    Ok(builder.build()?)
}

/// Full pipeline over caller-supplied observations. Options are checked
/// before any measurement is derived.
pub fn chart_for(
    observations: &[Observation],
    options: &ChartOptions,
    filters: &FilterState,
) -> Result<ChartSpec, PipelineError> {
    let chart = ChartSpecBuilder::new(options.clone())?;
    let measurements = measurements_for(observations, options)?;
    let visible = filter::apply(&measurements, filters);
    debug!(
        "{} of {} measurements pass the filter",
        visible.len(),
        measurements.len()
    );
    Ok(chart.build(&visible)?)
}

/// The embedded dataset charted with `options`, unfiltered.
pub fn default_chart(options: &ChartOptions) -> Result<ChartSpec, PipelineError> {
    chart_for(&embedded_observations(), options, &FilterState::default())
}

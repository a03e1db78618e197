use std::path::Path;

use anyhow::{Context, Result};
use mic_panda::chart::ChartOptions;
use mic_panda::chart::vega::to_vega_lite;
use mic_panda::data::dataset::embedded_observations;
use mic_panda::data::loader::save_file;
use mic_panda::default_chart;

const TABLE_FILES: [&str; 3] = ["mic_data.parquet", "mic_data.csv", "mic_data.json"];
const CHART_FILE: &str = "mic_chart.vl.json";

fn main() -> Result<()> {
    env_logger::init();

    let observations = embedded_observations();
    for name in TABLE_FILES {
        save_file(Path::new(name), &observations).with_context(|| format!("exporting {name}"))?;
        log::info!("Wrote {} observations to {name}", observations.len());
    }

    let spec = default_chart(&ChartOptions::default()).context("building chart")?;
    let doc = serde_json::to_string_pretty(&to_vega_lite(&spec)).context("serializing chart")?;
    std::fs::write(CHART_FILE, doc).with_context(|| format!("writing {CHART_FILE}"))?;

    println!(
        "Wrote {} species to {} and the chart to {CHART_FILE}",
        observations.len(),
        TABLE_FILES.join(", ")
    );
    Ok(())
}

use crate::chart::vega::to_vega_lite;
use crate::chart::{ChartOptions, ChartSpec, Preset};
use crate::data::dataset::embedded_observations;
use crate::data::filter::FilterState;
use crate::data::model::{Antibiotic, Observation};
use crate::pipeline::chart_for;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Wide table currently charted (embedded until a file is opened).
    pub observations: Vec<Observation>,

    /// Where `observations` came from, shown in the top bar.
    pub source: String,

    /// Last preset picked; options may have been edited since.
    pub preset: Preset,

    /// Options fed to the chart builder.
    pub options: ChartOptions,

    /// Antibiotic / resistant-only selection.
    pub filters: FilterState,

    /// Spec for the current inputs (None if the pipeline failed).
    pub spec: Option<ChartSpec>,

    /// Show the long-form table instead of the chart.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = Self {
            observations: embedded_observations(),
            source: "embedded table".to_string(),
            preset: Preset::default(),
            options: Preset::default().options(),
            filters: FilterState::default(),
            spec: None,
            show_table: false,
            status_message: None,
        };
        state.rebuild();
        state
    }
}

impl AppState {
    /// Recompute the chart after any input change.
    pub fn rebuild(&mut self) {
        match chart_for(&self.observations, &self.options, &self.filters) {
            Ok(spec) => {
                self.spec = Some(spec);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Chart rebuild failed: {e}");
                self.spec = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table.
    pub fn set_observations(&mut self, observations: Vec<Observation>, source: String) {
        self.observations = observations;
        self.source = source;
        self.rebuild();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.options = preset.options();
        self.rebuild();
    }

    pub fn toggle_antibiotic(&mut self, antibiotic: Antibiotic) {
        self.filters.toggle(antibiotic);
        self.rebuild();
    }

    pub fn set_resistant_only(&mut self, on: bool) {
        self.filters.resistant_only = on;
        self.rebuild();
    }

    /// Pretty Vega-Lite document for the current spec.
    pub fn vega_lite_json(&self) -> Option<String> {
        let spec = self.spec.as_ref()?;
        serde_json::to_string_pretty(&to_vega_lite(spec)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_classic_chart() {
        let state = AppState::default();
        let spec = state.spec.as_ref().unwrap();
        assert_eq!(spec.bar_layer().unwrap().rows.len(), 48);
        assert!(state.status_message.is_none());
        assert!(state.vega_lite_json().unwrap().contains("vega-lite/v5"));
    }

    #[test]
    fn filtering_everything_reports_empty_data() {
        let mut state = AppState::default();
        for a in Antibiotic::ALL {
            state.toggle_antibiotic(a);
        }
        assert!(state.spec.is_none());
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error: no measurements to chart")
        );
        state.toggle_antibiotic(Antibiotic::Neomycin);
        assert_eq!(state.spec.unwrap().bar_layer().unwrap().rows.len(), 16);
    }

    #[test]
    fn bad_table_surfaces_domain_error() {
        let mut state = AppState::default();
        state.set_observations(
            vec![Observation::new("Broken", 0.0, 1.0, 1.0)],
            "broken.csv".into(),
        );
        assert!(state.spec.is_none());
        assert!(state.status_message.unwrap().contains("non-positive MIC"));
    }

    #[test]
    fn preset_switch_replaces_options() {
        let mut state = AppState::default();
        state.apply_preset(Preset::Minimal);
        let spec = state.spec.as_ref().unwrap();
        assert!(spec.rule_layer().is_some());
        assert!(spec.text_layer().is_none());

        state.set_resistant_only(true);
        assert_eq!(state.spec.unwrap().bar_layer().unwrap().rows.len(), 9);
    }
}

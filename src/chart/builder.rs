use log::debug;

use super::annotations::note_for;
use super::options::ChartOptions;
use super::spec::*;
use crate::color::{AntibioticPalette, to_hex};
use crate::data::label::wrap_label;
use crate::data::model::Measurement;
use crate::error::ConfigError;

/// MIC at which the reference line is drawn.
pub const THRESHOLD_MIC: f64 = 10.0;

pub const RESISTANT_OPACITY: f64 = 1.0;
pub const OTHER_OPACITY: f64 = 0.3;

// ---------------------------------------------------------------------------
// ChartSpecBuilder – measurements → ChartSpec
// ---------------------------------------------------------------------------

/// Validated options plus the fixed palette.
#[derive(Debug, Clone)]
pub struct ChartSpecBuilder {
    options: ChartOptions,
    palette: AntibioticPalette,
}

/// Build a spec in one call, validating `options` first.
pub fn build_chart(
    measurements: &[Measurement],
    options: &ChartOptions,
) -> Result<ChartSpec, ConfigError> {
    ChartSpecBuilder::new(options.clone())?.build(measurements)
}

impl ChartSpecBuilder {
    /// Fails before anything is built if the options are malformed.
    pub fn new(options: ChartOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            palette: AntibioticPalette,
        })
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn build(&self, measurements: &[Measurement]) -> Result<ChartSpec, ConfigError> {
        if measurements.is_empty() {
            return Err(ConfigError::EmptyData);
        }

        let rows: Vec<BarDatum> = measurements
            .iter()
            .map(|m| BarDatum {
                species: m.species.clone(),
                antibiotic: m.antibiotic,
                mic: m.mic,
                log_mic: m.log_mic,
                resistant: m.resistant,
                label: self.axis_label(&m.display_label),
            })
            .collect();

        let groups = species_by_max_log_mic(&rows);

        let mut layers = vec![Layer::Bar(BarLayer { rows })];
        if self.options.show_annotations {
            layers.push(Layer::Text(annotation_layer(&groups)?));
        }
        if self.options.show_threshold_line {
            layers.push(Layer::Rule(threshold_layer()));
        }

        let spec = ChartSpec {
            title: self.options.title.clone(),
            width: self.options.width,
            height: self.options.height,
            background: self.options.background_color.clone(),
            x: Axis {
                field: FIELD_LOG_MIC.to_string(),
                field_type: FieldType::Quantitative,
                title: "log₁₀(MIC)".to_string(),
                zero: false,
                sort: None,
            },
            y: Axis {
                field: FIELD_LABEL.to_string(),
                field_type: FieldType::Nominal,
                title: "Bacterial Species".to_string(),
                zero: false,
                sort: Some(groups.iter().map(|g| g.label.clone()).collect()),
            },
            color: self.color_scale()?,
            opacity: OpacityRule {
                field: FIELD_RESISTANT,
                when_true: RESISTANT_OPACITY,
                otherwise: OTHER_OPACITY,
            },
            tooltip: vec![
                tooltip(FIELD_SPECIES, "Bacteria", FieldType::Nominal),
                tooltip(FIELD_ANTIBIOTIC, "Antibiotic", FieldType::Nominal),
                tooltip(FIELD_MIC, "MIC", FieldType::Quantitative),
            ],
            layers,
        };

        debug!(
            "Built chart '{}': {} bars, {} species, {} layers",
            spec.title,
            measurements.len(),
            groups.len(),
            spec.layers.len()
        );
        Ok(spec)
    }

    fn axis_label(&self, display_label: &str) -> String {
        match self.options.wrap_width {
            Some(width) => wrap_label(display_label, width),
            None => display_label.to_string(),
        }
    }

    fn color_scale(&self) -> Result<ColorScale, ConfigError> {
        let domain = self.palette.domain();
        let range = domain
            .iter()
            .map(|name| self.palette.color_for_name(name).map(to_hex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ColorScale {
            field: FIELD_ANTIBIOTIC.to_string(),
            title: "Antibiotic".to_string(),
            domain,
            range,
        })
    }
}

fn tooltip(field: &str, title: &str, field_type: FieldType) -> TooltipField {
    TooltipField {
        field: field.to_string(),
        title: title.to_string(),
        field_type,
    }
}

// ---------------------------------------------------------------------------
// Category order
// ---------------------------------------------------------------------------

/// One y-axis row: every bar of a species shares it.
#[derive(Debug, Clone, PartialEq)]
struct SpeciesGroup {
    species: String,
    label: String,
    resistant: bool,
    max_log_mic: f64,
}

/// Species ordered by their largest `log_mic`, descending. Ties keep first
/// appearance.
fn species_by_max_log_mic(rows: &[BarDatum]) -> Vec<SpeciesGroup> {
    let mut groups: Vec<SpeciesGroup> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.species == row.species) {
            Some(g) => g.max_log_mic = g.max_log_mic.max(row.log_mic),
            None => groups.push(SpeciesGroup {
                species: row.species.clone(),
                label: row.label.clone(),
                resistant: row.resistant,
                max_log_mic: row.log_mic,
            }),
        }
    }
    groups.sort_by(|a, b| b.max_log_mic.total_cmp(&a.max_log_mic));
    groups
}

// ---------------------------------------------------------------------------
// Overlay layers
// ---------------------------------------------------------------------------

fn annotation_layer(groups: &[SpeciesGroup]) -> Result<TextLayer, ConfigError> {
    let callouts = groups
        .iter()
        .filter(|g| g.resistant)
        .map(|g| {
            let note = note_for(&g.species)
                .ok_or_else(|| ConfigError::MissingAnnotation(g.species.clone()))?;
            Ok(Callout {
                species: g.species.clone(),
                log_mic: g.max_log_mic,
                label: g.label.clone(),
                note: note.to_string(),
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(TextLayer {
        style: TextStyle {
            align: "left".to_string(),
            baseline: "middle".to_string(),
            dx: 8.0,
            font_size: 12.0,
            color: "#000000".to_string(),
        },
        callouts,
    })
}

fn threshold_layer() -> RuleLayer {
    RuleLayer {
        log_mic: THRESHOLD_MIC.log10(),
        stroke_dash: [4, 4],
        color: "#7f7f7f".to_string(),
        caption: format!("MIC = {THRESHOLD_MIC}"),
    }
}

use serde::Serialize;

use crate::data::model::Antibiotic;

// ---------------------------------------------------------------------------
// Field names shared by ChartSpec and its renderers
// ---------------------------------------------------------------------------

pub const FIELD_SPECIES: &str = "species";
pub const FIELD_ANTIBIOTIC: &str = "antibiotic";
pub const FIELD_MIC: &str = "mic";
pub const FIELD_LOG_MIC: &str = "log_mic";
pub const FIELD_RESISTANT: &str = "resistant";
pub const FIELD_LABEL: &str = "label";
pub const FIELD_NOTE: &str = "note";

// ---------------------------------------------------------------------------
// ChartSpec – declarative description handed to a renderer
// ---------------------------------------------------------------------------

/// A complete layered chart. Plain data; renderers decide how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub color: ColorScale,
    pub opacity: OpacityRule,
    pub tooltip: Vec<TooltipField>,
    pub layers: Vec<Layer>,
}

impl ChartSpec {
    /// Compact JSON. Field and row order are fixed, so equal specs give
    /// equal bytes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn bar_layer(&self) -> Option<&BarLayer> {
        self.layers.iter().find_map(|l| match l {
            Layer::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn text_layer(&self) -> Option<&TextLayer> {
        self.layers.iter().find_map(|l| match l {
            Layer::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rule_layer(&self) -> Option<&RuleLayer> {
        self.layers.iter().find_map(|l| match l {
            Layer::Rule(rule) => Some(rule),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

/// A positional encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub field: String,
    pub field_type: FieldType,
    pub title: String,
    /// Whether the scale must include zero.
    pub zero: bool,
    /// Explicit category order, first entry at the top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

/// Nominal colour scale with a fixed domain → range mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub field: String,
    pub title: String,
    pub domain: Vec<String>,
    pub range: Vec<String>,
}

/// Opacity conditioned on a boolean field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpacityRule {
    pub field: &'static str,
    pub when_true: f64,
    pub otherwise: f64,
}

impl OpacityRule {
    pub fn opacity_for(&self, flag: bool) -> f64 {
        if flag {
            self.when_true
        } else {
            self.otherwise
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipField {
    pub field: String,
    pub title: String,
    pub field_type: FieldType,
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mark", rename_all = "lowercase")]
pub enum Layer {
    Bar(BarLayer),
    Text(TextLayer),
    Rule(RuleLayer),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayer {
    pub rows: Vec<BarDatum>,
}

/// One bar: a measurement with its final axis label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub species: String,
    pub antibiotic: Antibiotic,
    pub mic: f64,
    pub log_mic: f64,
    pub resistant: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayer {
    pub style: TextStyle,
    pub callouts: Vec<Callout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub align: String,
    pub baseline: String,
    /// Horizontal offset from the anchor, in pixels.
    pub dx: f64,
    pub font_size: f64,
    pub color: String,
}

/// Fixed-position note next to a species row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Callout {
    pub species: String,
    pub log_mic: f64,
    pub label: String,
    pub note: String,
}

/// Vertical dashed reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleLayer {
    pub log_mic: f64,
    pub stroke_dash: [u32; 2],
    pub color: String,
    pub caption: String,
}

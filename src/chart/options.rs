use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::data::label::DEFAULT_WRAP_WIDTH;
use crate::error::ConfigError;

pub const DEFAULT_TITLE: &str = "Resistance Profile of Bacteria Across Three Antibiotics";

// ---------------------------------------------------------------------------
// ChartOptions
// ---------------------------------------------------------------------------

/// Stylistic knobs for a chart. Missing fields deserialize from the
/// classic preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub show_annotations: bool,
    pub show_threshold_line: bool,
    /// Word-wrap axis labels at this many columns.
    pub wrap_width: Option<usize>,
    /// `#rrggbb`; `None` leaves the renderer's default.
    pub background_color: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 750,
            height: 550,
            title: DEFAULT_TITLE.to_string(),
            show_annotations: true,
            show_threshold_line: false,
            wrap_width: None,
            background_color: None,
        }
    }
}

impl ChartOptions {
    /// Annotated chart with labels wrapped to fit a narrow axis.
    pub fn wrapped() -> Self {
        Self {
            wrap_width: Some(DEFAULT_WRAP_WIDTH),
            height: 650,
            ..Self::default()
        }
    }

    /// No callouts; a dashed reference line at MIC = 10 on white.
    pub fn minimal() -> Self {
        Self {
            show_annotations: false,
            show_threshold_line: true,
            background_color: Some("#ffffff".to_string()),
            ..Self::default()
        }
    }

    /// Reject anything that cannot produce a chart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::BlankTitle);
        }
        if self.wrap_width == Some(0) {
            return Err(ConfigError::ZeroWrapWidth);
        }
        if let Some(bg) = &self.background_color {
            parse_hex(bg)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Classic,
    Wrapped,
    Minimal,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Wrapped, Preset::Minimal];

    pub fn options(self) -> ChartOptions {
        match self {
            Preset::Classic => ChartOptions::default(),
            Preset::Wrapped => ChartOptions::wrapped(),
            Preset::Minimal => ChartOptions::minimal(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Classic => "Classic",
            Preset::Wrapped => "Wrapped labels",
            Preset::Minimal => "Minimal",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.options().validate(), Ok(()), "{preset}");
        }
    }

    #[test]
    fn invalid_options_are_rejected() {
        let cases = [
            (
                ChartOptions { width: 0, ..Default::default() },
                ConfigError::InvalidDimensions { width: 0, height: 550 },
            ),
            (
                ChartOptions { title: "  ".into(), ..Default::default() },
                ConfigError::BlankTitle,
            ),
            (
                ChartOptions { wrap_width: Some(0), ..Default::default() },
                ConfigError::ZeroWrapWidth,
            ),
            (
                ChartOptions { background_color: Some("white".into()), ..Default::default() },
                ConfigError::InvalidColor("white".into()),
            ),
        ];
        for (options, expected) in cases {
            assert_eq!(options.validate(), Err(expected));
        }
    }

    #[test]
    fn partial_json_fills_from_classic() {
        let options: ChartOptions =
            serde_json::from_str(r##"{"wrap_width": 18, "background_color": "#0e1117"}"##).unwrap();
        assert_eq!(options.width, 750);
        assert!(options.show_annotations);
        assert_eq!(options.wrap_width, Some(18));
        assert_eq!(options.background_color.as_deref(), Some("#0e1117"));
    }
}

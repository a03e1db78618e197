use eframe::egui::Color32;
use palette::{Srgb, Srgba, WithAlpha};

use crate::data::model::Antibiotic;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Hex colours
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` colour.
pub fn parse_hex(s: &str) -> Result<Srgb<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidColor(s.to_string());
    let digits = s.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 {
        return Err(invalid());
    }
    digits.parse::<Srgb<u8>>().map_err(|_| invalid())
}

/// Lower-case `#rrggbb`.
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

/// Convert for egui, applying `opacity` in `[0, 1]` as straight alpha.
pub fn to_color32(c: Srgb<u8>, opacity: f32) -> Color32 {
    let rgba: Srgba<u8> = c
        .into_format::<f32>()
        .with_alpha(opacity.clamp(0.0, 1.0))
        .into_format();
    Color32::from_rgba_unmultiplied(rgba.red, rgba.green, rgba.blue, rgba.alpha)
}

// ---------------------------------------------------------------------------
// Antibiotic palette
// ---------------------------------------------------------------------------

/// Blue, orange, green, indexed by [`Antibiotic`] declaration order.
const ANTIBIOTIC_RGB: [(u8, u8, u8); 3] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
];

/// Fixed antibiotic → colour mapping shared by every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AntibioticPalette;

impl AntibioticPalette {
    pub fn color_for(&self, antibiotic: Antibiotic) -> Srgb<u8> {
        let (r, g, b) = ANTIBIOTIC_RGB[antibiotic as usize];
        Srgb::new(r, g, b)
    }

    /// Look up by antibiotic name, as it appears in a scale domain.
    pub fn color_for_name(&self, name: &str) -> Result<Srgb<u8>, ConfigError> {
        let antibiotic: Antibiotic = name.parse()?;
        Ok(self.color_for(antibiotic))
    }

    /// Scale domain, in legend order.
    pub fn domain(&self) -> Vec<String> {
        Antibiotic::ALL.iter().map(|a| a.name().to_string()).collect()
    }

    /// Scale range as hex strings, aligned with [`Self::domain`].
    pub fn range(&self) -> Vec<String> {
        Antibiotic::ALL
            .iter()
            .map(|&a| to_hex(self.color_for(a)))
            .collect()
    }

    /// Return the legend entries (antibiotic → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(Antibiotic, Color32)> {
        Antibiotic::ALL
            .iter()
            .map(|&a| (a, to_color32(self.color_for(a), 1.0)))
            .collect()
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Antibiotic – the closed set of tracked drugs
// ---------------------------------------------------------------------------

/// One of the three antibiotics in the MIC table.
///
/// Declaration order is the column order of the wide table and the order in
/// which each observation is expanded into measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Antibiotic {
    Penicillin,
    Streptomycin,
    Neomycin,
}

impl Antibiotic {
    pub const ALL: [Antibiotic; 3] = [
        Antibiotic::Penicillin,
        Antibiotic::Streptomycin,
        Antibiotic::Neomycin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Antibiotic::Penicillin => "Penicillin",
            Antibiotic::Streptomycin => "Streptomycin",
            Antibiotic::Neomycin => "Neomycin",
        }
    }
}

impl fmt::Display for Antibiotic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Antibiotic {
    type Err = ConfigError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Antibiotic::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ConfigError::UnknownAntibiotic(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the wide input table
// ---------------------------------------------------------------------------

/// A single species with its MIC against each antibiotic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(alias = "Bacteria", alias = "bacteria", alias = "Species")]
    pub species: String,
    #[serde(alias = "Penicillin")]
    pub penicillin: f64,
    #[serde(alias = "Streptomycin")]
    pub streptomycin: f64,
    #[serde(alias = "Neomycin")]
    pub neomycin: f64,
}

impl Observation {
    pub fn new(species: &str, penicillin: f64, streptomycin: f64, neomycin: f64) -> Self {
        Observation {
            species: species.to_string(),
            penicillin,
            streptomycin,
            neomycin,
        }
    }

    /// MIC against the given antibiotic.
    pub fn mic(&self, antibiotic: Antibiotic) -> f64 {
        match antibiotic {
            Antibiotic::Penicillin => self.penicillin,
            Antibiotic::Streptomycin => self.streptomycin,
            Antibiotic::Neomycin => self.neomycin,
        }
    }

    /// `(antibiotic, mic)` pairs in column order.
    pub fn readings(&self) -> [(Antibiotic, f64); 3] {
        Antibiotic::ALL.map(|a| (a, self.mic(a)))
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of the long-form table
// ---------------------------------------------------------------------------

/// One (species, antibiotic) pair with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub species: String,
    pub antibiotic: Antibiotic,
    /// Minimum inhibitory concentration, always > 0.
    pub mic: f64,
    /// `log10(mic)`.
    pub log_mic: f64,
    /// Member of the fixed multidrug-resistant set.
    pub resistant: bool,
    /// Axis label: warning marker for resistant species, optionally wrapped.
    pub display_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antibiotic_parses_case_insensitively() {
        assert_eq!("neomycin".parse::<Antibiotic>(), Ok(Antibiotic::Neomycin));
        assert_eq!(" PENICILLIN ".parse::<Antibiotic>(), Ok(Antibiotic::Penicillin));
        assert_eq!(
            "Vancomycin".parse::<Antibiotic>(),
            Err(ConfigError::UnknownAntibiotic("Vancomycin".into()))
        );
    }

    #[test]
    fn readings_follow_column_order() {
        let obs = Observation::new("Escherichia coli", 100.0, 0.4, 0.1);
        assert_eq!(
            obs.readings(),
            [
                (Antibiotic::Penicillin, 100.0),
                (Antibiotic::Streptomycin, 0.4),
                (Antibiotic::Neomycin, 0.1),
            ]
        );
    }

    #[test]
    fn observation_accepts_dashboard_column_names() {
        let json = r#"{"Bacteria": "Brucella abortus", "Penicillin": 1, "Streptomycin": 2, "Neomycin": 0.02}"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(obs, Observation::new("Brucella abortus", 1.0, 2.0, 0.02));
    }
}

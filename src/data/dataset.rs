use std::borrow::Cow;

use log::debug;

use super::label::display_label;
use super::model::{Antibiotic, Measurement, Observation};
use crate::error::{ConfigError, DomainError};

// ---------------------------------------------------------------------------
// Embedded MIC table
// ---------------------------------------------------------------------------

/// `(species, penicillin, streptomycin, neomycin)`.
type Row = (&'static str, f64, f64, f64);

/// The sixteen species of the resistance profile, MIC per antibiotic.
pub const MIC_TABLE: [Row; 16] = [
    ("Aerobacter aerogenes", 870.0, 1.0, 1.6),
    ("Bacillus anthracis", 0.001, 0.01, 0.007),
    ("Brucella abortus", 1.0, 2.0, 0.02),
    ("Diplococcus pneumoniae", 0.005, 11.0, 10.0),
    ("Escherichia coli", 100.0, 0.4, 0.1),
    ("Klebsiella pneumoniae", 850.0, 1.2, 1.0),
    ("Mycobacterium tuberculosis", 800.0, 5.0, 2.0),
    ("Proteus vulgaris", 3.0, 0.1, 0.1),
    ("Pseudomonas aeruginosa", 850.0, 2.0, 0.4),
    ("Salmonella (Eberthella) typhosa", 1.0, 0.4, 0.008),
    ("Salmonella schottmuelleri", 10.0, 0.8, 0.09),
    ("Staphylococcus albus", 0.007, 0.1, 0.001),
    ("Staphylococcus aureus", 0.03, 0.03, 0.001),
    ("Streptococcus fecalis", 1.0, 1.0, 0.1),
    ("Streptococcus hemolyticus", 0.001, 14.0, 10.0),
    ("Streptococcus viridans", 0.005, 10.0, 40.0),
];

/// Species treated as multidrug-resistant. Exact, case-sensitive match.
pub const RESISTANT_SPECIES: [&str; 3] = [
    "Aerobacter aerogenes",
    "Klebsiella pneumoniae",
    "Pseudomonas aeruginosa",
];

pub fn is_resistant(species: &str) -> bool {
    RESISTANT_SPECIES.contains(&species)
}

/// The embedded table as owned observations.
pub fn embedded_observations() -> Vec<Observation> {
    MIC_TABLE
        .iter()
        .map(|&(species, pen, strep, neo)| Observation::new(species, pen, strep, neo))
        .collect()
}

// ---------------------------------------------------------------------------
// DatasetBuilder – wide observations → long-form measurements
// ---------------------------------------------------------------------------

/// Expands observations into one [`Measurement`] per (species, antibiotic).
#[derive(Debug, Clone)]
pub struct DatasetBuilder<'a> {
    observations: Cow<'a, [Observation]>,
    wrap_width: Option<usize>,
}

impl Default for DatasetBuilder<'static> {
    fn default() -> Self {
        Self {
            observations: Cow::Owned(embedded_observations()),
            wrap_width: None,
        }
    }
}

impl<'a> DatasetBuilder<'a> {
    /// Builder over caller-supplied observations instead of the embedded table.
    pub fn from_observations(observations: &'a [Observation]) -> Self {
        Self {
            observations: Cow::Borrowed(observations),
            wrap_width: None,
        }
    }

    /// Word-wrap display labels at `width` columns.
    pub fn wrap_width(mut self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWrapWidth);
        }
        self.wrap_width = Some(width);
        Ok(self)
    }

    /// Long-form measurements in observation order, then antibiotic order.
    ///
    /// Halts at the first MIC that has no logarithm.
    pub fn build(&self) -> Result<Vec<Measurement>, DomainError> {
        let mut out = Vec::with_capacity(self.observations.len() * Antibiotic::ALL.len());

        for obs in self.observations.iter() {
            let resistant = is_resistant(&obs.species);
            let label = display_label(&obs.species, resistant, self.wrap_width);

            for (antibiotic, mic) in obs.readings() {
                let log_mic = log10_mic(&obs.species, antibiotic, mic)?;
                out.push(Measurement {
                    species: obs.species.clone(),
                    antibiotic,
                    mic,
                    log_mic,
                    resistant,
                    display_label: label.clone(),
                });
            }
        }

        debug!(
            "Expanded {} observations into {} measurements ({} resistant)",
            self.observations.len(),
            out.len(),
            out.iter().filter(|m| m.resistant).count()
        );
        Ok(out)
    }
}

fn log10_mic(species: &str, antibiotic: Antibiotic, mic: f64) -> Result<f64, DomainError> {
    if !mic.is_finite() {
        return Err(DomainError::NonFiniteMic {
            species: species.to_string(),
            antibiotic,
        });
    }
    if mic <= 0.0 {
        return Err(DomainError::NonPositiveMic {
            species: species.to_string(),
            antibiotic,
            mic,
        });
    }
    Ok(mic.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'m>(ms: &'m [Measurement], species: &str, antibiotic: Antibiotic) -> &'m Measurement {
        ms.iter()
            .find(|m| m.species == species && m.antibiotic == antibiotic)
            .unwrap()
    }

    #[test]
    fn three_measurements_per_species() {
        let ms = DatasetBuilder::default().build().unwrap();
        assert_eq!(ms.len(), 48);
        for (species, ..) in MIC_TABLE {
            let n = ms.iter().filter(|m| m.species == species).count();
            assert_eq!(n, 3, "{species}");
        }
    }

    #[test]
    fn log_mic_is_log10() {
        let ms = DatasetBuilder::default().build().unwrap();
        for m in &ms {
            assert!((m.log_mic - m.mic.log10()).abs() < 1e-12);
        }
        let ecoli = find(&ms, "Escherichia coli", Antibiotic::Penicillin);
        assert_eq!(ecoli.mic, 100.0);
        assert!((ecoli.log_mic - 2.0).abs() < 1e-12);
    }

    #[test]
    fn resistant_flag_matches_set() {
        let ms = DatasetBuilder::default().build().unwrap();
        for m in &ms {
            assert_eq!(m.resistant, RESISTANT_SPECIES.contains(&m.species.as_str()));
        }
        assert_eq!(ms.iter().filter(|m| m.resistant).count(), 9);
    }

    #[test]
    fn viridans_neomycin_end_to_end() {
        let ms = DatasetBuilder::default().build().unwrap();
        let m = find(&ms, "Streptococcus viridans", Antibiotic::Neomycin);
        assert_eq!(m.mic, 40.0);
        assert!((m.log_mic - 1.602).abs() < 1e-3);
        assert!(!m.resistant);
        assert_eq!(m.display_label, "Streptococcus viridans");

        let ms = DatasetBuilder::default().wrap_width(30).unwrap().build().unwrap();
        let m = find(&ms, "Streptococcus viridans", Antibiotic::Neomycin);
        assert_eq!(m.display_label, "Streptococcus viridans");

        let ms = DatasetBuilder::default().wrap_width(18).unwrap().build().unwrap();
        let m = find(&ms, "Streptococcus viridans", Antibiotic::Neomycin);
        assert_eq!(m.display_label, "Streptococcus\nviridans");
    }

    #[test]
    fn non_positive_mic_halts() {
        for bad in [0.0, -3.0] {
            let obs = vec![
                Observation::new("Escherichia coli", 100.0, 0.4, 0.1),
                Observation::new("Broken", 1.0, bad, 1.0),
            ];
            let err = DatasetBuilder::from_observations(&obs).build().unwrap_err();
            assert_eq!(
                err,
                DomainError::NonPositiveMic {
                    species: "Broken".into(),
                    antibiotic: Antibiotic::Streptomycin,
                    mic: bad,
                }
            );
        }
    }

    #[test]
    fn nan_mic_is_rejected() {
        let obs = vec![Observation::new("Broken", f64::NAN, 1.0, 1.0)];
        let err = DatasetBuilder::from_observations(&obs).build().unwrap_err();
        assert!(matches!(err, DomainError::NonFiniteMic { .. }));
    }

    #[test]
    fn zero_wrap_width_is_config_error() {
        let err = DatasetBuilder::default().wrap_width(0).unwrap_err();
        assert_eq!(err, ConfigError::ZeroWrapWidth);
    }

    #[test]
    fn build_is_deterministic() {
        let a = DatasetBuilder::default().build().unwrap();
        let b = DatasetBuilder::default().build().unwrap();
        assert_eq!(a, b);
    }
}

use std::collections::BTreeSet;

use super::model::{Antibiotic, Measurement};

// ---------------------------------------------------------------------------
// Filter predicate: which measurements the viewer shows
// ---------------------------------------------------------------------------

/// Viewer-side selection over the long-form table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Antibiotics whose bars are shown. Empty means nothing is shown.
    pub antibiotics: BTreeSet<Antibiotic>,
    /// Hide every species outside the resistant set.
    pub resistant_only: bool,
}

impl Default for FilterState {
    /// Everything selected.
    fn default() -> Self {
        Self {
            antibiotics: Antibiotic::ALL.into_iter().collect(),
            resistant_only: false,
        }
    }
}

impl FilterState {
    pub fn toggle(&mut self, antibiotic: Antibiotic) {
        if !self.antibiotics.remove(&antibiotic) {
            self.antibiotics.insert(antibiotic);
        }
    }

    pub fn select_all(&mut self) {
        self.antibiotics = Antibiotic::ALL.into_iter().collect();
    }

    pub fn select_none(&mut self) {
        self.antibiotics.clear();
    }

    pub fn passes(&self, m: &Measurement) -> bool {
        self.antibiotics.contains(&m.antibiotic) && (!self.resistant_only || m.resistant)
    }
}

/// Return indices of measurements that pass the filter.
pub fn filtered_indices(measurements: &[Measurement], filters: &FilterState) -> Vec<usize> {
    measurements
        .iter()
        .enumerate()
        .filter(|(_, m)| filters.passes(m))
        .map(|(i, _)| i)
        .collect()
}

/// Clone out the measurements that pass the filter, preserving order.
pub fn apply(measurements: &[Measurement], filters: &FilterState) -> Vec<Measurement> {
    filtered_indices(measurements, filters)
        .into_iter()
        .map(|i| measurements[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::DatasetBuilder;

    #[test]
    fn default_filter_keeps_everything() {
        let ms = DatasetBuilder::default().build().unwrap();
        assert_eq!(filtered_indices(&ms, &FilterState::default()).len(), ms.len());
    }

    #[test]
    fn toggling_antibiotic_drops_its_rows() {
        let ms = DatasetBuilder::default().build().unwrap();
        let mut f = FilterState::default();
        f.toggle(Antibiotic::Penicillin);
        let kept = apply(&ms, &f);
        assert_eq!(kept.len(), 32);
        assert!(kept.iter().all(|m| m.antibiotic != Antibiotic::Penicillin));
        f.toggle(Antibiotic::Penicillin);
        assert_eq!(apply(&ms, &f).len(), 48);
    }

    #[test]
    fn resistant_only_and_none() {
        let ms = DatasetBuilder::default().build().unwrap();
        let mut f = FilterState {
            resistant_only: true,
            ..FilterState::default()
        };
        assert_eq!(apply(&ms, &f).len(), 9);
        f.select_none();
        assert!(apply(&ms, &f).is_empty());
        f.select_all();
        assert_eq!(apply(&ms, &f).len(), 9);
    }
}

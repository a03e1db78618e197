// ---------------------------------------------------------------------------
// Callout notes for multidrug-resistant species
// ---------------------------------------------------------------------------

/// `(species, note)`; every member of the resistant set needs a row.
pub const ANNOTATION_NOTES: [(&str, &str); 3] = [
    ("Aerobacter aerogenes", "Very high resistance"),
    ("Klebsiella pneumoniae", "Near max resistance"),
    ("Pseudomonas aeruginosa", "Resistant to all"),
];

pub fn note_for(species: &str) -> Option<&'static str> {
    ANNOTATION_NOTES
        .iter()
        .find(|(s, _)| *s == species)
        .map(|&(_, note)| note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::RESISTANT_SPECIES;

    #[test]
    fn every_resistant_species_has_a_note() {
        for species in RESISTANT_SPECIES {
            assert!(note_for(species).is_some(), "{species}");
        }
        assert_eq!(note_for("Escherichia coli"), None);
    }
}

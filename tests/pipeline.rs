use mic_panda::chart::vega::to_vega_lite;
use mic_panda::data::dataset::embedded_observations;
use mic_panda::data::filter::FilterState;
use mic_panda::data::loader::{load_file, save_file};
use mic_panda::{
    Antibiotic, ChartOptions, ConfigError, DomainError, Observation,
    PipelineError, Preset, chart_for, default_chart, measurements_for,
};

#[test]
fn embedded_table_charts_end_to_end() {
    let spec = default_chart(&ChartOptions::default()).unwrap();
    let bars = &spec.bar_layer().unwrap().rows;
    assert_eq!(bars.len(), 48);

    let viridans = bars
        .iter()
        .find(|b| b.species == "Streptococcus viridans" && b.antibiotic == Antibiotic::Neomycin)
        .unwrap();
    assert_eq!(viridans.mic, 40.0);
    assert!((viridans.log_mic - 1.60206).abs() < 1e-5);
    assert!(!viridans.resistant);
    assert_eq!(viridans.label, "Streptococcus viridans");
}

#[test]
fn every_preset_is_deterministic() {
    for preset in Preset::ALL {
        let a = default_chart(&preset.options()).unwrap();
        let b = default_chart(&preset.options()).unwrap();
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap(), "{preset}");
        assert_eq!(to_vega_lite(&a), to_vega_lite(&b));
    }
}

#[test]
fn wrapped_preset_wraps_dataset_labels() {
    let ms = measurements_for(&embedded_observations(), &ChartOptions::wrapped()).unwrap();
    let label = &ms
        .iter()
        .find(|m| m.species == "Pseudomonas aeruginosa")
        .unwrap()
        .display_label;
    assert_eq!(label, "⚠️ Pseudomonas\naeruginosa");
}

#[test]
fn options_are_checked_before_data() {
    // Both inputs are bad; the option error wins.
    let obs = [Observation::new("Broken", -1.0, 1.0, 1.0)];
    let options = ChartOptions {
        title: String::new(),
        ..ChartOptions::default()
    };
    assert_eq!(
        chart_for(&obs, &options, &FilterState::default()),
        Err(PipelineError::Config(ConfigError::BlankTitle))
    );
}

#[test]
fn non_positive_mic_halts_pipeline() {
    let obs = [
        Observation::new("Escherichia coli", 100.0, 0.4, 0.1),
        Observation::new("Broken", 1.0, 1.0, 0.0),
    ];
    let err = chart_for(&obs, &ChartOptions::default(), &FilterState::default()).unwrap_err();
    assert_eq!(
        err,
        PipelineError::Domain(DomainError::NonPositiveMic {
            species: "Broken".into(),
            antibiotic: Antibiotic::Neomycin,
            mic: 0.0,
        })
    );
    assert!(err.to_string().contains("non-positive MIC"));
}

#[test]
fn exported_files_chart_like_the_embedded_table() {
    let dir = tempfile::tempdir().unwrap();
    let embedded = default_chart(&ChartOptions::default()).unwrap();
    let observations = embedded_observations();

    for name in ["mic_data.parquet", "mic_data.csv", "mic_data.json"] {
        let path = dir.path().join(name);
        save_file(&path, &observations).unwrap();
        let loaded = load_file(&path).unwrap();
        let spec = chart_for(&loaded, &ChartOptions::default(), &FilterState::default()).unwrap();
        assert_eq!(spec, embedded, "{name}");
    }
}

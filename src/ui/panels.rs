use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use palette::Srgb;

use mic_panda::chart::Preset;
use mic_panda::color::{AntibioticPalette, parse_hex, to_hex};
use mic_panda::data::dataset::embedded_observations;
use mic_panda::data::label::DEFAULT_WRAP_WIDTH;
use mic_panda::data::loader::load_file;
use mic_panda::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart options and filters
// ---------------------------------------------------------------------------

/// Render the left options panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart");
    ui.separator();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Preset selector ----
            ui.strong("Style");
            let mut preset = state.preset;
            egui::ComboBox::from_id_salt("preset")
                .selected_text(preset.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for p in Preset::ALL {
                        ui.selectable_value(&mut preset, p, p.to_string());
                    }
                });
            if preset != state.preset {
                state.apply_preset(preset);
            }
            ui.separator();

            // ---- Individual options ----
            let options = &mut state.options;
            changed |= ui
                .checkbox(&mut options.show_annotations, "Annotate MDR species")
                .changed();
            changed |= ui
                .checkbox(&mut options.show_threshold_line, "Reference line at MIC = 10")
                .changed();

            let mut wrap = options.wrap_width.is_some();
            if ui.checkbox(&mut wrap, "Wrap labels").changed() {
                options.wrap_width = wrap.then_some(DEFAULT_WRAP_WIDTH);
                changed = true;
            }
            if let Some(width) = options.wrap_width.as_mut() {
                changed |= ui
                    .add(egui::Slider::new(width, 8..=40).text("columns"))
                    .changed();
            }

            let mut tinted = options.background_color.is_some();
            ui.horizontal(|ui: &mut Ui| {
                if ui.checkbox(&mut tinted, "Background").changed() {
                    options.background_color = tinted.then(|| "#ffffff".to_string());
                    changed = true;
                }
                if let Some(hex) = options.background_color.as_mut() {
                    let c = parse_hex(hex).unwrap_or(Srgb::new(255, 255, 255));
                    let mut rgb = [c.red, c.green, c.blue];
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        *hex = to_hex(Srgb::new(rgb[0], rgb[1], rgb[2]));
                        changed = true;
                    }
                }
            });
            ui.separator();

            // ---- Filters ----
            ui.strong("Antibiotics");
            for (antibiotic, color) in AntibioticPalette.legend_entries() {
                let mut checked = state.filters.antibiotics.contains(&antibiotic);
                let text = RichText::new(antibiotic.name()).color(color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.filters.toggle(antibiotic);
                    changed = true;
                }
            }
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.filters.select_all();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    state.filters.select_none();
                    changed = true;
                }
            });
            changed |= ui
                .checkbox(&mut state.filters.resistant_only, "Only multidrug-resistant")
                .changed();
        });

    if changed {
        state.rebuild();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open table…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Use embedded table").clicked() {
                state.set_observations(embedded_observations(), "embedded table".to_string());
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export Vega-Lite…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} species from {}",
            state.observations.len(),
            state.source
        ));

        ui.separator();

        if ui.selectable_label(state.show_table, "Table").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

/// Draw one of the markdown-like page captions: `### ` headings, `- `
/// bullets and paragraphs. Bold markers are dropped.
pub fn caption(ui: &mut Ui, text: &str) {
    for line in text.lines() {
        let line = line.replace("**", "");
        if let Some(heading) = line.strip_prefix("### ") {
            ui.heading(heading);
        } else if let Some(item) = line.strip_prefix("- ") {
            ui.label(format!("•  {item}"));
        } else if line.trim().is_empty() {
            ui.add_space(4.0);
        } else {
            ui.label(line);
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open MIC table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(observations) => {
                log::info!(
                    "Loaded {} observations from {}",
                    observations.len(),
                    path.display()
                );
                state.set_observations(observations, path.display().to_string());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name("mic_chart.vl.json")
        .add_filter("Vega-Lite JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = write_vega_lite(state, &path) {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn write_vega_lite(state: &AppState, path: &Path) -> Result<()> {
    let doc = state.vega_lite_json().context("no chart to export")?;
    std::fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported Vega-Lite spec to {}", path.display());
    Ok(())
}

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use mic_panda::color::{AntibioticPalette, to_color32};
use mic_panda::state::AppState;

// ---------------------------------------------------------------------------
// Long-form table view
// ---------------------------------------------------------------------------

/// The bars of the current spec as rows, in spec order.
pub fn measurement_table(ui: &mut Ui, state: &AppState) {
    let Some(bars) = state.spec.as_ref().and_then(|s| s.bar_layer()) else {
        ui.label("No measurements.");
        return;
    };
    let palette = AntibioticPalette;

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(220.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in ["Species", "Antibiotic", "MIC", "log₁₀(MIC)", "MDR"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &bars.rows {
                body.row(20.0, |mut r| {
                    r.col(|ui| {
                        ui.label(&row.species);
                    });
                    r.col(|ui| {
                        let c = to_color32(palette.color_for(row.antibiotic), 1.0);
                        ui.label(RichText::new(row.antibiotic.name()).color(c));
                    });
                    r.col(|ui| {
                        ui.label(format!("{}", row.mic));
                    });
                    r.col(|ui| {
                        ui.label(format!("{:.3}", row.log_mic));
                    });
                    r.col(|ui| {
                        ui.label(if row.resistant { "⚠️ yes" } else { "" });
                    });
                });
            }
        });
}

use eframe::egui::{self, ScrollArea, Ui};

use mic_panda::captions::{INTRO, PAGE_TITLE, TAKEAWAYS};
use mic_panda::state::AppState;

use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MicPandaApp {
    pub state: AppState,
}

impl eframe::App for MicPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: options and filters ----
        egui::SidePanel::left("options_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: captions around the chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading(PAGE_TITLE);
                    panels::caption(ui, INTRO);
                    ui.separator();
                    if self.state.show_table {
                        table::measurement_table(ui, &self.state);
                    } else {
                        plot::resistance_plot(ui, &self.state);
                    }
                    ui.separator();
                    panels::caption(ui, TAKEAWAYS);
                });
        });
    }
}

mod app;
mod ui;

use app::MicPandaApp;
use eframe::egui;
use mic_panda::captions::PAGE_TITLE;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        PAGE_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(MicPandaApp::default()))),
    )
}

use eframe::egui::{self, Align2, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, LineStyle, Plot, PlotPoint, Text, VLine, uniform_grid_spacer,
};

use mic_panda::chart::spec::{BarDatum, ChartSpec, Layer, RuleLayer, TextLayer};
use mic_panda::color::{AntibioticPalette, parse_hex, to_color32};
use mic_panda::data::model::Antibiotic;
use mic_panda::state::AppState;

/// Share of a category row taken by one antibiotic's bar.
const BAR_WIDTH: f64 = 0.26;

// ---------------------------------------------------------------------------
// Resistance chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current spec, or a hint when the pipeline failed.
pub fn resistance_plot(ui: &mut Ui, state: &AppState) {
    let Some(spec) = &state.spec else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to chart  (see the status message above)");
        });
        return;
    };

    let background = spec
        .background
        .as_deref()
        .and_then(|hex| parse_hex(hex).ok())
        .map(|c| to_color32(c, 1.0));

    match background {
        Some(fill) => {
            egui::Frame::default()
                .fill(fill)
                .show(ui, |ui: &mut Ui| draw(ui, spec));
        }
        None => draw(ui, spec),
    }
}

fn draw(ui: &mut Ui, spec: &ChartSpec) {
    ui.heading(spec.title.as_str());

    let categories: Vec<String> = spec.y.sort.clone().unwrap_or_default();
    let n = categories.len();
    // First category at the top of the plot.
    let row_of = |label: &str| -> Option<f64> {
        categories
            .iter()
            .position(|c| c == label)
            .map(|i| (n - 1 - i) as f64)
    };

    let axis_labels = categories.clone();
    let palette = AntibioticPalette;

    Plot::new("resistance_plot")
        .legend(Legend::default())
        .width(spec.width as f32)
        .height(spec.height as f32)
        .x_axis_label(spec.x.title.clone())
        .y_axis_label(spec.y.title.clone())
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .y_axis_formatter(move |mark: GridMark, _range| axis_label(&axis_labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(true)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &spec.layers {
                match layer {
                    Layer::Bar(bar) => {
                        for antibiotic in Antibiotic::ALL {
                            let bars: Vec<Bar> = bar
                                .rows
                                .iter()
                                .filter(|r| r.antibiotic == antibiotic)
                                .filter_map(|r| {
                                    let row = row_of(&r.label)?;
                                    Some(bar_for(spec, &palette, r, row))
                                })
                                .collect();
                            if bars.is_empty() {
                                continue;
                            }
                            let chart = BarChart::new(bars)
                                .name(antibiotic.name())
                                .color(to_color32(palette.color_for(antibiotic), 1.0))
                                .element_formatter(Box::new(|b: &Bar, _: &BarChart| b.name.clone()))
                                .horizontal();
                            plot_ui.bar_chart(chart);
                        }
                    }
                    Layer::Text(text) => {
                        for t in callout_texts(text, &row_of) {
                            plot_ui.text(t);
                        }
                    }
                    Layer::Rule(rule) => plot_ui.vline(threshold_line(rule)),
                }
            }
        });
}

fn axis_label(labels: &[String], value: f64) -> String {
    let n = labels.len() as f64;
    let idx = n - 1.0 - value.round();
    if (value - value.round()).abs() > 1e-6 || idx < 0.0 || idx >= n {
        return String::new();
    }
    labels[idx as usize].clone()
}

fn bar_for(spec: &ChartSpec, palette: &AntibioticPalette, r: &BarDatum, row: f64) -> Bar {
    let offset = (r.antibiotic as usize as f64 - 1.0) * BAR_WIDTH;
    let opacity = spec.opacity.opacity_for(r.resistant) as f32;
    Bar::new(row + offset, r.log_mic)
        .width(BAR_WIDTH * 0.9)
        .fill(to_color32(palette.color_for(r.antibiotic), opacity))
        .name(format!(
            "Bacteria: {}\nAntibiotic: {}\nMIC: {}",
            r.species, r.antibiotic, r.mic
        ))
}

fn callout_texts(text: &TextLayer, row_of: &impl Fn(&str) -> Option<f64>) -> Vec<Text> {
    let color = parse_hex(&text.style.color)
        .map(|c| to_color32(c, 1.0))
        .unwrap_or(Color32::BLACK);
    // Plot text has no pixel offset; leading spaces stand in for dx.
    let pad = " ".repeat((text.style.dx / 4.0).round() as usize);
    text.callouts
        .iter()
        .filter_map(|c| {
            let row = row_of(&c.label)?;
            let label = RichText::new(format!("{pad}{}", c.note))
                .size(text.style.font_size as f32)
                .color(color);
            Some(Text::new(PlotPoint::new(c.log_mic, row), label).anchor(Align2::LEFT_CENTER))
        })
        .collect()
}

fn threshold_line(rule: &RuleLayer) -> VLine {
    let color = parse_hex(&rule.color)
        .map(|c| to_color32(c, 1.0))
        .unwrap_or(Color32::GRAY);
    VLine::new(rule.log_mic)
        .name(&rule.caption)
        .color(color)
        .style(LineStyle::Dashed {
            length: rule.stroke_dash[0] as f32 * 2.0,
        })
}

use std::path::PathBuf;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::chart::Chart;
use crate::color::{bar_colors, HISTOGRAM_FILL};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – legend of the active chart
// ---------------------------------------------------------------------------

/// Render the legend / bin table of the active chart.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading("Legend");
    ui.separator();

    let Some(chart) = state.active_chart() else {
        ui.label("No chart.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match chart {
            Chart::Bar { bars, .. } => {
                for ((label, color), (_, count)) in bar_colors(bars).into_iter().zip(bars) {
                    ui.label(RichText::new(format!("■ {label}: {count}")).color(color));
                }
            }
            Chart::Histogram { bins, .. } => {
                let total: usize = bins.iter().map(|b| b.count).sum();
                ui.strong(format!("{total} values, {} bins", bins.len()));
                for b in bins.iter().filter(|b| b.count > 0) {
                    ui.label(
                        RichText::new(format!("[{:.0}, {:.0}): {}", b.lower, b.upper, b.count))
                            .color(HISTOGRAM_FILL),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render one tab per chart plus the dataset name.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let mut clicked = None;
        for (i, chart) in state.charts.iter().enumerate() {
            if ui.selectable_label(state.active == i, chart.title()).clicked() {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            state.select(i);
        }

        ui.separator();
        ui.label(format!("Dataset: {}", state.dataset_name));
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for the archive to analyze. `None` when the dialog is cancelled.
pub fn pick_archive() -> Option<PathBuf> {
    let file = rfd::FileDialog::new()
        .set_title("Open World Bank archive")
        .add_filter("ZIP archives", &["zip"])
        .pick_file();
    match &file {
        Some(path) => log::info!("Selected {}", path.display()),
        None => log::warn!("File dialog cancelled"),
    }
    file
}

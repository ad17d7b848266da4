use eframe::egui;

use crate::chart::ChartSet;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartViewerApp {
    pub state: ViewerState,
}

impl ChartViewerApp {
    pub fn new(dataset_name: String, charts: ChartSet) -> Self {
        Self {
            state: ViewerState::new(dataset_name, charts),
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: chart tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: legend ----
        egui::SidePanel::left("legend_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(chart) = self.state.active_chart() {
                ui.heading(chart.title());
                plot::chart_plot(ui, self.state.active, chart);
            }
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn show(dataset_name: String, charts: ChartSet) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("{dataset_name} – Charts");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ChartViewerApp::new(dataset_name, charts)))),
    )
}

use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::chart::Chart;
use crate::color::{bar_colors, HISTOGRAM_FILL};
use crate::stats::HistogramBin;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render one chart in the central panel.
pub fn chart_plot(ui: &mut Ui, index: usize, chart: &Chart) {
    match chart {
        Chart::Histogram { bins, .. } => histogram_plot(ui, index, chart, bins),
        Chart::Bar { bars, .. } => bar_plot(ui, index, chart, bars),
    }
}

fn histogram_plot(ui: &mut Ui, index: usize, chart: &Chart, bins: &[HistogramBin]) {
    if bins.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No values to plot");
        });
        return;
    }

    // Contiguous bars: each spans its whole bin.
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                .width(b.upper - b.lower)
                .name(format!("[{:.0}, {:.0})", b.lower, b.upper))
                .fill(HISTOGRAM_FILL)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();

    Plot::new(("chart", index))
        .x_axis_label(chart.x_label())
        .y_axis_label(chart.y_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(chart.title()));
        });
}

fn bar_plot(ui: &mut Ui, index: usize, chart: &Chart, bars: &[(String, usize)]) {
    let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
    let plot_bars: Vec<Bar> = bar_colors(bars)
        .into_iter()
        .zip(bars)
        .enumerate()
        .map(|(i, ((label, color), (_, count)))| {
            Bar::new(i as f64, *count as f64)
                .width(0.8)
                .name(label)
                .fill(color)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();

    // Category names on the x axis, at integer positions only.
    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value;
        if pos.fract() != 0.0 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    };

    Plot::new(("chart", index))
        .x_axis_label(chart.x_label())
        .y_axis_label(chart.y_label())
        .x_axis_formatter(formatter)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(plot_bars).name(chart.title()));
        });
}

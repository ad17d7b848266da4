/// egui widgets of the chart window.
pub mod panels;
pub mod plot;

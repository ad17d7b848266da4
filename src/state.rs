use crate::chart::{Chart, ChartSet};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the chart window shows, independent of rendering.
pub struct ViewerState {
    /// Name of the selected dataset.
    pub dataset_name: String,

    /// Charts produced by the run, in production order.
    pub charts: Vec<Chart>,

    /// Index of the chart shown in the central panel.
    pub active: usize,
}

impl ViewerState {
    pub fn new(dataset_name: String, charts: ChartSet) -> Self {
        Self {
            dataset_name,
            charts: charts.charts,
            active: 0,
        }
    }

    pub fn active_chart(&self) -> Option<&Chart> {
        self.charts.get(self.active)
    }

    /// Show chart `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.charts.len() {
            self.active = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSink;

    #[test]
    fn select_stays_in_range() {
        let mut set = ChartSet::default();
        set.render(Chart::Bar {
            title: "a".into(),
            x_label: "a".into(),
            bars: vec![],
        });
        set.render(Chart::Histogram {
            title: "b".into(),
            x_label: "b".into(),
            bins: vec![],
        });
        let mut state = ViewerState::new("API.csv".into(), set);
        assert_eq!(state.active_chart().map(Chart::title), Some("a"));
        state.select(1);
        assert_eq!(state.active_chart().map(Chart::title), Some("b"));
        state.select(5);
        assert_eq!(state.active, 1);
    }
}

// ---------------------------------------------------------------------------
// Bucket scheme: continuous values → ordered labelled ranges
// ---------------------------------------------------------------------------

/// One `[lower, upper)` range of a [`BucketScheme`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: &'static str,
}

/// Contiguous, non-overlapping ranges covering `[0, ∞)`.
///
/// Each range includes its lower bound and excludes its upper bound; the last
/// one is unbounded above.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketScheme {
    buckets: Vec<Bucket>,
}

impl BucketScheme {
    /// Population-size categories used for country totals.
    pub fn population() -> Self {
        const M: f64 = 1_000_000.0;
        let edges = [0.0, M, 5.0 * M, 10.0 * M, 50.0 * M, 100.0 * M, 500.0 * M, f64::INFINITY];
        let labels = [
            "< 1M",
            "1M - 5M",
            "5M - 10M",
            "10M - 50M",
            "50M - 100M",
            "100M - 500M",
            "> 500M",
        ];
        let buckets = edges
            .windows(2)
            .zip(labels)
            .map(|(w, label)| Bucket {
                lower: w[0],
                upper: w[1],
                label,
            })
            .collect();
        BucketScheme { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Label of the range containing `value`, or `None` for negatives and NaN.
    pub fn classify(&self, value: f64) -> Option<&'static str> {
        let last = self.buckets.len().checked_sub(1)?;
        self.buckets.iter().enumerate().find_map(|(i, b)| {
            let below_upper = value < b.upper || (i == last && value == f64::INFINITY);
            (value >= b.lower && below_upper).then_some(b.label)
        })
    }

    /// Map every value to its label, producing the derived categorical series.
    pub fn bin(&self, values: &[f64]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|&v| self.classify(v).map(str::to_string))
            .collect()
    }
}

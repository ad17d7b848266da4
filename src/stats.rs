use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Number of equal-width bins in a histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Categories listed in the printed summary, at most.
pub const PRINTED_TOP: usize = 10;

// ---------------------------------------------------------------------------
// Continuous summary
// ---------------------------------------------------------------------------

/// Descriptive statistics of a numeric series with missing values removed.
///
/// For an empty series `count` is 0 and every statistic is NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n − 1); NaN below two values.
    pub std_dev: f64,
}

impl ContinuousSummary {
    pub fn compute(column: &str, values: &[f64]) -> Self {
        let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = clean.len();
        if n == 0 {
            return ContinuousSummary {
                column: column.to_string(),
                count: 0,
                mean: f64::NAN,
                median: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let mean = clean.iter().sum::<f64>() / n as f64;
        let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
        let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = clean.clone();
        sorted.sort_by(f64::total_cmp);
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let std_dev = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = clean.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        ContinuousSummary {
            column: column.to_string(),
            count: n,
            mean,
            median,
            min,
            max,
            std_dev,
        }
    }
}

impl fmt::Display for ContinuousSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{} - Summary Statistics:", self.column)?;
        writeln!(f, "  Count: {}", self.count)?;
        writeln!(f, "  Mean: {:.2}", self.mean)?;
        writeln!(f, "  Median: {:.2}", self.median)?;
        writeln!(f, "  Min: {:.2}", self.min)?;
        writeln!(f, "  Max: {:.2}", self.max)?;
        writeln!(f, "  Std Dev: {:.2}", self.std_dev)
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bin covering `[lower, upper)` (the last bin also includes
/// its upper edge).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins over `[min, max]`. A constant series is widened to
/// `[v - 0.5, v + 0.5]`. Empty input gives no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + i as f64 * width })
        .collect();

    // A value on an inner edge belongs to the bin that edge opens.
    let inner = &edges[1..bins];
    let mut counts = vec![0usize; bins];
    for v in finite {
        counts[inner.partition_point(|&e| e <= v)] += 1;
    }

    counts
        .into_iter()
        .zip(edges.windows(2))
        .map(|(count, w)| HistogramBin {
            lower: w[0],
            upper: w[1],
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Categorical frequencies
// ---------------------------------------------------------------------------

/// Frequency of each distinct non-missing value, by descending count. Ties
/// keep first-appearance order.
pub fn value_counts(series: &[Option<String>]) -> Vec<(String, usize)> {
    value_counts_with_levels(series, &[])
}

/// Like [`value_counts`], but every entry of `levels` is listed even when it
/// never occurs. Levels come first in their given order, so zero-count levels
/// keep that order among themselves.
pub fn value_counts_with_levels<'a>(
    series: &'a [Option<String>],
    levels: &[&'a str],
) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for &level in levels {
        if !index.contains_key(level) {
            index.insert(level, counts.len());
            counts.push((level.to_string(), 0));
        }
    }
    for value in series.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Summary of a categorical series with missing values removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    /// Distinct non-missing values.
    pub unique: usize,
    /// Non-missing values.
    pub total: usize,
    /// Most frequent categories, truncated to the requested top-N.
    pub top: Vec<(String, usize)>,
}

impl CategoricalSummary {
    /// `levels` lists categories that are reported even with a zero count.
    pub fn compute(column: &str, series: &[Option<String>], levels: &[&str], top_n: usize) -> Self {
        let mut counts = value_counts_with_levels(series, levels);
        let unique = counts.iter().filter(|(_, c)| *c > 0).count();
        let total = counts.iter().map(|(_, c)| c).sum();
        counts.truncate(top_n);
        CategoricalSummary {
            column: column.to_string(),
            unique,
            total,
            top: counts,
        }
    }
}

impl fmt::Display for CategoricalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{} - Summary:", self.column)?;
        writeln!(f, "  Total unique values: {}", self.unique)?;
        writeln!(f, "  Total count: {}", self.total)?;
        let shown = self.top.len().min(PRINTED_TOP);
        writeln!(f, "\n  Top {shown} values:")?;
        for (i, (value, count)) in self.top.iter().take(shown).enumerate() {
            writeln!(f, "    {}. {value}: {count}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn continuous_basic() {
        let s = ContinuousSummary::compute("x", &[2_000_000.0, 6_000_000.0]);
        assert_eq!(s.count, 2);
        assert_close(s.mean, 4_000_000.0);
        assert_close(s.median, 4_000_000.0);
        assert_close(s.min, 2_000_000.0);
        assert_close(s.max, 6_000_000.0);
        assert_close(s.std_dev, 8e12_f64.sqrt());
    }

    #[test]
    fn continuous_ordering_invariants() {
        let samples: [&[f64]; 4] = [
            &[1.0],
            &[5.0, -3.0, 10.0, 10.0, 0.5],
            &[1e9, 2.0, 3.0],
            &[7.0, 7.0, 7.0, 7.0],
        ];
        for values in samples {
            let s = ContinuousSummary::compute("x", values);
            assert_eq!(s.count, values.len());
            assert!(s.min <= s.median && s.median <= s.max);
            assert!(s.min <= s.mean && s.mean <= s.max);
        }
    }

    #[test]
    fn continuous_empty_is_nan_safe() {
        let s = ContinuousSummary::compute("x", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan() && s.median.is_nan() && s.std_dev.is_nan());
        let printed = s.to_string();
        assert!(printed.contains("Count: 0"));
        assert!(printed.contains("Mean: NaN"));
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = ContinuousSummary::compute("x", &[3.0]);
        assert_eq!(s.median, 3.0);
        assert!(s.std_dev.is_nan());
    }

    #[test]
    fn histogram_covers_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let bins = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[HISTOGRAM_BINS - 1].upper, 99.0);
        // max lands in the last bin
        assert!(bins[HISTOGRAM_BINS - 1].count >= 1);
    }

    #[test]
    fn histogram_constant_and_empty() {
        let bins = histogram(&[5.0, 5.0], 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins[0].lower, 4.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(histogram(&[], 30).is_empty());
    }

    #[test]
    fn values_on_inner_edges_open_their_bin() {
        let (lo, hi) = (0.1, 2.9);
        let edges: Vec<f64> = histogram(&[lo, hi], HISTOGRAM_BINS)
            .iter()
            .skip(1)
            .map(|b| b.lower)
            .collect();
        let mut values = vec![lo, hi];
        values.extend(&edges);

        let bins = histogram(&values, HISTOGRAM_BINS);
        for (i, bin) in bins.iter().enumerate() {
            let expected = if i + 1 == HISTOGRAM_BINS { 2 } else { 1 };
            assert_eq!(bin.count, expected, "bin {i} [{}, {})", bin.lower, bin.upper);
        }
    }

    #[test]
    fn levels_are_listed_with_zero_counts() {
        let series = vec![Some("b".to_string()), None, Some("c".to_string()), Some("c".to_string())];
        let counts = value_counts_with_levels(&series, &["a", "b", "c", "d"]);
        assert_eq!(
            counts,
            vec![
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("a".to_string(), 0),
                ("d".to_string(), 0),
            ]
        );

        let s = CategoricalSummary::compute("col", &series, &["a", "b", "c", "d"], 10);
        assert_eq!(s.unique, 2);
        assert_eq!(s.total, 3);
        assert_eq!(s.top.len(), 4);
        assert!(s.to_string().contains("    4. d: 0"));
    }

    #[test]
    fn value_counts_sorted_with_stable_ties() {
        let series: Vec<Option<String>> = ["b", "a", "b", "c", "a", "b"]
            .iter()
            .map(|s| Some(s.to_string()))
            .chain([None, None])
            .collect();
        let counts = value_counts(&series);
        assert_eq!(
            counts,
            vec![("b".to_string(), 3), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn categorical_summary_truncates_and_prints_at_most_ten() {
        let series: Vec<Option<String>> = (0..15)
            .flat_map(|i| std::iter::repeat(Some(format!("c{i}"))).take(15 - i))
            .collect();
        let s = CategoricalSummary::compute("col", &series, &[], 12);
        assert_eq!(s.unique, 15);
        assert_eq!(s.total, (1..=15).sum::<usize>());
        assert_eq!(s.top.len(), 12);

        let printed = s.to_string();
        assert!(printed.contains("Top 10 values:"));
        assert!(printed.contains("    1. c0: 15"));
        assert!(printed.contains("    10. c9: 6"));
        assert!(!printed.contains("11. "));
    }
}

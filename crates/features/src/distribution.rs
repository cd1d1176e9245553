//! Distribution summaries for histogram charts.
//!
//! Descriptive statistics plus fixed-width bins over a numeric column.

use hoops_core::{DistributionSummary, HistogramBin};
use statrs::statistics::{Data, Distribution, OrderStatistics};
use std::collections::BTreeMap;
use tracing::warn;

/// Upper bound on histogram bins; wider spans get no bins.
pub const MAX_HISTOGRAM_BINS: i64 = 10_000;

/// Summarize `values` with histogram bins of width `bin_width`.
///
/// Bins are aligned to multiples of `bin_width` and contiguous from the bin
/// holding the minimum to the bin holding the maximum, empty bins included.
/// Non-finite values are ignored. A non-positive width or a span needing more
/// than [`MAX_HISTOGRAM_BINS`] bins leaves `bins` empty.
pub fn summarize(values: &[f64], bin_width: f64) -> DistributionSummary {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return DistributionSummary::empty();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut data = Data::new(finite.clone());
    let mean = data.mean();
    // Sample standard deviation needs two observations.
    let std_dev = if finite.len() > 1 { data.std_dev() } else { None };
    let median = data.median();

    DistributionSummary {
        count: finite.len(),
        mean,
        std_dev: std_dev.filter(|s| s.is_finite()),
        min: Some(min),
        median: Some(median),
        max: Some(max),
        bins: histogram(&finite, bin_width),
    }
}

fn histogram(values: &[f64], bin_width: f64) -> Vec<HistogramBin> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        warn!(bin_width, "invalid histogram bin width");
        return Vec::new();
    }

    let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
    for &v in values {
        let idx = (v / bin_width).floor() as i64;
        *counts.entry(idx).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };
    if last.saturating_sub(first) >= MAX_HISTOGRAM_BINS {
        warn!(bin_width, first, last, "too many histogram bins");
        return Vec::new();
    }

    (first..=last)
        .map(|idx| HistogramBin {
            lower: idx as f64 * bin_width,
            upper: (idx + 1) as f64 * bin_width,
            count: counts.get(&idx).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary() {
        let values = [0.5, 1.0, 1.25, 1.5, 2.75];
        let summary = summarize(&values, 0.5);

        assert_eq!(summary.count, 5);
        assert_abs_diff_eq!(summary.mean.unwrap(), 1.4, epsilon = 1e-10);
        assert_abs_diff_eq!(summary.median.unwrap(), 1.25, epsilon = 1e-10);
        assert_eq!(summary.min, Some(0.5));
        assert_eq!(summary.max, Some(2.75));
        assert!(summary.std_dev.unwrap() > 0.0);

        // [0.5,1.0) [1.0,1.5) [1.5,2.0) [2.0,2.5) [2.5,3.0)
        let counts: Vec<u32> = summary.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 0, 1]);
        assert_abs_diff_eq!(summary.bins[0].lower, 0.5);
        assert_abs_diff_eq!(summary.bins[4].upper, 3.0);
        assert_eq!(counts.iter().sum::<u32>() as usize, summary.count);
    }

    #[test]
    fn test_single_value() {
        let summary = summarize(&[1.0], 0.5);
        assert_eq!(summary.count, 1);
        assert!(summary.std_dev.is_none());
        assert_eq!(summary.bins.len(), 1);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert_eq!(summarize(&[], 0.1), DistributionSummary::empty());
        assert_eq!(summarize(&[f64::NAN], 0.1), DistributionSummary::empty());
    }

    #[test]
    fn test_bin_count_bounded() {
        let summary = summarize(&[0.0, 3.0], 1e-9);
        assert_eq!(summary.count, 2);
        assert!(summary.bins.is_empty());

        assert!(summarize(&[1.0, 2.0], 0.0).bins.is_empty());
        assert_eq!(summarize(&[1.0, 2.0], 0.5).bins.len(), 3);
    }
}

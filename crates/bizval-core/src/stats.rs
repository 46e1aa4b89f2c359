use serde::{Deserialize, Serialize};

/// Summary statistics over a set of simulated valuations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p90: f64,
}

/// A single histogram bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
    pub frequency: f64,
}

/// Compute the percentile value from a **sorted** slice using linear
/// interpolation on the fractional rank `p/100 * (n-1)`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Compute descriptive statistics for a **sorted** slice.
pub fn summarize(sorted: &[f64]) -> SampleSummary {
    assert!(!sorted.is_empty());
    let n = sorted.len() as f64;

    let mean = sorted.iter().sum::<f64>() / n;

    let median = if sorted.len() % 2 == 0 {
        let mid = sorted.len() / 2;
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };

    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    SampleSummary {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        p10: percentile_sorted(sorted, 10.0),
        p90: percentile_sorted(sorted, 90.0),
    }
}

/// Build a histogram with `num_bins` equal-width bins over a **sorted** slice.
pub fn build_histogram(sorted: &[f64], num_bins: usize) -> Vec<HistogramBin> {
    let min_val = sorted[0];
    let max_val = sorted[sorted.len() - 1];

    // Degenerate sample sets collapse to a single bin
    if (max_val - min_val).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min_val,
            upper: max_val,
            count: sorted.len() as u32,
            frequency: 1.0,
        }];
    }

    let bin_width = (max_val - min_val) / num_bins as f64;
    let n = sorted.len() as f64;

    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| {
            let lower = min_val + i as f64 * bin_width;
            let upper = if i == num_bins - 1 {
                max_val
            } else {
                min_val + (i + 1) as f64 * bin_width
            };
            HistogramBin {
                lower,
                upper,
                count: 0,
                frequency: 0.0,
            }
        })
        .collect();

    for &val in sorted {
        let mut idx = ((val - min_val) / bin_width).floor() as usize;
        if idx >= num_bins {
            idx = num_bins - 1;
        }
        bins[idx].count += 1;
    }

    for bin in &mut bins {
        bin.frequency = bin.count as f64 / n;
    }

    bins
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percentile_known_answers_size_ten() {
        // Ten synthetic samples: rank(p10) = 0.1 * 9 = 0.9, rank(p90) = 8.1
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        let p10 = percentile_sorted(&sorted, 10.0);
        let p90 = percentile_sorted(&sorted, 90.0);
        assert!((p10 - 1.9).abs() < 1e-12, "p10={p10}");
        assert!((p90 - 9.1).abs() < 1e-12, "p90={p90}");
    }

    #[test]
    fn test_percentile_endpoints() {
        let sorted = vec![2.0, 4.0, 6.0, 8.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), 2.0);
        assert_eq!(percentile_sorted(&sorted, 100.0), 8.0);
        assert_eq!(percentile_sorted(&sorted, 50.0), 5.0);
    }

    #[test]
    fn test_percentile_single_sample() {
        assert_eq!(percentile_sorted(&[7.5], 10.0), 7.5);
        assert_eq!(percentile_sorted(&[7.5], 90.0), 7.5);
    }

    #[test]
    fn test_summarize_even_count() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        let s = summarize(&sorted);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        // Population variance of 1..4 = 1.25
        assert!((s.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_odd_count() {
        let sorted = vec![10.0, 20.0, 40.0];
        let s = summarize(&sorted);
        assert_eq!(s.median, 20.0);
    }

    #[test]
    fn test_histogram_counts_and_frequency() {
        let sorted: Vec<f64> = (0..100).map(f64::from).collect();
        let bins = build_histogram(&sorted, 20);
        assert_eq!(bins.len(), 20);
        let total: u32 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 100);
        let total_freq: f64 = bins.iter().map(|b| b.frequency).sum();
        assert!((total_freq - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_histogram_constant_samples_single_bin() {
        let sorted = vec![5.0; 50];
        let bins = build_histogram(&sorted, 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 50);
        assert_eq!(bins[0].frequency, 1.0);
    }
}

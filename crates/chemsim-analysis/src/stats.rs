//! Summary statistics behind the plots and the correlation diagnostic.

use std::f64::consts::PI;

use serde::Serialize;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Quantile of already-sorted data with linear interpolation between
/// closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Box-plot geometry with Tukey whiskers at 1.5 IQR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let data = sorted(values);
    let q1 = quantile_sorted(&data, 0.25)?;
    let median = quantile_sorted(&data, 0.5)?;
    let q3 = quantile_sorted(&data, 0.75)?;
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let inside: Vec<f64> = data.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence).collect();
    let lower_whisker = inside.first().copied().unwrap_or(q1);
    let upper_whisker = inside.last().copied().unwrap_or(q3);
    let outliers = data.iter().copied().filter(|v| *v < lo_fence || *v > hi_fence).collect();

    Some(BoxStats { q1, median, q3, lower_whisker, upper_whisker, outliers })
}

/// Scott's rule: sample std times n^(-1/5). Constant data falls back to a
/// unit bandwidth.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sd = std_dev(values).unwrap_or(0.0);
    if sd <= f64::EPSILON {
        return Some(1.0);
    }
    Some(sd * (values.len() as f64).powf(-0.2))
}

/// A Gaussian kernel density estimate sampled on an even grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Kde {
    pub bandwidth: f64,
    pub points: Vec<(f64, f64)>,
}

/// Estimate the density on `samples` grid points spanning the data
/// extended by three bandwidths on each side.
pub fn gaussian_kde(values: &[f64], samples: usize) -> Option<Kde> {
    let bandwidth = scott_bandwidth(values)?;
    let data = sorted(values);
    let lo = data[0] - 3.0 * bandwidth;
    let hi = data[data.len() - 1] + 3.0 * bandwidth;
    let samples = samples.max(2);
    let step = (hi - lo) / (samples - 1) as f64;
    let norm = 1.0 / (data.len() as f64 * bandwidth * (2.0 * PI).sqrt());

    let points = (0..samples)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = data
                .iter()
                .map(|xi| {
                    let u = (x - xi) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect();
    Some(Kde { bandwidth, points })
}

/// Distinct values with their frequencies, ascending by value.
pub fn value_counts(values: &[f64]) -> Vec<(f64, usize)> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for v in sorted(values) {
        match counts.last_mut() {
            Some((last, n)) if *last == v => *n += 1,
            _ => counts.push((v, 1)),
        }
    }
    counts
}

/// Pearson correlation; NaN when either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let (Some(mx), Some(my)) = (mean(x), mean(y)) else {
        return f64::NAN;
    };
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    sxy / (sxx.sqrt() * syy.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quartiles_interpolate() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&data, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&data, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&data, 0.75), Some(3.25));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_box_stats_outliers() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.upper_whisker, 5.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert!(stats.iqr() > 0.0);
    }

    #[test]
    fn test_box_stats_single_value() {
        let stats = box_stats(&[7.0]).unwrap();
        assert_eq!((stats.q1, stats.median, stats.q3), (7.0, 7.0, 7.0));
        assert!(stats.outliers.is_empty());
        assert!(box_stats(&[]).is_none());
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [1.0, 1.5, 2.0, 2.2, 3.0, 4.5];
        let kde = gaussian_kde(&values, 512).unwrap();
        let area: f64 = kde
            .points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum();
        assert!((area - 1.0).abs() < 0.01, "area = {area}");
        assert!(kde.points.iter().all(|(_, d)| *d >= 0.0));
    }

    #[test]
    fn test_scott_bandwidth() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = std_dev(&values).unwrap() * 8f64.powf(-0.2);
        assert!((scott_bandwidth(&values).unwrap() - expected).abs() < 1e-12);
        assert_eq!(scott_bandwidth(&[3.0, 3.0]), Some(1.0));
    }

    #[test]
    fn test_value_counts() {
        let counts = value_counts(&[2.0, 1.0, 2.0, 0.0, 2.0]);
        assert_eq!(counts, vec![(0.0, 1), (1.0, 1), (2.0, 3)]);
    }

    #[test]
    fn test_pearson() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]).is_nan());
    }
}

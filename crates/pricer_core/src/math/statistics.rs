//! Sample statistics for simulated distributions.
//!
//! All functions return `None` for an empty sample instead of NaN.
//!
//! ## Percentile Convention
//!
//! Percentiles use linear interpolation between order statistics: for a
//! sorted sample `x[0..n]` and `q` in `[0, 100]`,
//!
//! ```text
//! rank = q / 100 · (n - 1)
//! P(q) = x[⌊rank⌋] + (rank - ⌊rank⌋) · (x[⌈rank⌉] - x[⌊rank⌋])
//! ```

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::population_std;
///
/// let std = population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((std - 2.0).abs() < 1e-12);
/// ```
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Sample standard deviation (divides by `n - 1`).
///
/// Returns `None` for fewer than two observations.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mu = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Single percentile with linear interpolation.
///
/// `q` is clamped to `[0, 100]`.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    percentiles(values, &[q]).map(|p| p[0])
}

/// Several percentiles from one sort of the sample.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::percentiles;
///
/// let sample: Vec<f64> = (1..=100).map(f64::from).collect();
/// let p = percentiles(&sample, &[5.0, 1.0]).unwrap();
/// assert!((p[0] - 5.95).abs() < 1e-12);
/// assert!((p[1] - 1.99).abs() < 1e-12);
/// ```
pub fn percentiles(values: &[f64], qs: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(qs.iter().map(|&q| interpolate_sorted(&sorted, q)).collect())
}

fn interpolate_sorted(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = (q.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// One bin of an equal-width histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge (inclusive for the last bin)
    pub upper: f64,
    /// Number of observations in the bin
    pub count: usize,
}

/// Equal-width histogram between the sample minimum and maximum.
///
/// Bin index is `⌊(v - min) / width⌋`, capped at `bins - 1` so the maximum
/// lands in the last bin. A degenerate sample (all values equal) puts every
/// observation in the first bin. Returns an empty vector for an empty sample
/// or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let index = if width > 0.0 {
            (((v - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        result[index].count += 1;
    }

    result
}

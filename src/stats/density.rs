use thiserror::Error;

use crate::data::schema::Schema;
use crate::data::table::Table;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A column requested for plotting cannot be visualized.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    #[error("column '{0}' does not exist")]
    UnknownColumn(String),
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

// ---------------------------------------------------------------------------
// Histogram + kernel density estimate
// ---------------------------------------------------------------------------

/// One histogram bin over `[lo, hi)` (the last bin is closed on both ends).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// The empirical distribution of one numeric column: binned counts plus a
/// smoothed density curve over the same support.
///
/// Fully deterministic: the same column always produces the same bins and
/// the same density points.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// (x, probability density) points; integrates to ≈ 1. Empty when the
    /// column is empty or has zero spread.
    pub density: Vec<[f64; 2]>,
    /// Number of non-missing values behind the histogram.
    pub sample_count: usize,
}

/// Density curve resolution.
const GRID_SIZE: usize = 200;
/// The curve extends this many bandwidths beyond the data range.
const GRID_CUT: f64 = 3.0;
const MAX_BINS: usize = 512;

impl Distribution {
    /// Build the distribution of one numeric column.
    ///
    /// The column must exist and be listed in the schema's numeric columns
    /// (the target column qualifies when numeric). Missing cells are
    /// excluded before binning.
    pub fn sample(
        table: &Table,
        schema: &Schema,
        column: &str,
    ) -> Result<Distribution, DistributionError> {
        let col = table
            .column(column)
            .ok_or_else(|| DistributionError::UnknownColumn(column.to_string()))?;
        if !schema.is_numeric(column) {
            return Err(DistributionError::NotNumeric(column.to_string()));
        }

        let mut values: Vec<f64> = col.numeric_values().collect();
        values.sort_by(f64::total_cmp);

        Ok(Distribution {
            column: column.to_string(),
            bins: histogram(&values),
            density: kernel_density(&values),
            sample_count: values.len(),
        })
    }

    /// Width of the (uniform) bins; 0 when there are none.
    pub fn bin_width(&self) -> f64 {
        self.bins.first().map_or(0.0, HistogramBin::width)
    }
}

// -- Histogram --

/// Bin the sorted values. Bin count follows the "auto" rule of the usual
/// plotting stacks: the larger of the Sturges and Freedman–Diaconis
/// estimates, capped at [`MAX_BINS`].
fn histogram(sorted: &[f64]) -> Vec<HistogramBin> {
    let n = sorted.len();
    if n == 0 {
        return Vec::new();
    }
    let min = sorted[0];
    let max = sorted[n - 1];

    if min == max {
        // Zero spread: one unit-wide bin holding everything.
        return vec![HistogramBin {
            lo: min - 0.5,
            hi: min + 0.5,
            count: n,
        }];
    }

    let range = max - min;
    let n_bins = auto_bin_count(sorted, range).clamp(1, MAX_BINS);
    let width = range / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for &v in sorted {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

fn auto_bin_count(sorted: &[f64], range: f64) -> usize {
    let n = sorted.len() as f64;

    let sturges = (n.log2().ceil() as usize) + 1;

    let iqr = quantile(sorted, 0.75) - quantile(sorted, 0.25);
    let fd = if iqr > 0.0 {
        let width = 2.0 * iqr / n.cbrt();
        (range / width).ceil() as usize
    } else {
        0
    };

    sturges.max(fd)
}

/// Linearly interpolated quantile of sorted data, `q` in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 < n {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[n - 1]
    }
}

// -- Kernel density estimate --

/// Gaussian KDE with Scott's-rule bandwidth, evaluated on a fixed grid
/// spanning the data range plus [`GRID_CUT`] bandwidths on each side.
fn kernel_density(sorted: &[f64]) -> Vec<[f64; 2]> {
    let n = sorted.len();
    if n < 2 {
        return Vec::new();
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = var.sqrt();
    if std_dev <= 0.0 {
        return Vec::new();
    }

    let bandwidth = std_dev * (n as f64).powf(-0.2);
    let lo = sorted[0] - GRID_CUT * bandwidth;
    let hi = sorted[n - 1] + GRID_CUT * bandwidth;
    let step = (hi - lo) / (GRID_SIZE - 1) as f64;

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    (0..GRID_SIZE)
        .map(|i| {
            let x = lo + i as f64 * step;
            let y = sorted
                .iter()
                .map(|&v| {
                    let t = (x - v) / bandwidth;
                    (-0.5 * t * t).exp()
                })
                .sum::<f64>()
                * norm;
            [x, y]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

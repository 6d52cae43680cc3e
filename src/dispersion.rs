//! Dispersion summaries over flat lists of values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxAvg {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStdDev {
    pub average: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Compute the minimum, maximum and average of `vals` in a single pass.
///
/// For an empty slice the result is degenerate (`min = f64::MAX`,
/// `max = -f64::MAX`, `avg = 0`): check for emptiness before trusting it.
pub fn min_max_avg(vals: &[f64]) -> MinMaxAvg {
    let mut res = MinMaxAvg {
        min: f64::MAX,
        max: -f64::MAX,
        avg: 0.0,
    };
    if vals.is_empty() {
        return res;
    }

    let mut sum = 0.0;
    for &val in vals {
        sum += val;
        res.max = res.max.max(val);
        res.min = res.min.min(val);
    }
    res.avg = sum / vals.len() as f64;

    res
}

/// Range of `vals` (`max - min`), or 0 if empty.
pub fn discrepancy(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return 0.0;
    }
    let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Arithmetic mean and population standard deviation (divisor `N`).
pub fn standard_deviation(vals: &[f64]) -> MeanStdDev {
    if vals.is_empty() {
        return MeanStdDev {
            average: None,
            std_dev: None,
        };
    }
    let n_vals = vals.len() as f64;
    let mean = vals.iter().sum::<f64>() / n_vals;
    let var = vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / n_vals;
    MeanStdDev {
        average: Some(mean),
        std_dev: Some(var.sqrt()),
    }
}

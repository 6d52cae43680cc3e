//! Least-squares trend scores.
//!
//! A trend score is the slope of the fitted line evaluated at the last
//! sample, relative to the intercept and scaled by 100. Two historical
//! formulations are kept because existing consumers depend on their exact
//! rounding and degenerate-input behavior.

use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};

const SCALE: f64 = 100.0;

/// Observation used for trend fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
}

impl Sample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Trend formulation selectable by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendMethod {
    /// Centered moments, intercept guarded against zero.
    #[default]
    Centered,
    /// Closed form over raw sums, no guard on any denominator.
    ClosedForm,
    /// Closed form, `None` when a denominator is nearly zero.
    ClosedFormChecked,
}

impl TrendMethod {
    pub fn score(self, samples: &[Sample], tol: Tolerance) -> Option<f64> {
        match self {
            Self::Centered => Some(least_squares_trend(samples, tol)),
            Self::ClosedForm => Some(least_squares_trend_alt(samples)),
            Self::ClosedFormChecked => least_squares_trend_alt_checked(samples, tol),
        }
    }
}

/// Build samples from `vals` using 1-based indices as x values.
pub fn samples_from_values(vals: &[f64]) -> Vec<Sample> {
    vals.iter()
        .enumerate()
        .map(|(idx, &val)| Sample::new((idx + 1) as f32, val as f32))
        .collect()
}

/// Round `val` to `digits` decimals, resolving midpoints to the even neighbour.
pub fn round_to(val: f64, digits: i32) -> f64 {
    let pow = 10_f64.powi(digits);
    (val * pow).round_ties_even() / pow
}

/// Trend score from the centered-moments least-squares fit, rounded to 2 decimals.
///
/// Returns 0 for an empty slice. When the intercept is nearly zero the score
/// is not normalized by it.
pub fn least_squares_trend(samples: &[Sample], tol: Tolerance) -> f64 {
    let Some(last) = samples.last() else {
        return 0.0;
    };
    let xn = f64::from(last.x);

    let n_samples = samples.len() as f64;
    let (sum_x, sum_y) = samples.iter().fold((0.0, 0.0), |(sx, sy), s| {
        (sx + f64::from(s.x), sy + f64::from(s.y))
    });
    let avg_x = sum_x / n_samples;
    let avg_y = sum_y / n_samples;

    let mut sum_xy_dev = 0.0;
    let mut sum_x_dev_2 = 0.0;
    for s in samples {
        let x_dev = f64::from(s.x) - avg_x;
        sum_xy_dev += x_dev * (f64::from(s.y) - avg_y);
        sum_x_dev_2 += x_dev.powi(2);
    }

    let a = sum_xy_dev / sum_x_dev_2;
    let b = avg_y - a * avg_x;

    let trend = if tol.nearly_zero(b) {
        a * xn * SCALE
    } else {
        a * xn / b.abs() * SCALE
    };
    round_to(trend, 2)
}

struct ClosedForm {
    a1: f64,
    b: f64,
    den: f64,
    xn: f64,
}

fn closed_form(samples: &[Sample]) -> Option<ClosedForm> {
    let last = samples.last()?;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x_2 = 0.0;
    for s in samples {
        sum_x += f64::from(s.x);
        sum_y += f64::from(s.y);
        // The product is formed in single precision.
        sum_xy += f64::from(s.x * s.y);
        sum_x_2 += f64::from(s.x).powi(2);
    }

    let n_samples = samples.len() as f64;
    let den = n_samples * sum_x_2 - sum_x.powi(2);
    let a1 = (n_samples * sum_xy - sum_x * sum_y) / den;
    let b = (sum_y * sum_x_2 - sum_x * sum_xy) / den;

    Some(ClosedForm {
        a1,
        b,
        den,
        xn: f64::from(last.x),
    })
}

/// Trend score from the closed-form least-squares fit, rounded to 4 decimals.
///
/// Returns 0 for an empty slice. No denominator is guarded: degenerate input
/// (a single distinct x, or a zero intercept) yields a non-finite score.
pub fn least_squares_trend_alt(samples: &[Sample]) -> f64 {
    match closed_form(samples) {
        Some(fit) => round_to(fit.a1 * fit.xn / fit.b * SCALE, 4),
        None => 0.0,
    }
}

/// Same as [`least_squares_trend_alt`], but `None` when the normal-equation
/// determinant or the intercept is nearly zero.
pub fn least_squares_trend_alt_checked(samples: &[Sample], tol: Tolerance) -> Option<f64> {
    let Some(fit) = closed_form(samples) else {
        return Some(0.0);
    };
    if tol.nearly_zero(fit.den) || tol.nearly_zero(fit.b) {
        return None;
    }
    Some(round_to(fit.a1 * fit.xn / fit.b * SCALE, 4))
}

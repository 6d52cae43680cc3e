//! Time-weighted statistics of signals known only at discrete timestamps.
//!
//! Between two consecutive observations the signal is taken to vary
//! linearly. Segment integrals are weighted by their duration in minutes and
//! normalized by the elapsed time. Every function expects the series sorted
//! by timestamp and returns `None` when there is not enough data.
//!
//! The `_skip_nulls` variants bridge missing observations: each value is
//! paired with the closest earlier point that carries one, and only those
//! bridged intervals count toward the normalizing duration.

use crate::series::TimedValue;
use crate::tolerance::Tolerance;
use chrono::{DateTime, Utc};

const ONE_THIRD: f64 = 1.0 / 3.0;

fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    (delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9) / 60.0
}

/// Trapezoid over one segment.
fn linear_segment(prev_val: f64, val: f64, minutes: f64) -> f64 {
    ((prev_val + val) / 2.0) * minutes
}

/// Integral of the squared linear interpolant, before the 1/3 factor.
fn square_segment(prev_val: f64, val: f64, minutes: f64) -> f64 {
    minutes * (prev_val.powi(2) + val.powi(2) + prev_val * val)
}

fn integrate(series: &[TimedValue<f64>], kernel: fn(f64, f64, f64) -> f64) -> f64 {
    let mut sum = 0.0;
    for pair in series.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        sum += kernel(prev.value, curr.value, minutes_between(prev.time, curr.time));
    }
    sum
}

/// Returns the weighted sum and the total duration of the bridged intervals.
fn integrate_skip_nulls(
    series: &[TimedValue<Option<f64>>],
    kernel: fn(f64, f64, f64) -> f64,
) -> (f64, f64) {
    let mut sum = 0.0;
    let mut duration = 0.0;
    let mut prev: Option<TimedValue<f64>> = None;
    for pt in series {
        let Some(val) = pt.value else {
            continue;
        };
        if let Some(prev) = prev {
            let minutes = minutes_between(prev.time, pt.time);
            sum += kernel(prev.value, val, minutes);
            duration += minutes;
        }
        prev = Some(TimedValue::new(pt.time, val));
    }
    (sum, duration)
}

/// Time-weighted mean (trapezoidal rule).
///
/// If the first and last timestamps coincide the first value is returned.
pub fn time_weighted_average(series: &[TimedValue<f64>]) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    if first.time == last.time {
        return Some(first.value);
    }

    let sum = integrate(series, linear_segment);
    Some((1.0 / minutes_between(first.time, last.time)) * sum)
}

/// Time-weighted mean ignoring missing values.
///
/// `None` if no point has a value or if the bridged intervals span no time.
pub fn time_weighted_average_skip_nulls(
    series: &[TimedValue<Option<f64>>],
    tol: Tolerance,
) -> Option<f64> {
    if !series.iter().any(|pt| pt.value.is_some()) {
        return None;
    }
    let (first, last) = (series.first()?, series.last()?);
    if first.time == last.time {
        return first.value;
    }

    let (sum, duration) = integrate_skip_nulls(series, linear_segment);
    if tol.nearly_zero(duration) {
        return None;
    }
    Some((1.0 / duration) * sum)
}

/// Time-weighted mean of the squared signal, normalized by the total elapsed time.
///
/// If the first and last timestamps coincide the first value is returned
/// unsquared.
pub fn time_weighted_average_of_square(series: &[TimedValue<f64>]) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    if first.time == last.time {
        return Some(first.value);
    }

    let sum = integrate(series, square_segment);
    Some((ONE_THIRD * sum) / minutes_between(first.time, last.time))
}

/// Time-weighted mean of the squared signal ignoring missing values.
///
/// Normalized by the duration of the bridged intervals only, then scaled by 1/3.
pub fn time_weighted_average_of_square_skip_nulls(
    series: &[TimedValue<Option<f64>>],
    tol: Tolerance,
) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    if first.time == last.time {
        return first.value;
    }

    let (sum, duration) = integrate_skip_nulls(series, square_segment);
    if tol.nearly_zero(duration) {
        return None;
    }
    let avg_square = (1.0 / duration) * sum;
    Some(ONE_THIRD * avg_square)
}

/// Time-weighted standard deviation given the series' time-weighted `average`.
pub fn time_weighted_std_dev(series: &[TimedValue<f64>], average: f64) -> Option<f64> {
    let avg_square = time_weighted_average_of_square(series)?;
    Some((avg_square - average.powi(2)).sqrt())
}

/// Time-weighted standard deviation ignoring missing values.
pub fn time_weighted_std_dev_skip_nulls(
    series: &[TimedValue<Option<f64>>],
    average: f64,
    tol: Tolerance,
) -> Option<f64> {
    let avg_square = time_weighted_average_of_square_skip_nulls(series, tol)?;
    Some((avg_square - average.powi(2)).sqrt())
}

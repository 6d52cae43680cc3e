//! Trend, dispersion and time-weighted statistics over ordered series.
//!
//! All statistics are pure functions over caller-owned slices: they never
//! mutate their input, keep no state between calls and report missing data
//! as `None` (or 0 where documented) instead of failing.

pub mod analysis;
pub mod dispersion;
pub mod integrate;
pub mod series;
pub mod tolerance;
pub mod trend;

pub use dispersion::{MeanStdDev, MinMaxAvg, discrepancy, min_max_avg, standard_deviation};
pub use integrate::{
    time_weighted_average, time_weighted_average_of_square,
    time_weighted_average_of_square_skip_nulls, time_weighted_average_skip_nulls,
    time_weighted_std_dev, time_weighted_std_dev_skip_nulls,
};
pub use series::{Series, TimedValue};
pub use tolerance::{DEFAULT_EPSILON, Tolerance};
pub use trend::{
    Sample, TrendMethod, least_squares_trend, least_squares_trend_alt,
    least_squares_trend_alt_checked,
};

use crate::dispersion::{self, MeanStdDev, MinMaxAvg};
use crate::integrate;
use crate::series::Series;
use crate::tolerance::Tolerance;
use crate::trend::{self, TrendMethod};
use anyhow::{Context, Result};
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWeightedReport {
    pub average: Option<f64>,
    pub average_of_square: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Summary statistics of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub n_points: usize,
    pub n_values: usize,
    /// `None` when the series holds no value.
    pub min_max_avg: Option<MinMaxAvg>,
    pub discrepancy: f64,
    pub mean_std_dev: MeanStdDev,
    /// Trend of the present values against their 1-based position.
    pub trend: Option<f64>,
    pub time_weighted: TimeWeightedReport,
}

impl SeriesReport {
    /// Load a MessagePack-encoded report from a file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let report = decode::from_read(&mut reader).context("failed to deserialize report")?;
        Ok(report)
    }

    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write(&mut writer, self).context("failed to serialize report")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }
}

/// Computes [`SeriesReport`]s with a fixed tolerance and trend method.
pub struct Analyzer {
    tol: Tolerance,
    trend_method: TrendMethod,
}

impl Analyzer {
    pub fn new(tol: Tolerance, trend_method: TrendMethod) -> Self {
        Self { tol, trend_method }
    }

    pub fn analyze(&self, series: &Series) -> SeriesReport {
        let vals = series.values();

        let samples = trend::samples_from_values(&vals);

        SeriesReport {
            n_points: series.len(),
            n_values: vals.len(),
            min_max_avg: (!vals.is_empty()).then(|| dispersion::min_max_avg(&vals)),
            discrepancy: dispersion::discrepancy(&vals),
            mean_std_dev: dispersion::standard_deviation(&vals),
            trend: self.trend_method.score(&samples, self.tol),
            time_weighted: self.time_weighted(series),
        }
    }

    fn time_weighted(&self, series: &Series) -> TimeWeightedReport {
        // Value-complete series keep the legacy normalization by total elapsed time.
        if let Some(complete) = series.to_complete() {
            log::debug!("integrating complete series of {} points", complete.len());
            let average = integrate::time_weighted_average(&complete);
            return TimeWeightedReport {
                average,
                average_of_square: integrate::time_weighted_average_of_square(&complete),
                std_dev: average.and_then(|avg| integrate::time_weighted_std_dev(&complete, avg)),
            };
        }

        log::debug!("integrating series with missing values, skipping gaps");
        let points = &series.points;
        let average = integrate::time_weighted_average_skip_nulls(points, self.tol);
        TimeWeightedReport {
            average,
            average_of_square: integrate::time_weighted_average_of_square_skip_nulls(
                points, self.tol,
            ),
            std_dev: average
                .and_then(|avg| integrate::time_weighted_std_dev_skip_nulls(points, avg, self.tol)),
        }
    }
}

//! Timestamped series and their on-disk representation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Value observed at a point in time.
///
/// `V` is `f64` for value-complete series and `Option<f64>` for series that
/// may miss observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedValue<V = f64> {
    pub time: DateTime<Utc>,
    pub value: V,
}

impl<V> TimedValue<V> {
    pub fn new(time: DateTime<Utc>, value: V) -> Self {
        Self { time, value }
    }
}

/// Series of possibly missing observations, sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<TimedValue<Option<f64>>>,
}

impl Series {
    pub fn new(points: Vec<TimedValue<Option<f64>>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Present values, in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|pt| pt.value).collect()
    }

    /// Value-complete copy of the series, or `None` if any value is missing.
    pub fn to_complete(&self) -> Option<Vec<TimedValue<f64>>> {
        self.points
            .iter()
            .map(|pt| pt.value.map(|value| TimedValue::new(pt.time, value)))
            .collect()
    }

    /// Check that timestamps never decrease.
    ///
    /// The statistics functions assume sorted input and do not check it
    /// themselves; call this first to fail fast on unordered data.
    pub fn check_ordered(&self) -> Result<()> {
        for (idx, pair) in self.points.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                bail!(
                    "point {} ({}) precedes point {} ({})",
                    idx + 1,
                    pair[1].time,
                    idx,
                    pair[0].time
                );
            }
        }
        Ok(())
    }

    /// Load a MessagePack-encoded [`Series`] from a file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let series = decode::from_read(&mut reader).context("failed to deserialize series")?;
        Ok(series)
    }

    /// Save the series to a file, MessagePack-encoded.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write(&mut writer, self).context("failed to serialize series")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }
}

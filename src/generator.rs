use crate::config::GenerateConfig;
use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Bernoulli, Exp, Normal};
use seriestats::{Series, TimedValue};

/// Synthetic series generator.
///
/// Produces irregularly sampled random walks: gaps between points are
/// exponentially distributed, steps are normally distributed and each point
/// may miss its value.
pub struct Generator {
    cfg: GenerateConfig,
    rng: ChaCha12Rng,
}

impl Generator {
    /// Create a new `Generator`, seeded from the configuration or from the OS.
    pub fn new(cfg: GenerateConfig) -> Result<Self> {
        let rng = match cfg.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };
        Ok(Self { cfg, rng })
    }

    /// Generate one series.
    pub fn generate_series(&mut self) -> Result<Series> {
        let gap_dist = Exp::new(1.0 / self.cfg.mean_gap_minutes)?;
        let step_dist = Normal::new(0.0, self.cfg.step_std_dev)?;
        let missing_dist = Bernoulli::new(self.cfg.prob_missing)?;

        let mut time = self.cfg.start.unwrap_or_else(Utc::now);
        let mut val = self.cfg.initial_value;

        let mut points = Vec::with_capacity(self.cfg.n_points);
        for _ in 0..self.cfg.n_points {
            let value = if missing_dist.sample(&mut self.rng) {
                None
            } else {
                Some(val)
            };
            points.push(TimedValue::new(time, value));

            let gap_ms = (gap_dist.sample(&mut self.rng) * 60_000.0).round() as i64;
            let gap = TimeDelta::try_milliseconds(gap_ms).context("gap is out of range")?;
            time = time
                .checked_add_signed(gap)
                .context("timestamp is out of range")?;
            val += step_dist.sample(&mut self.rng);
        }

        Ok(Series::new(points))
    }
}

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use seriestats::{DEFAULT_EPSILON, Tolerance, TrendMethod};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Tool configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub generate: GenerateConfig,
}

/// Parameters of the statistics.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Tolerance of the near-zero guards.
    pub epsilon: f64,
    /// Trend formulation.
    pub trend_method: TrendMethod,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            trend_method: TrendMethod::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.epsilon)
    }
}

/// Parameters of the synthetic series generator.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Number of points per series.
    pub n_points: usize,
    /// Mean of the exponentially distributed gaps between points.
    pub mean_gap_minutes: f64,
    /// Standard deviation of the random walk steps.
    pub step_std_dev: f64,
    /// Value of the first point.
    pub initial_value: f64,
    /// Probability that a point has no value.
    pub prob_missing: f64,
    /// Timestamp of the first point (current time if unset).
    pub start: Option<DateTime<Utc>>,
    /// Random number generator seed (OS entropy if unset).
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            n_points: 256,
            mean_gap_minutes: 5.0,
            step_std_dev: 1.0,
            initial_value: 100.0,
            prob_missing: 0.05,
            start: None,
            seed: None,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML. Missing sections and keys take their default
    /// values. Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        check_num(analysis.epsilon, f64::MIN_POSITIVE..1.0).context("invalid tolerance")?;

        let generate = &self.generate;
        check_num(generate.n_points, 1..1_000_000).context("invalid number of points")?;
        check_num(generate.mean_gap_minutes, f64::MIN_POSITIVE..1e6)
            .context("invalid mean gap")?;
        check_num(generate.step_std_dev, 0.0..1e6).context("invalid step standard deviation")?;
        if !generate.initial_value.is_finite() {
            bail!("initial value must be finite, but is {}", generate.initial_value);
        }
        check_num(generate.prob_missing, 0.0..1.0).context("invalid missing probability")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

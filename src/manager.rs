use crate::config::Config;
use crate::generator::Generator;
use anyhow::{Context, Result};
use glob::glob;
use seriestats::{Series, analysis::Analyzer};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Owns a data directory holding `config.toml`, series files and reports.
pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    pub fn generate_series(&self) -> Result<()> {
        let series_idx = self
            .count_series_files()
            .context("failed to count series files")?;

        let mut generator =
            Generator::new(self.cfg.generate.clone()).context("failed to construct generator")?;
        let series = generator
            .generate_series()
            .context("failed to generate series")?;

        let series_file = self.series_file(series_idx);
        series
            .save(&series_file)
            .with_context(|| format!("failed to save {series_file:?}"))?;
        log::info!("created {series_file:?}");

        Ok(())
    }

    pub fn analyze_series(&self) -> Result<()> {
        let analyzer = Analyzer::new(
            self.cfg.analysis.tolerance(),
            self.cfg.analysis.trend_method,
        );

        let n_series = self
            .count_series_files()
            .context("failed to count series files")?;
        for series_idx in 0..n_series {
            let series_file = self.series_file(series_idx);
            let series = Series::from_file(&series_file)
                .with_context(|| format!("failed to load {series_file:?}"))?;
            series
                .check_ordered()
                .with_context(|| format!("{series_file:?} is not ordered by time"))?;
            log::info!("loaded {series_file:?}");

            let report = analyzer.analyze(&series);
            log::info!("{report:#?}");

            let report_file = self.report_file(series_idx);
            report
                .save(&report_file)
                .with_context(|| format!("failed to save {report_file:?}"))?;
            log::info!("saved {report_file:?}");
        }

        Ok(())
    }

    pub fn clean_reports(&self) -> Result<()> {
        let pattern = self.data_dir.join("report-*.msgpack");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        for report_file in glob(pattern)
            .context("failed to glob report files")?
            .filter_map(Result::ok)
        {
            fs::remove_file(&report_file)
                .with_context(|| format!("failed to remove {report_file:?}"))?;
            log::info!("removed {report_file:?}");
        }
        Ok(())
    }

    fn count_series_files(&self) -> Result<usize> {
        let pattern = self.data_dir.join("series-*.msgpack");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let count = glob(pattern)
            .context("failed to glob series files")?
            .filter_map(Result::ok)
            .count();
        Ok(count)
    }

    fn series_file(&self, series_idx: usize) -> PathBuf {
        self.data_dir.join(format!("series-{series_idx:04}.msgpack"))
    }

    fn report_file(&self, series_idx: usize) -> PathBuf {
        self.data_dir.join(format!("report-{series_idx:04}.msgpack"))
    }
}

use chrono::{TimeDelta, TimeZone, Utc};
use seriestats::{Series, TimedValue, analysis::SeriesReport};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn setup_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_contents = String::new()
        + "[analysis]\n"
        + "epsilon = 1e-6\n"
        + "trend_method = \"centered\"\n"
        + "\n"
        + "[generate]\n"
        + "n_points = 512\n"
        + "mean_gap_minutes = 2.0\n"
        + "step_std_dev = 0.5\n"
        + "initial_value = 20.0\n"
        + "prob_missing = 0.1\n"
        + "start = \"2024-01-01T00:00:00Z\"\n"
        + "seed = 42\n";

    fs::write(test_dir.join("config.toml"), config_contents).expect("failed to write config file");

    test_dir
}

fn exec_bin(test_dir: &Path, command: &str) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_seriestats"));
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    Command::new(bin)
        .args(["--data-dir", test_dir_str, command])
        .output()
        .expect("failed to execute command")
}

fn run_bin(test_dir: &Path, command: &str) {
    let output = exec_bin(test_dir, command);

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {command:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );
}

#[test]
fn basic_workflow() {
    let test_dir = setup_dir("basic_workflow");

    run_bin(&test_dir, "generate");
    run_bin(&test_dir, "generate");

    assert!(test_dir.join("series-0000.msgpack").is_file());
    assert!(test_dir.join("series-0001.msgpack").is_file());

    // Same seed, same series.
    let series_0 = Series::from_file(test_dir.join("series-0000.msgpack")).unwrap();
    let series_1 = Series::from_file(test_dir.join("series-0001.msgpack")).unwrap();
    assert_eq!(series_0, series_1);
    assert_eq!(series_0.len(), 512);

    run_bin(&test_dir, "analyze");

    for idx in 0..2 {
        let report = SeriesReport::from_file(test_dir.join(format!("report-{idx:04}.msgpack")))
            .expect("failed to load report");
        assert_eq!(report.n_points, 512);
        let min_max_avg = report.min_max_avg.expect("series has values");
        assert!(min_max_avg.min <= min_max_avg.avg && min_max_avg.avg <= min_max_avg.max);
        let average = report.time_weighted.average.expect("series spans time");
        assert!(min_max_avg.min <= average && average <= min_max_avg.max);
    }

    run_bin(&test_dir, "clean");

    assert!(!test_dir.join("report-0000.msgpack").exists());
    assert!(!test_dir.join("report-0001.msgpack").exists());
    assert!(test_dir.join("series-0000.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn analyze_known_series() {
    let test_dir = setup_dir("analyze_known_series");

    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let series = Series::new(vec![
        TimedValue::new(t0, Some(10.0)),
        TimedValue::new(t0 + TimeDelta::minutes(30), None),
        TimedValue::new(t0 + TimeDelta::minutes(60), Some(20.0)),
    ]);
    series.save(test_dir.join("series-0000.msgpack")).unwrap();

    run_bin(&test_dir, "analyze");

    let report = SeriesReport::from_file(test_dir.join("report-0000.msgpack")).unwrap();
    assert_eq!(report.n_points, 3);
    assert_eq!(report.n_values, 2);
    assert_eq!(report.discrepancy, 10.0);
    assert_eq!(report.time_weighted.average, Some(15.0));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn unordered_series_fails() {
    let test_dir = setup_dir("unordered_series_fails");

    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let series = Series::new(vec![
        TimedValue::new(t0 + TimeDelta::minutes(10), Some(1.0)),
        TimedValue::new(t0, Some(2.0)),
    ]);
    series.save(test_dir.join("series-0000.msgpack")).unwrap();

    let output = exec_bin(&test_dir, "analyze");
    assert!(!output.status.success());
    assert!(!test_dir.join("report-0000.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn missing_config_fails() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("missing_config_fails");
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let output = exec_bin(&test_dir, "analyze");
    assert!(!output.status.success());

    fs::remove_dir_all(&test_dir).ok();
}

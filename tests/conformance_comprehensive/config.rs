//! Configuration-driven runs

use crate::common::*;
use braidcheck::{run_all_with_config, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn default_file_drives_a_passing_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    HarnessConfig::write_default_if_missing(&path).unwrap();

    let config = HarnessConfig::from_file(&path).unwrap();
    assert_eq!(config, HarnessConfig::default());

    let app = GridApp::new();
    let mut sink = MemorySink::new();
    let summary = run_all_with_config(&config, &app, &LocalScope, &mut sink).unwrap();

    assert!(summary.passed);
    assert_eq!(summary.probe_time, 0.0);
    assert_eq!(summary.epsilon, 1e-12);
    assert!(sink.contains("Starting init-write check at t = 0"));
}

#[test]
fn bound_in_file_gates_coarsen_refine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "probe_time = 0.5\nfine_dt = 0.05\ncoarse_dt = 0.1\ncoarsen_refine_bound = 1e-9\n",
    )
    .unwrap();

    let config = HarnessConfig::from_file(&path).unwrap();
    let app = GridApp::new();
    let summary = run_all_with_config(&config, &app, &LocalScope, &mut NullSink).unwrap();

    assert!(!summary.passed);
    assert_eq!(summary.failed_checks(), vec![CheckKind::CoarsenRefine]);
    assert_eq!(summary.steps, StepSizes::new(0.05, 0.1).unwrap());
    assert_eq!(summary.probe_time, 0.5);
}

#[test]
fn saved_config_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let config = HarnessConfig {
        tolerance: 1e-9,
        probe_time: 2.0,
        coarsen_refine_bound: Some(0.25),
        ..HarnessConfig::default()
    };

    config.write_to_file(&path).unwrap();

    assert_eq!(HarnessConfig::from_file(&path).unwrap(), config);
}

#[test]
fn invalid_file_names_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "coarse_dt = -1.0\n").unwrap();

    let err = HarnessConfig::from_file(&path).unwrap_err();

    assert!(matches!(err, Error::InvalidConfig(_)));
    let message = err.to_string();
    assert!(message.contains("coarse_dt"), "{}", message);
    assert!(message.contains(CONFIG_FILE_NAME), "{}", message);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = HarnessConfig::from_file(&path).unwrap_err();

    assert!(matches!(err, Error::IoError(_)));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn invalid_config_refuses_run() {
    let config = HarnessConfig {
        tolerance: -1.0,
        ..HarnessConfig::default()
    };
    let app = GridApp::new();

    let err = run_all_with_config(&config, &app, &LocalScope, &mut NullSink).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(app.created.get(), 0);
}

//! Structured logging emitted during checks

use crate::common::*;
use braidcheck::TracingSink;
use tracing::Level;

/// Run `f` with a fmt subscriber capturing into the returned buffer
fn capture<F: FnOnce()>(level: Level, f: F) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn aggregate_run_logs_start_and_finish() {
    let app = GridApp::new();

    let logs = capture(Level::INFO, || {
        Harness::default()
            .run_all(&app, &LocalScope, &mut NullSink, 0.0, default_steps())
            .unwrap();
    });

    assert!(logs.contains("braidcheck::harness"));
    assert!(logs.contains("Starting aggregate run"));
    assert!(logs.contains("optional=write,bufsize"));
    assert!(logs.contains("Starting check"));
    assert!(logs.contains("Aggregate run finished"));
}

#[test]
fn check_span_carries_scope_identity() {
    let app = GridApp::new();

    let logs = capture(Level::INFO, || {
        Harness::default()
            .test_dot(&app, &NamedScope("rank 2".to_string()), &mut NullSink, 0.0)
            .unwrap();
    });

    assert!(logs.contains("check{"));
    assert!(logs.contains("rank 2"));
}

#[test]
fn failed_subcheck_is_logged_as_warning() {
    let app = GridApp::new();
    let harness = Harness::default().with_coarsen_refine_bound(1e-12).unwrap();

    let logs = capture(Level::WARN, || {
        harness
            .test_coarsen_refine(&app, &LocalScope, &mut NullSink, 0.0, default_steps())
            .unwrap();
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("sub-check failed"));
    assert!(!logs.contains("Starting check"), "info filtered at warn level");
}

#[test]
fn aborted_check_is_logged() {
    let app = GridApp::failing(Capability::BufPack);

    let logs = capture(Level::WARN, || {
        let passed = Harness::default()
            .run_all(&app, &LocalScope, &mut NullSink, 0.0, default_steps())
            .unwrap();
        assert!(!passed);
    });

    assert!(logs.contains("check aborted"));
    assert!(logs.contains("bufpack"));
}

#[test]
fn tracing_sink_forwards_report_lines() {
    let app = GridApp::new();

    let logs = capture(Level::INFO, || {
        let mut sink = TracingSink;
        Harness::default()
            .run_all(&app, &LocalScope, &mut sink, 0.0, default_steps())
            .unwrap();
    });

    assert!(logs.contains("braidcheck::report"));
    assert!(logs.contains("run-all: PASS"));
}

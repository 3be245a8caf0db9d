//! Aggregate runs through the facade

use crate::common::*;

fn run(app: &GridApp, sink: &mut dyn ReportSink) -> braidcheck::Result<RunSummary> {
    Harness::default().run_all_report(app, &LocalScope, sink, 0.2, default_steps())
}

#[test]
fn correct_grid_app_passes_every_check() {
    let app = GridApp::new();
    let mut sink = MemorySink::new();

    let summary = run(&app, &mut sink).unwrap();

    assert!(summary.passed);
    assert!(summary.outcome(CheckKind::Dot).unwrap().passed());
    assert!(summary.outcome(CheckKind::Buffer).unwrap().passed());
    assert_eq!(
        summary.outcome(CheckKind::CoarsenRefine).unwrap().verdict,
        Verdict::Diagnostic
    );
    assert!(app.balanced());
}

#[test]
fn writer_sink_carries_report_tokens() {
    let app = GridApp::new();
    let buffer = SharedBuffer::default();
    let mut sink = WriterSink::new(buffer.clone());

    run(&app, &mut sink).unwrap();
    assert!(!sink.has_failed());

    let text = buffer.contents();
    assert!(text.contains("Summary:\n"));
    assert!(text.contains("  init-write: PASS (diagnostic only) [inspect written output]\n"));
    assert!(text.contains("  dot: PASS\n"));
    assert!(text.contains("  buffer: PASS relative residual 0e0\n"));
    assert!(text.ends_with("run-all: PASS\n"));
}

#[test]
fn report_is_scope_independent() {
    let app = GridApp::new();
    let mut local = MemorySink::new();
    let mut named = MemorySink::new();

    Harness::default()
        .run_all(&app, &LocalScope, &mut local, 0.2, default_steps())
        .unwrap();
    Harness::default()
        .run_all(
            &app,
            &NamedScope("rank 1 of 4".to_string()),
            &mut named,
            0.2,
            default_steps(),
        )
        .unwrap();

    assert_eq!(local.lines(), named.lines());
}

#[test]
fn missing_inner_product_aborts_before_any_check() {
    let app = GridApp {
        dot: false,
        ..GridApp::new()
    };
    let mut sink = MemorySink::new();

    let err = run(&app, &mut sink).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.capability(), Some(Capability::Dot));
    assert_eq!(sink.lines().len(), 1);
    assert!(sink.lines()[0].starts_with("run-all: FAIL"));
    assert_eq!(app.created.get(), 0);
}

#[test]
fn each_callback_failure_is_isolated() {
    let cases = [
        (Capability::Write, vec![CheckKind::InitWrite, CheckKind::Clone, CheckKind::Sum, CheckKind::CoarsenRefine]),
        (Capability::Clone, vec![CheckKind::Clone, CheckKind::Sum, CheckKind::Dot]),
        (Capability::BufSize, vec![CheckKind::Buffer]),
        (Capability::BufUnpack, vec![CheckKind::Buffer]),
        (Capability::Refine, vec![CheckKind::CoarsenRefine]),
    ];

    for (capability, expected) in cases {
        let app = GridApp::failing(capability);
        let mut sink = MemorySink::new();

        let summary = run(&app, &mut sink).unwrap();

        assert!(!summary.passed, "{}", capability);
        assert_eq!(summary.failed_checks(), expected, "{}", capability);
        assert_eq!(summary.outcomes.len(), CheckKind::ALL.len());
        assert!(app.balanced(), "leak after {} failure", capability);
        assert_eq!(sink.lines().last().map(String::as_str), Some("run-all: FAIL"));
    }
}

#[test]
fn json_summary_describes_failures() {
    let app = GridApp::failing(Capability::BufPack);
    let summary = run(&app, &mut NullSink).unwrap();

    let json = summary.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["passed"], serde_json::Value::Bool(false));
    let outcomes = value["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 6);
    assert_eq!(outcomes[4]["check"], "buffer");
    assert_eq!(outcomes[4]["verdict"], "aborted");
    assert!(outcomes[4]["detail"]
        .as_str()
        .unwrap()
        .contains("bufpack rejected by grid app"));
    assert!(outcomes[0].get("residual").is_none());
}

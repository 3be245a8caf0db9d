//! Individual checks against the grid application

use crate::common::*;

fn harness() -> Harness {
    Harness::new(Tolerance::default())
}

// ============================================================================
// Verified Checks
// ============================================================================

#[test]
fn dot_identities_hold_for_l2_product() {
    let app = GridApp::new();
    let mut sink = MemorySink::new();

    let outcome = harness()
        .test_dot(&app, &LocalScope, &mut sink, 0.5)
        .unwrap();

    assert!(outcome.passed(), "{:#?}", outcome.subchecks);
    assert!(sink.contains("Starting dot check at t = 0.5"));
    for index in 1..=5 {
        assert!(sink.contains(&format!("  {}. ", index)));
    }
    assert!(app.balanced());
}

#[test]
fn buffer_round_trip_is_exact() {
    let app = GridApp::new();
    let mut sink = MemorySink::new();

    let outcome = harness()
        .test_buffer(&app, &LocalScope, &mut sink, 0.25)
        .unwrap();

    assert!(outcome.passed());
    assert_eq!(outcome.residual, Some(0.0));
    assert!(sink.contains("bufsize reports 268 bytes"));
    assert!(app.balanced());
}

#[test]
fn diagnostic_checks_write_through_app() {
    let app = GridApp::new();
    let mut sink = MemorySink::new();
    let h = harness();

    for check in [CheckKind::InitWrite, CheckKind::Clone, CheckKind::Sum] {
        let outcome = h
            .run_check(check, &app, &LocalScope, &mut sink, 0.0, default_steps())
            .unwrap();
        assert_eq!(outcome.verdict, Verdict::Diagnostic);
    }

    assert!(sink.contains("t = 0: 33 points, peak 1.000000"));
    assert!(sink.contains("peak 0.000000"), "sum 1*v - 1*u writes the zero field");
    assert!(sink.contains("peak 2.000000"));
    assert!(app.balanced());
}

// ============================================================================
// Coarsen / Refine
// ============================================================================

fn coarsen_refine(app: &GridApp, harness: Harness) -> braidcheck::CheckOutcome {
    let mut sink = MemorySink::new();
    harness
        .test_coarsen_refine(app, &LocalScope, &mut sink, 0.3, default_steps())
        .unwrap()
}

#[test]
fn interpolation_residual_is_small_and_nonzero() {
    let app = GridApp::new();

    let outcome = coarsen_refine(&app, harness());

    assert_eq!(outcome.verdict, Verdict::Diagnostic);
    let relative = outcome.relative_residual.unwrap();
    assert!(relative > 1e-8 && relative < 1e-3, "relative {:e}", relative);
    assert!(app.balanced());
}

#[test]
fn interpolation_residual_shrinks_with_mesh() {
    let coarse = coarsen_refine(&GridApp::with_points(33), harness());
    let fine = coarsen_refine(&GridApp::with_points(65), harness());

    let coarse_rel = coarse.relative_residual.unwrap();
    let fine_rel = fine.relative_residual.unwrap();
    assert!(
        fine_rel < coarse_rel / 8.0,
        "expected O(h^4) decay: {:e} vs {:e}",
        fine_rel,
        coarse_rel
    );
}

#[test]
fn bound_decides_interpolation_verdict() {
    let app = GridApp::new();

    let loose = coarsen_refine(&app, harness().with_coarsen_refine_bound(1e-3).unwrap());
    assert_eq!(loose.verdict, Verdict::Pass);

    let tight = coarsen_refine(&app, harness().with_coarsen_refine_bound(1e-8).unwrap());
    assert_eq!(tight.verdict, Verdict::Fail);
    assert!(tight.summary_line().starts_with("coarsen-refine: FAIL (sub-checks 2 failed)"));
    assert!(app.balanced());
}

#[test]
fn missing_multigrid_is_skipped() {
    let app = GridApp {
        multigrid: false,
        ..GridApp::new()
    };

    let outcome = coarsen_refine(&app, harness());

    assert_eq!(outcome.verdict, Verdict::Skipped);
    assert!(!outcome.verdict.is_blocking());
    assert_eq!(app.created.get(), 0);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn callback_status_is_carried_in_error() {
    let app = GridApp::failing(Capability::Coarsen);
    let mut sink = MemorySink::new();

    let err = harness()
        .test_coarsen_refine(&app, &LocalScope, &mut sink, 0.0, default_steps())
        .unwrap_err();

    match &err {
        Error::CallbackFailure { capability, source } => {
            assert_eq!(*capability, Capability::Coarsen);
            assert_eq!(source.status, 7);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Callback failure in coarsen: status 7: coarsen rejected by grid app"
    );
    assert!(app.balanced());
}

//! RunAll: every check in sequence with one verdict
//!
//! The aggregate run refuses to start when a mandatory capability (init,
//! free, clone, sum, dot) is missing. After that, each check runs regardless
//! of how the previous one ended: a callback failure or configuration error
//! inside one check is recorded as that check's FAIL and the run moves on, so
//! a single invocation reports every discoverable problem.

use braidcheck_core::{
    Capability, CapabilitySet, CheckKind, CheckOutcome, ExecutionScope, ReportSink, Result,
    StepSizes, VectorOps,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::checks::Harness;
use crate::config::HarnessConfig;

/// Outcome of one aggregate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Time value the vectors were created at
    pub probe_time: f64,
    /// Step sizes handed to the coarsen/refine check
    pub steps: StepSizes,
    /// Tolerance epsilon used for every comparison
    pub epsilon: f64,
    /// One outcome per check, in execution order
    pub outcomes: Vec<CheckOutcome>,
    /// Overall verdict
    pub passed: bool,
}

impl RunSummary {
    /// Outcome of a particular check
    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.check == check)
    }

    /// Checks whose verdict forced the run to fail
    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict.is_blocking())
            .map(|o| o.check)
            .collect()
    }

    /// Pretty-printed JSON for machine consumption
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Harness {
    /// Run one check by kind
    pub fn run_check<C: VectorOps + ?Sized>(
        &self,
        check: CheckKind,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
        steps: StepSizes,
    ) -> Result<CheckOutcome> {
        match check {
            CheckKind::InitWrite => self.test_init_write(ops, scope, sink, t),
            CheckKind::Clone => self.test_clone(ops, scope, sink, t),
            CheckKind::Sum => self.test_sum(ops, scope, sink, t),
            CheckKind::Dot => self.test_dot(ops, scope, sink, t),
            CheckKind::Buffer => self.test_buffer(ops, scope, sink, t),
            CheckKind::CoarsenRefine => self.test_coarsen_refine(ops, scope, sink, t, steps),
        }
    }

    /// Run every check and return the overall verdict
    ///
    /// # Errors
    ///
    /// Returns a configuration error, before any check runs, if a mandatory
    /// capability is absent or `steps` is invalid.
    pub fn run_all<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
        steps: StepSizes,
    ) -> Result<bool> {
        Ok(self.run_all_report(ops, scope, sink, t, steps)?.passed)
    }

    /// Run every check and return each outcome
    ///
    /// Writes one `<check>: PASS|FAIL|SKIPPED` line per check and a final
    /// overall line to `sink`.
    pub fn run_all_report<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
        steps: StepSizes,
    ) -> Result<RunSummary> {
        let capabilities = CapabilitySet::of(ops);
        let preflight = steps
            .validate()
            .and_then(|_| capabilities.require(&Capability::MANDATORY, "run-all"));
        if let Err(e) = preflight {
            error!(target: "braidcheck::harness", error = %e, "Aggregate run aborted");
            sink.line(&format!("run-all: FAIL [{}]", e));
            return Err(e);
        }

        info!(
            target: "braidcheck::harness",
            scope = %scope.identity(),
            t,
            fine_dt = steps.fine,
            coarse_dt = steps.coarse,
            epsilon = self.tolerance().epsilon(),
            optional = %optional_names(&capabilities),
            "Starting aggregate run"
        );

        let mut passed = true;
        let mut outcomes = Vec::with_capacity(CheckKind::ALL.len());
        for check in CheckKind::ALL {
            let outcome = match self.run_check(check, ops, scope, sink, t, steps) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(
                        target: "braidcheck::harness",
                        check = check.name(),
                        error = %e,
                        "check aborted"
                    );
                    CheckOutcome::aborted(check, &e)
                }
            };
            passed &= !outcome.verdict.is_blocking();
            outcomes.push(outcome);
        }

        sink.line("Summary:");
        for outcome in &outcomes {
            sink.line(&format!("  {}", outcome.summary_line()));
        }
        let overall = if passed { "PASS" } else { "FAIL" };
        sink.line(&format!("run-all: {}", overall));
        info!(target: "braidcheck::harness", passed, "Aggregate run finished");

        Ok(RunSummary {
            probe_time: t,
            steps,
            epsilon: self.tolerance().epsilon(),
            outcomes,
            passed,
        })
    }
}

/// Comma-separated optional capabilities the implementation supplies
fn optional_names(capabilities: &CapabilitySet) -> String {
    let names: Vec<&str> = capabilities
        .present()
        .into_iter()
        .filter(|c| !c.is_mandatory())
        .map(|c| c.name())
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(",")
    }
}

/// Build a harness from `config` and run every check at its probe time
pub fn run_all_with_config<C: VectorOps + ?Sized>(
    config: &HarnessConfig,
    ops: &C,
    scope: &dyn ExecutionScope,
    sink: &mut dyn ReportSink,
) -> Result<RunSummary> {
    let harness = Harness::from_config(config)?;
    harness.run_all_report(ops, scope, sink, config.probe_time, config.steps()?)
}

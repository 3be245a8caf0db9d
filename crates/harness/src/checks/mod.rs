//! The individual checks
//!
//! Each check is a single pass over the capability set: it creates its own
//! vectors, exercises a handful of capabilities, records what it observed and
//! retires everything it created before returning, on every path.
//!
//! | Check            | Verdict                    | Capabilities beyond init/free |
//! |------------------|----------------------------|-------------------------------|
//! | `init-write`     | diagnostic only            | write (optional)              |
//! | `clone`          | diagnostic only            | clone, write (optional)       |
//! | `sum`            | diagnostic only            | clone, sum, write (optional)  |
//! | `dot`            | pass/fail                  | clone, sum, dot               |
//! | `buffer`         | pass/fail                  | bufsize, bufpack, bufunpack, dot |
//! | `coarsen-refine` | diagnostic, or gated by a bound | coarsen, refine, dot     |

mod buffer;
mod clone;
mod coarsen_refine;
mod dot;
mod init_write;
mod sum;

use braidcheck_core::{
    Capability, CallbackResultExt, CheckKind, Error, ExecutionScope, ReportSink, Result, SubCheck,
    SubStatus, Tolerance, VectorOps,
};
use tracing::span::EnteredSpan;
use tracing::{debug, info, info_span, warn};

use crate::config::{validate_bound, HarnessConfig};
use crate::guard::ScopedVector;

/// Runs the checks with one tolerance policy
///
/// # Example
///
/// ```ignore
/// let harness = Harness::new(Tolerance::default());
/// let mut sink = MemorySink::new();
/// let outcome = harness.test_dot(&app, &LocalScope, &mut sink, 1.0)?;
/// assert!(outcome.passed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Harness {
    tolerance: Tolerance,
    coarsen_refine_bound: Option<f64>,
}

impl Harness {
    /// Harness with the given tolerance and a diagnostic-only coarsen/refine check
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            coarsen_refine_bound: None,
        }
    }

    /// Harness built from a validated configuration
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tolerance: config.tolerance()?,
            coarsen_refine_bound: config.coarsen_refine_bound,
        })
    }

    /// Gate the coarsen/refine check on `relative residual ≤ bound`
    ///
    /// # Errors
    ///
    /// Returns [`braidcheck_core::Error::InvalidConfig`] if `bound` is
    /// negative or not finite.
    pub fn with_coarsen_refine_bound(mut self, bound: f64) -> Result<Self> {
        validate_bound(bound)?;
        self.coarsen_refine_bound = Some(bound);
        Ok(self)
    }

    /// The tolerance every comparison uses
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The coarsen/refine bound, if one gates the verdict
    pub fn coarsen_refine_bound(&self) -> Option<f64> {
        self.coarsen_refine_bound
    }
}

/// Unwrap an optional capability or fail with a configuration error
pub(crate) fn require<T>(
    supplied: Option<T>,
    capability: Capability,
    check: CheckKind,
) -> Result<T> {
    supplied.ok_or(Error::MissingCapability {
        capability,
        required_by: check.name(),
    })
}

/// Write `vector` through the optional write capability
///
/// Returns whether a write happened.
pub(crate) fn write_vector<C: VectorOps + ?Sized>(
    ops: &C,
    sink: &mut dyn ReportSink,
    t: f64,
    vector: &ScopedVector<'_, C>,
    note: &str,
) -> Result<bool> {
    match ops.writer() {
        Some(writer) => {
            sink.line(&format!("  write {} {}", vector.label(), note));
            writer
                .write(t, vector.get(), sink)
                .during(Capability::Write)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Enter the check's span and write its opening line
///
/// The span stays entered until the returned guard is dropped.
pub(crate) fn announce(
    check: CheckKind,
    scope: &dyn ExecutionScope,
    sink: &mut dyn ReportSink,
    t: f64,
) -> EnteredSpan {
    let span = info_span!(
        target: "braidcheck::harness",
        "check",
        name = check.name(),
        scope = %scope.identity(),
        t
    )
    .entered();
    info!(target: "braidcheck::harness", "Starting check");
    sink.line(&format!("Starting {} check at t = {}", check, t));
    span
}

/// Log one evaluated sub-check to both channels
pub(crate) fn record(check: CheckKind, sink: &mut dyn ReportSink, sub: &SubCheck) {
    match sub.status {
        SubStatus::Pass => {
            debug!(
                target: "braidcheck::harness",
                check = check.name(),
                index = sub.index,
                observed = sub.observed,
                "sub-check passed"
            );
        }
        SubStatus::Mismatch => {
            warn!(
                target: "braidcheck::harness",
                check = check.name(),
                index = sub.index,
                name = %sub.name,
                observed = sub.observed,
                expected = sub.expected,
                "sub-check failed"
            );
        }
        SubStatus::Inconclusive => {
            info!(
                target: "braidcheck::harness",
                check = check.name(),
                index = sub.index,
                name = %sub.name,
                "sub-check inconclusive"
            );
        }
    }
    sink.line(&format!("  {}", sub));
}

//! Check outcomes
//!
//! Each check produces a [`CheckOutcome`]: a verdict, the numbered sub-checks
//! it evaluated, and for the residual-based checks the measured residual.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The individual checks, in the order RunAll executes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Create, write, free
    InitWrite,
    /// Create, clone, write both, free both
    Clone,
    /// Linear-combination diagnostics
    Sum,
    /// Inner-product identities
    Dot,
    /// Serialization round trip
    Buffer,
    /// Coarsen then refine
    CoarsenRefine,
}

impl CheckKind {
    /// Every check, in execution order
    pub const ALL: [CheckKind; 6] = [
        CheckKind::InitWrite,
        CheckKind::Clone,
        CheckKind::Sum,
        CheckKind::Dot,
        CheckKind::Buffer,
        CheckKind::CoarsenRefine,
    ];

    /// Name used in logs and report lines
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::InitWrite => "init-write",
            CheckKind::Clone => "clone",
            CheckKind::Sum => "sum",
            CheckKind::Dot => "dot",
            CheckKind::Buffer => "buffer",
            CheckKind::CoarsenRefine => "coarsen-refine",
        }
    }

    /// Checks whose correctness is judged from written output only
    pub fn is_diagnostic_only(&self) -> bool {
        matches!(
            self,
            CheckKind::InitWrite | CheckKind::Clone | CheckKind::Sum
        )
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Overall verdict of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Automatically verified
    Pass,
    /// At least one sub-check exceeded tolerance
    Fail,
    /// Ran to completion; no automatic verdict exists
    Diagnostic,
    /// Required optional capabilities absent
    Skipped,
    /// Stopped by a configuration error or callback failure
    Aborted,
}

impl Verdict {
    /// Report token for this verdict
    pub fn token(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Diagnostic => "PASS (diagnostic only)",
            Verdict::Fail | Verdict::Aborted => "FAIL",
            Verdict::Skipped => "SKIPPED",
        }
    }

    /// Whether this verdict forces an aggregate run to fail
    pub fn is_blocking(&self) -> bool {
        matches!(self, Verdict::Fail | Verdict::Aborted)
    }
}

/// Status of one numbered sub-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStatus {
    /// Within tolerance
    Pass,
    /// Exceeded tolerance
    Mismatch,
    /// Could not be evaluated safely
    Inconclusive,
}

/// One numbered identity evaluated by a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCheck {
    /// Position within the check, starting at 1
    pub index: u8,
    /// Short description of the identity
    pub name: String,
    /// Result of the comparison
    pub status: SubStatus,
    /// Value computed from the user's callbacks
    pub observed: f64,
    /// Value the identity predicts
    pub expected: f64,
}

impl SubCheck {
    /// Build a sub-check from a comparison result
    pub fn compare(index: u8, name: impl Into<String>, within: bool, observed: f64, expected: f64) -> Self {
        Self {
            index,
            name: name.into(),
            status: if within {
                SubStatus::Pass
            } else {
                SubStatus::Mismatch
            },
            observed,
            expected,
        }
    }

    /// Build an inconclusive sub-check
    pub fn inconclusive(index: u8, name: impl Into<String>, observed: f64, expected: f64) -> Self {
        Self {
            index,
            name: name.into(),
            status: SubStatus::Inconclusive,
            observed,
            expected,
        }
    }

    /// Whether this sub-check exceeded tolerance
    pub fn is_mismatch(&self) -> bool {
        self.status == SubStatus::Mismatch
    }
}

impl fmt::Display for SubCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.status {
            SubStatus::Pass => "ok",
            SubStatus::Mismatch => "MISMATCH",
            SubStatus::Inconclusive => "inconclusive",
        };
        write!(
            f,
            "{}. {}: {} (observed {:e}, expected {:e})",
            self.index, self.name, status, self.observed, self.expected
        )
    }
}

/// Result of running one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Which check produced this outcome
    pub check: CheckKind,
    /// Overall verdict
    pub verdict: Verdict,
    /// Numbered sub-checks, in evaluation order
    pub subchecks: Vec<SubCheck>,
    /// Squared-distance residual, for residual-based checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual: Option<f64>,
    /// Residual relative to the reference squared norm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_residual: Option<f64>,
    /// Skip reason or abort cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckOutcome {
    fn with_verdict(check: CheckKind, verdict: Verdict) -> Self {
        Self {
            check,
            verdict,
            subchecks: Vec::new(),
            residual: None,
            relative_residual: None,
            detail: None,
        }
    }

    /// Completed diagnostic check
    ///
    /// Checks that have no comparator at all point the reader at the written
    /// output.
    pub fn diagnostic(check: CheckKind) -> Self {
        let outcome = Self::with_verdict(check, Verdict::Diagnostic);
        if check.is_diagnostic_only() {
            outcome.with_detail("inspect written output")
        } else {
            outcome
        }
    }

    /// Skipped check with the reason
    pub fn skipped(check: CheckKind, reason: impl Into<String>) -> Self {
        Self::with_verdict(check, Verdict::Skipped).with_detail(reason)
    }

    /// Check stopped by `error`
    pub fn aborted(check: CheckKind, error: &Error) -> Self {
        Self::with_verdict(check, Verdict::Aborted).with_detail(error.to_string())
    }

    /// Verified check: passes iff no sub-check mismatched
    pub fn verified(check: CheckKind, subchecks: Vec<SubCheck>) -> Self {
        let verdict = if subchecks.iter().any(SubCheck::is_mismatch) {
            Verdict::Fail
        } else {
            Verdict::Pass
        };
        Self {
            subchecks,
            ..Self::with_verdict(check, verdict)
        }
    }

    /// Attach a residual measurement
    pub fn with_residual(mut self, residual: f64, relative: f64) -> Self {
        self.residual = Some(residual);
        self.relative_residual = Some(relative);
        self
    }

    /// Attach free-form detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether the check was automatically verified and passed
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    /// Sub-checks that exceeded tolerance
    pub fn mismatches(&self) -> impl Iterator<Item = &SubCheck> {
        self.subchecks.iter().filter(|s| s.is_mismatch())
    }

    /// One report line: `<check>: <TOKEN>` plus a qualifier
    pub fn summary_line(&self) -> String {
        let mut line = format!("{}: {}", self.check, self.verdict.token());
        if self.verdict == Verdict::Fail {
            let failed: Vec<String> = self.mismatches().map(|s| s.index.to_string()).collect();
            if !failed.is_empty() {
                line.push_str(&format!(" (sub-checks {} failed)", failed.join(", ")));
            }
        }
        if let Some(r) = self.relative_residual {
            line.push_str(&format!(" relative residual {:e}", r));
        }
        if let Some(detail) = &self.detail {
            line.push_str(&format!(" [{}]", detail));
        }
        line
    }
}

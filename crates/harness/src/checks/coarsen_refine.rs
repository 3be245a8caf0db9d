//! Spatial coarsen then refine
//!
//! Coarsening is lossy, so `refine(coarsen(v))` is not expected to equal `v`.
//! The check measures how far it lands and only fails when the residual is
//! not finite or, if a bound is configured, exceeds it.

use braidcheck_core::{
    CallbackResultExt, Capability, CapabilitySet, CheckKind, CheckOutcome, ExecutionScope,
    ReportSink, Result, StepSizes, SubCheck, Verdict, VectorOps,
};
use tracing::{debug, info};

use super::{announce, record, require, write_vector, Harness};
use crate::guard::ScopedVector;
use crate::residual::squared_distance;

impl Harness {
    /// Coarsen a vector created at `t` from `steps.fine` to `steps.coarse`,
    /// refine it back and report the residual.
    ///
    /// Skipped (not failed) when `coarsen` or `refine` is absent. Without a
    /// configured bound the verdict is diagnostic unless the residual is NaN
    /// or infinite; with a bound it passes iff the relative residual is
    /// within it.
    ///
    /// # Errors
    ///
    /// - [`braidcheck_core::Error::InvalidConfig`] for non-positive steps
    /// - [`braidcheck_core::Error::MissingCapability`] if coarsen and refine
    ///   are supplied but the inner product is not
    /// - [`braidcheck_core::Error::CallbackFailure`] if any call fails
    pub fn test_coarsen_refine<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
        steps: StepSizes,
    ) -> Result<CheckOutcome> {
        steps.validate()?;
        let missing =
            CapabilitySet::of(ops).missing(&[Capability::Coarsen, Capability::Refine]);
        let (coarsener, refiner) = match (ops.coarsener(), ops.refiner()) {
            (Some(c), Some(r)) => (c, r),
            _ => {
                let names: Vec<&str> = missing.iter().map(|c| c.name()).collect();
                let reason = format!("{} not supplied", names.join(" and "));
                info!(
                    target: "braidcheck::harness",
                    check = CheckKind::CoarsenRefine.name(),
                    %reason,
                    "check skipped"
                );
                sink.line(&format!("Skipping {} check: {}", CheckKind::CoarsenRefine, reason));
                return Ok(CheckOutcome::skipped(CheckKind::CoarsenRefine, reason));
            }
        };
        let dot = require(ops.inner_product(), Capability::Dot, CheckKind::CoarsenRefine)?;
        let tol = self.tolerance;
        let _span = announce(CheckKind::CoarsenRefine, scope, sink, t);

        let interval = steps.interval_at(t);
        sink.line(&format!(
            "  interval: start {}, fine stop {}, coarse stop {}",
            interval.start, interval.fine_stop, interval.coarse_stop
        ));
        debug!(
            target: "braidcheck::harness",
            fine_dt = interval.fine_dt(),
            coarse_dt = interval.coarse_dt(),
            "coarsening interval"
        );

        let v = ScopedVector::init(ops, t, "v")?;
        write_vector(ops, sink, t, &v, "(fine)")?;

        let coarse = coarsener
            .coarsen(&interval, v.get())
            .during(Capability::Coarsen)?;
        let vc = ScopedVector::adopt(ops, coarse, "vc");
        write_vector(ops, sink, t, &vc, "(coarsened)")?;

        let refined = refiner
            .refine(&interval, vc.get())
            .during(Capability::Refine)?;
        let vf = ScopedVector::adopt(ops, refined, "vf");
        write_vector(ops, sink, t, &vf, "(refined; compare with v)")?;

        let distance = squared_distance(dot, v.get(), vf.get())?;
        let residual = distance.residual();
        let relative = tol.relative(residual, distance.vv);
        sink.line(&format!(
            "  |v - refine(coarsen(v))|^2 = {:e} (relative {:e})",
            residual, relative
        ));

        vf.retire()?;
        vc.retire()?;
        v.retire()?;

        let mut subs = vec![SubCheck::compare(
            1,
            "refine(coarsen(v)) residual is finite",
            residual.is_finite(),
            residual,
            0.0,
        )];
        if let Some(bound) = self.coarsen_refine_bound {
            subs.push(SubCheck::compare(
                2,
                "relative residual within bound",
                relative <= bound,
                relative,
                bound,
            ));
        }
        for sub in &subs {
            record(CheckKind::CoarsenRefine, sink, sub);
        }

        let mut outcome = CheckOutcome::verified(CheckKind::CoarsenRefine, subs)
            .with_residual(residual, relative);
        if self.coarsen_refine_bound.is_none() && outcome.verdict == Verdict::Pass {
            outcome.verdict = Verdict::Diagnostic;
        }
        Ok(outcome)
    }
}

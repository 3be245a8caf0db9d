//! Inner-product identities
//!
//! Everything here is measured through the user's own `dot`, with `clone`
//! and `sum` used to build the scaled and differenced vectors:
//!
//! 1. `⟨v, v⟩ ≥ −ε`
//! 2. `⟨2v, 2v⟩ = 4⟨v, v⟩`
//! 3. `⟨3v, v⟩ / ⟨v, v⟩ = 3`, inconclusive when `⟨v, v⟩` is at the zero floor
//! 4. `‖v − clone(v)‖² = 0` by polarization
//! 5. `⟨v − clone(v), v − clone(v)⟩ = 0` with the difference formed by `sum`

use braidcheck_core::{
    Capability, CallbackResultExt, CheckKind, CheckOutcome, ExecutionScope, ReportSink, Result,
    SubCheck, VectorOps,
};

use super::{announce, record, require, Harness};
use crate::guard::{combine, ScopedVector};
use crate::residual::squared_distance;

impl Harness {
    /// Verify inner-product identities on a vector created at `t`.
    ///
    /// Passes iff no sub-check exceeds tolerance; inconclusive sub-checks do
    /// not fail. Each failing sub-check is logged with its number, observed
    /// and expected values.
    ///
    /// # Errors
    ///
    /// - [`braidcheck_core::Error::MissingCapability`] if no inner product is supplied
    /// - [`braidcheck_core::Error::CallbackFailure`] if any capability call fails
    pub fn test_dot<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
    ) -> Result<CheckOutcome> {
        let dot = require(ops.inner_product(), Capability::Dot, CheckKind::Dot)?;
        let tol = self.tolerance;
        let _span = announce(CheckKind::Dot, scope, sink, t);
        let mut subs = Vec::with_capacity(5);

        let v = ScopedVector::init(ops, t, "v")?;
        let vv = dot.dot(v.get(), v.get()).during(Capability::Dot)?;
        sink.line(&format!("  <v, v> = {:e}", vv));

        subs.push(SubCheck::compare(
            1,
            "<v, v> >= 0",
            tol.is_non_negative(vv),
            vv,
            0.0,
        ));

        let mut w = v.clone_as("w")?;
        combine(ops, 2.0, &v, 0.0, &mut w)?;
        let ww = dot.dot(w.get(), w.get()).during(Capability::Dot)?;
        subs.push(SubCheck::compare(
            2,
            "<2v, 2v> = 4 <v, v>",
            tol.approx_eq(ww, 4.0 * vv),
            ww,
            4.0 * vv,
        ));

        combine(ops, 3.0, &v, 0.0, &mut w)?;
        let wv = dot.dot(w.get(), v.get()).during(Capability::Dot)?;
        if tol.is_near_zero(vv) {
            subs.push(SubCheck::inconclusive(
                3,
                "<3v, v> / <v, v> = 3 (<v, v> is zero)",
                wv,
                3.0 * vv,
            ));
        } else {
            let ratio = wv / vv;
            subs.push(SubCheck::compare(
                3,
                "<3v, v> / <v, v> = 3",
                tol.approx_eq(ratio, 3.0),
                ratio,
                3.0,
            ));
        }

        let mut c = v.clone_as("c")?;
        let residual = squared_distance(dot, v.get(), c.get())?.residual();
        subs.push(SubCheck::compare(
            4,
            "|v - clone(v)|^2 = 0",
            tol.residual_within(residual, vv),
            residual,
            0.0,
        ));

        combine(ops, 1.0, &v, -1.0, &mut c)?;
        let zz = dot.dot(c.get(), c.get()).during(Capability::Dot)?;
        subs.push(SubCheck::compare(
            5,
            "<v - clone(v), v - clone(v)> = 0",
            tol.residual_within(zz, vv),
            zz,
            0.0,
        ));

        c.retire()?;
        w.retire()?;
        v.retire()?;

        for sub in &subs {
            record(CheckKind::Dot, sink, sub);
        }
        Ok(CheckOutcome::verified(CheckKind::Dot, subs))
    }
}

//! Linear-combination diagnostics

use braidcheck_core::{CheckKind, CheckOutcome, ExecutionScope, ReportSink, Result, VectorOps};

use super::{announce, write_vector, Harness};
use crate::guard::{combine, ScopedVector};

impl Harness {
    /// Apply `sum` to a vector and fresh clones of it and write each combination.
    ///
    /// The combinations, in order:
    /// 1. `w ← 1·v + 0·w` must reproduce `v`
    /// 2. `u ← 1·v − 1·u` with `u` a new clone of `v` must be the zero element
    /// 3. `w ← 2·v + 0·w` must be `v` scaled by two
    ///
    /// Diagnostic only; [`Harness::test_dot`] verifies the same identities
    /// through the inner product.
    pub fn test_sum<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
    ) -> Result<CheckOutcome> {
        let _span = announce(CheckKind::Sum, scope, sink, t);

        let v = ScopedVector::init(ops, t, "v")?;
        let mut w = v.clone_as("w")?;

        combine(ops, 1.0, &v, 0.0, &mut w)?;
        emit(ops, sink, t, &w, "= 1*v + 0*w (must equal v)")?;

        let mut u = v.clone_as("u")?;
        combine(ops, 1.0, &v, -1.0, &mut u)?;
        emit(ops, sink, t, &u, "= 1*v - 1*u (must be zero)")?;
        u.retire()?;

        combine(ops, 2.0, &v, 0.0, &mut w)?;
        emit(ops, sink, t, &w, "= 2*v + 0*w (must equal 2v)")?;

        if ops.writer().is_none() {
            sink.line("  no write capability; nothing to inspect");
        }

        w.retire()?;
        v.retire()?;
        sink.line("  free v, w, u");

        Ok(CheckOutcome::diagnostic(CheckKind::Sum))
    }
}

fn emit<C: VectorOps + ?Sized>(
    ops: &C,
    sink: &mut dyn ReportSink,
    t: f64,
    vector: &ScopedVector<'_, C>,
    note: &str,
) -> Result<()> {
    if !write_vector(ops, sink, t, vector, note)? {
        sink.line(&format!("  computed {} {}", vector.label(), note));
    }
    Ok(())
}

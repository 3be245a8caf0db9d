//! Clone, then write original and copy side by side

use braidcheck_core::{CheckKind, CheckOutcome, ExecutionScope, ReportSink, Result, VectorOps};

use super::{announce, write_vector, Harness};
use crate::guard::ScopedVector;

impl Harness {
    /// Create a vector at `t`, clone it, write both, free both.
    ///
    /// Diagnostic only: the two written representations should be identical.
    /// Clones are verified automatically by [`Harness::test_dot`].
    pub fn test_clone<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
    ) -> Result<CheckOutcome> {
        let _span = announce(CheckKind::Clone, scope, sink, t);

        let v = ScopedVector::init(ops, t, "v")?;
        let w = v.clone_as("w")?;
        sink.line("  init v, clone v into w");

        let wrote = write_vector(ops, sink, t, &v, "(original)")?;
        write_vector(ops, sink, t, &w, "(clone; must match v)")?;
        if !wrote {
            sink.line("  no write capability; nothing to inspect");
        }

        w.retire()?;
        v.retire()?;
        sink.line("  free v, w");

        Ok(CheckOutcome::diagnostic(CheckKind::Clone))
    }
}

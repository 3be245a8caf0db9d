//! Init / write / free

use braidcheck_core::{CheckKind, CheckOutcome, ExecutionScope, ReportSink, Result, VectorOps};

use super::{announce, write_vector, Harness};
use crate::guard::ScopedVector;

impl Harness {
    /// Create a vector at `t`, write it, free it.
    ///
    /// Diagnostic only: there is no reference to compare a fresh vector
    /// against, so the written output is the result.
    ///
    /// # Errors
    ///
    /// Returns [`braidcheck_core::Error::CallbackFailure`] if `init`, `write`
    /// or `free` fails.
    pub fn test_init_write<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
    ) -> Result<CheckOutcome> {
        let _span = announce(CheckKind::InitWrite, scope, sink, t);

        let v = ScopedVector::init(ops, t, "v")?;
        sink.line("  init v");

        if !write_vector(ops, sink, t, &v, "(fresh from init)")? {
            sink.line("  no write capability; nothing to inspect");
        }

        v.retire()?;
        sink.line("  free v");

        Ok(CheckOutcome::diagnostic(CheckKind::InitWrite))
    }
}

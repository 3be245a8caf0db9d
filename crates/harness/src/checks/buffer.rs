//! Serialization round trip
//!
//! Packs a vector into a buffer sized by `bufsize`, unpacks a fresh vector
//! from the written prefix and compares the two by polarization residual.

use braidcheck_core::{
    CallbackError, CallbackResultExt, Capability, CheckKind, CheckOutcome, Error, ExecutionScope,
    ReportSink, Result, SubCheck, VectorOps,
};
use tracing::debug;

use super::{announce, record, require, Harness};
use crate::guard::ScopedVector;
use crate::residual::squared_distance;

impl Harness {
    /// Verify `unpack(pack(v)) ≈ v` for a vector created at `t`.
    ///
    /// The residual `‖v − v2‖²` must be within tolerance relative to
    /// `⟨v, v⟩`, or within absolute tolerance when `⟨v, v⟩` is zero.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingCapability`] if the inner product or any buffer
    ///   capability is absent
    /// - [`Error::CallbackFailure`] if a call fails, if `bufsize` reports a
    ///   size that cannot be allocated, or if `pack` reports more bytes than
    ///   the buffer holds
    pub fn test_buffer<C: VectorOps + ?Sized>(
        &self,
        ops: &C,
        scope: &dyn ExecutionScope,
        sink: &mut dyn ReportSink,
        t: f64,
    ) -> Result<CheckOutcome> {
        let dot = require(ops.inner_product(), Capability::Dot, CheckKind::Buffer)?;
        let codec = require(ops.buffer_codec(), Capability::BufSize, CheckKind::Buffer)?;
        let tol = self.tolerance;
        let _span = announce(CheckKind::Buffer, scope, sink, t);

        let v = ScopedVector::init(ops, t, "v")?;

        let size = codec.buf_size().during(Capability::BufSize)?;
        let mut buffer: Vec<u8> = Vec::new();
        buffer.try_reserve_exact(size).map_err(|e| {
            Error::callback(
                Capability::BufSize,
                CallbackError::msg(format!("cannot allocate a {}-byte buffer: {}", size, e)),
            )
        })?;
        buffer.resize(size, 0);
        sink.line(&format!("  bufsize reports {} bytes", size));

        let written = codec
            .pack(v.get(), &mut buffer)
            .during(Capability::BufPack)?;
        if written > size {
            return Err(Error::callback(
                Capability::BufPack,
                CallbackError::msg(format!(
                    "reported {} bytes written into a {}-byte buffer",
                    written, size
                )),
            ));
        }
        debug!(target: "braidcheck::harness", size, written, "packed");
        sink.line(&format!("  bufpack wrote {} bytes", written));

        let unpacked = codec
            .unpack(&buffer[..written])
            .during(Capability::BufUnpack)?;
        let v2 = ScopedVector::adopt(ops, unpacked, "v2");
        drop(buffer);
        sink.line("  bufunpack v2");

        let distance = squared_distance(dot, v.get(), v2.get())?;
        let residual = distance.residual();
        let relative = tol.relative(residual, distance.vv);

        v2.retire()?;
        v.retire()?;

        let sub = SubCheck::compare(
            1,
            "|v - unpack(pack(v))|^2 = 0",
            tol.residual_within(residual, distance.vv),
            residual,
            0.0,
        );
        record(CheckKind::Buffer, sink, &sub);

        Ok(CheckOutcome::verified(CheckKind::Buffer, vec![sub]).with_residual(residual, relative))
    }
}

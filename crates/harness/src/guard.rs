//! Scoped ownership of user vectors
//!
//! Every vector a check creates must be released exactly once, on every exit
//! path. [`ScopedVector`] owns one vector for the duration of a check: the
//! normal path calls [`ScopedVector::retire`] so a failing `free` surfaces as
//! a callback failure; early returns drop the guard, which releases the
//! vector and logs (but cannot propagate) a failing `free`.

use braidcheck_core::{Capability, CallbackResultExt, Result, VectorOps};
use tracing::{debug, warn};

/// A user vector released through `free` when the guard goes away
pub(crate) struct ScopedVector<'a, C: VectorOps + ?Sized> {
    ops: &'a C,
    vector: Option<C::Vector>,
    label: &'static str,
}

impl<'a, C: VectorOps + ?Sized> ScopedVector<'a, C> {
    /// Create a vector at time `t` through `init`
    pub(crate) fn init(ops: &'a C, t: f64, label: &'static str) -> Result<Self> {
        let vector = ops.init(t).during(Capability::Init)?;
        debug!(target: "braidcheck::harness", vector = label, t, "init");
        Ok(Self::adopt(ops, vector, label))
    }

    /// Take ownership of a vector produced by another capability
    pub(crate) fn adopt(ops: &'a C, vector: C::Vector, label: &'static str) -> Self {
        Self {
            ops,
            vector: Some(vector),
            label,
        }
    }

    /// Clone this vector through `clone`
    pub(crate) fn clone_as(&self, label: &'static str) -> Result<Self> {
        let vector = self
            .ops
            .clone_vector(self.get())
            .during(Capability::Clone)?;
        debug!(target: "braidcheck::harness", from = self.label, to = label, "clone");
        Ok(Self::adopt(self.ops, vector, label))
    }

    /// Name used in logs and report lines
    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn get(&self) -> &C::Vector {
        self.vector
            .as_ref()
            .expect("vector is present until retired")
    }

    pub(crate) fn get_mut(&mut self) -> &mut C::Vector {
        self.vector
            .as_mut()
            .expect("vector is present until retired")
    }

    /// Release the vector, propagating a failing `free`
    pub(crate) fn retire(mut self) -> Result<()> {
        match self.vector.take() {
            Some(vector) => {
                self.ops.free(vector).during(Capability::Free)?;
                debug!(target: "braidcheck::harness", vector = self.label, "free");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<C: VectorOps + ?Sized> Drop for ScopedVector<'_, C> {
    fn drop(&mut self) {
        if let Some(vector) = self.vector.take() {
            if let Err(e) = self.ops.free(vector) {
                warn!(
                    target: "braidcheck::harness",
                    vector = self.label,
                    error = %e,
                    "free failed while unwinding a check"
                );
            }
        }
    }
}

/// `y ← alpha·x + beta·y` through `sum`
pub(crate) fn combine<C: VectorOps + ?Sized>(
    ops: &C,
    alpha: f64,
    x: &ScopedVector<'_, C>,
    beta: f64,
    y: &mut ScopedVector<'_, C>,
) -> Result<()> {
    ops.sum(alpha, x.get(), beta, y.get_mut())
        .during(Capability::Sum)?;
    debug!(
        target: "braidcheck::harness",
        alpha, x = x.label, beta, y = y.label,
        "sum"
    );
    Ok(())
}

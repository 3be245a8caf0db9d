//! Capability traits for user-supplied vector implementations
//!
//! This module defines the interface a solver user implements so that the
//! harness (and the solver) can drive an opaque vector type. The capability
//! object doubles as the user's context: every callback receives it as
//! `&self`, and it outlives every vector it creates.
//!
//! Mandatory capabilities (`init`, `free`, `clone_vector`, `sum`) are required
//! trait methods. Optional capability families are exposed through accessor
//! methods returning `Option<&dyn ...>`, so "capability absent" is a checked
//! state rather than a null pointer.

use crate::error::CallbackResult;
use crate::report::ReportSink;
use crate::types::GridInterval;

/// The capability set over an opaque vector type
///
/// # Examples
///
/// ```
/// use braidcheck_core::error::CallbackResult;
/// use braidcheck_core::traits::{InnerProduct, VectorOps};
///
/// struct Scalar;
///
/// impl VectorOps for Scalar {
///     type Vector = f64;
///
///     fn init(&self, t: f64) -> CallbackResult<f64> {
///         Ok(t)
///     }
///
///     fn free(&self, _vector: f64) -> CallbackResult<()> {
///         Ok(())
///     }
///
///     fn clone_vector(&self, vector: &f64) -> CallbackResult<f64> {
///         Ok(*vector)
///     }
///
///     fn sum(&self, alpha: f64, x: &f64, beta: f64, y: &mut f64) -> CallbackResult<()> {
///         *y = alpha * x + beta * *y;
///         Ok(())
///     }
///
///     fn inner_product(&self) -> Option<&dyn InnerProduct<f64>> {
///         Some(self)
///     }
/// }
///
/// impl InnerProduct<f64> for Scalar {
///     fn dot(&self, x: &f64, y: &f64) -> CallbackResult<f64> {
///         Ok(x * y)
///     }
/// }
/// ```
pub trait VectorOps {
    /// Opaque per-time-point state
    type Vector;

    /// Create a vector at time `t` on the finest grid
    fn init(&self, t: f64) -> CallbackResult<Self::Vector>;

    /// Release a vector
    ///
    /// Takes the vector by value, so each vector is released at most once.
    fn free(&self, vector: Self::Vector) -> CallbackResult<()>;

    /// Produce an independent copy of `vector`
    fn clone_vector(&self, vector: &Self::Vector) -> CallbackResult<Self::Vector>;

    /// Linear combination in place: `y ← alpha·x + beta·y`
    fn sum(
        &self,
        alpha: f64,
        x: &Self::Vector,
        beta: f64,
        y: &mut Self::Vector,
    ) -> CallbackResult<()>;

    /// Write capability, if supplied
    fn writer(&self) -> Option<&dyn VectorWrite<Self::Vector>> {
        None
    }

    /// Inner-product capability, if supplied
    fn inner_product(&self) -> Option<&dyn InnerProduct<Self::Vector>> {
        None
    }

    /// Serialization capabilities (size bound, pack, unpack), if supplied
    fn buffer_codec(&self) -> Option<&dyn BufferCodec<Self::Vector>> {
        None
    }

    /// Spatial coarsening capability, if supplied
    fn coarsener(&self) -> Option<&dyn Coarsen<Self::Vector>> {
        None
    }

    /// Spatial refinement capability, if supplied
    fn refiner(&self) -> Option<&dyn Refine<Self::Vector>> {
        None
    }
}

/// Emit a human-inspectable representation of a vector
pub trait VectorWrite<V> {
    /// Write `vector`, created at or associated with time `t`, to `sink`
    fn write(&self, t: f64, vector: &V, sink: &mut dyn ReportSink) -> CallbackResult<()>;
}

/// Inner product over the vector space
///
/// May perform collective communication across the execution scope.
pub trait InnerProduct<V> {
    /// Compute `⟨x, y⟩`
    fn dot(&self, x: &V, y: &V) -> CallbackResult<f64>;
}

/// Serialization of a vector into a flat byte buffer
pub trait BufferCodec<V> {
    /// Upper bound, in bytes, of any packed vector
    fn buf_size(&self) -> CallbackResult<usize>;

    /// Pack `vector` into `buffer`, returning the number of bytes written
    fn pack(&self, vector: &V, buffer: &mut [u8]) -> CallbackResult<usize>;

    /// Rebuild a vector from the bytes written by [`BufferCodec::pack`]
    fn unpack(&self, buffer: &[u8]) -> CallbackResult<V>;
}

/// Spatial restriction from the fine to the coarse temporal grid
pub trait Coarsen<V> {
    /// Coarsen `fine` over `interval`
    fn coarsen(&self, interval: &GridInterval, fine: &V) -> CallbackResult<V>;
}

/// Spatial prolongation from the coarse back to the fine temporal grid
pub trait Refine<V> {
    /// Refine `coarse` over `interval`
    fn refine(&self, interval: &GridInterval, coarse: &V) -> CallbackResult<V>;
}

//! Squared distance from inner products alone
//!
//! The harness cannot subtract two opaque vectors without mutating one of
//! them, so equality is measured with the polarization identity:
//!
//! ```text
//! ‖v − w‖² = ⟨v, v⟩ + ⟨w, w⟩ − 2⟨v, w⟩
//! ```
//!
//! The result can be slightly negative from rounding; callers compare its
//! magnitude.

use braidcheck_core::{Capability, CallbackResultExt, InnerProduct, Result};

/// Inner products gathered for one distance measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// `⟨v, v⟩`
    pub vv: f64,
    /// `⟨w, w⟩`
    pub ww: f64,
    /// `⟨v, w⟩`
    pub vw: f64,
}

impl Distance {
    /// `⟨v, v⟩ + ⟨w, w⟩ − 2⟨v, w⟩`
    pub fn residual(&self) -> f64 {
        polarization_residual(self.vv, self.ww, self.vw)
    }
}

/// Squared distance from the three inner products
pub fn polarization_residual(vv: f64, ww: f64, vw: f64) -> f64 {
    vv + ww - 2.0 * vw
}

/// Measure the distance between `v` and `w` with three `dot` calls
pub(crate) fn squared_distance<V>(dot: &dyn InnerProduct<V>, v: &V, w: &V) -> Result<Distance> {
    let vv = dot.dot(v, v).during(Capability::Dot)?;
    let ww = dot.dot(w, w).during(Capability::Dot)?;
    let vw = dot.dot(v, w).during(Capability::Dot)?;
    Ok(Distance { vv, ww, vw })
}

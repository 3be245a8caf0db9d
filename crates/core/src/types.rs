//! Time-grid value types shared by the checks
//!
//! - StepSizes: the fine/coarse time-step pair for multiresolution checks
//! - GridInterval: the interval handed to coarsen/refine callbacks

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fine and coarse time-step sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSizes {
    /// Fine time step the vector is coarsened from
    pub fine: f64,
    /// Coarse time step the vector is coarsened to
    pub coarse: f64,
}

impl StepSizes {
    /// Create a validated step-size pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either step is not a positive,
    /// finite number.
    pub fn new(fine: f64, coarse: f64) -> Result<Self> {
        let steps = Self { fine, coarse };
        steps.validate()?;
        Ok(steps)
    }

    /// Check that both steps are positive and finite
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("fine_dt", self.fine), ("coarse_dt", self.coarse)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Interval starting at `t` on both grids
    pub fn interval_at(&self, t: f64) -> GridInterval {
        GridInterval {
            start: t,
            fine_stop: t + self.fine,
            coarse_stop: t + self.coarse,
        }
    }
}

/// Time interval seen by coarsen/refine callbacks
///
/// The vector lives at `start`; `fine_stop` and `coarse_stop` are the ends of
/// the next step on the fine and coarse grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridInterval {
    /// Time the vector is associated with
    pub start: f64,
    /// End of the fine step
    pub fine_stop: f64,
    /// End of the coarse step
    pub coarse_stop: f64,
}

impl GridInterval {
    /// Length of the fine step
    pub fn fine_dt(&self) -> f64 {
        self.fine_stop - self.start
    }

    /// Length of the coarse step
    pub fn coarse_dt(&self) -> f64 {
        self.coarse_stop - self.start
    }
}

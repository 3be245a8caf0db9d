//! Tolerance policy for floating-point comparisons
//!
//! A single epsilon drives every numeric comparison the checks make. It is a
//! relative bound: the slack scales with the magnitude of the reference value,
//! so a state of norm 1e-7 is held to the same standard as one of norm 1e7.
//! Only a reference at or below the zero floor (by default the smallest normal
//! `f64`) falls back to an absolute comparison against epsilon.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Default epsilon, matching the wiggle room solver test drivers use
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Default magnitude at or below which a reference value counts as zero
pub const DEFAULT_ZERO_FLOOR: f64 = f64::MIN_POSITIVE;

/// Numeric slack shared by all checks
///
/// Deserialization goes through [`Tolerance::new`], so an invalid epsilon in
/// serialized input is rejected rather than reaching a check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    epsilon: f64,
    zero_floor: f64,
}

#[derive(Deserialize)]
struct ToleranceRepr {
    epsilon: f64,
    #[serde(default = "default_zero_floor")]
    zero_floor: f64,
}

fn default_zero_floor() -> f64 {
    DEFAULT_ZERO_FLOOR
}

impl<'de> Deserialize<'de> for Tolerance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = ToleranceRepr::deserialize(deserializer)?;
        Tolerance::new(repr.epsilon)
            .and_then(|tol| tol.with_zero_floor(repr.zero_floor))
            .map_err(serde::de::Error::custom)
    }
}

fn validate_magnitude(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{} must be a non-negative finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Tolerance {
    /// Create a tolerance
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `epsilon` is negative, NaN or infinite.
    pub fn new(epsilon: f64) -> Result<Self> {
        validate_magnitude("tolerance", epsilon)?;
        Ok(Self {
            epsilon,
            zero_floor: DEFAULT_ZERO_FLOOR,
        })
    }

    /// Replace the zero floor
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `floor` is negative, NaN or infinite.
    pub fn with_zero_floor(mut self, floor: f64) -> Result<Self> {
        validate_magnitude("zero floor", floor)?;
        self.zero_floor = floor;
        Ok(self)
    }

    /// Zero slack; only exact equality passes
    pub const fn strict() -> Self {
        Self {
            epsilon: 0.0,
            zero_floor: DEFAULT_ZERO_FLOOR,
        }
    }

    /// The configured epsilon
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The configured zero floor
    pub fn zero_floor(&self) -> f64 {
        self.zero_floor
    }

    /// `|observed − expected| ≤ ε·|expected|`, or `≤ ε` when `expected` is zero
    ///
    /// NaN on either side never compares equal.
    pub fn approx_eq(&self, observed: f64, expected: f64) -> bool {
        let diff = (observed - expected).abs();
        if self.is_near_zero(expected) {
            diff <= self.epsilon
        } else {
            diff <= self.epsilon * expected.abs()
        }
    }

    /// `|x|` at or below the zero floor
    pub fn is_near_zero(&self, x: f64) -> bool {
        x.abs() <= self.zero_floor
    }

    /// `x ≥ −ε`
    pub fn is_non_negative(&self, x: f64) -> bool {
        x >= -self.epsilon
    }

    /// Scale `residual` by `reference` unless the reference is zero
    ///
    /// Used to express a squared distance relative to a squared norm.
    pub fn relative(&self, residual: f64, reference: f64) -> f64 {
        if self.is_near_zero(reference) {
            residual.abs()
        } else {
            residual.abs() / reference.abs()
        }
    }

    /// Whether a squared-distance `residual` is negligible against `reference`
    pub fn residual_within(&self, residual: f64, reference: f64) -> bool {
        self.relative(residual, reference) <= self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            zero_floor: DEFAULT_ZERO_FLOOR,
        }
    }
}

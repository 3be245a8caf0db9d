//! Harness configuration via `braidcheck.toml`
//!
//! Collects the knobs a test driver usually hardcodes (tolerance, probe time,
//! step sizes, coarsen/refine bound) in one file so the same driver can be
//! rerun with different settings on every process of a job.

use std::io;
use std::path::Path;

use braidcheck_core::{Error, Result, StepSizes, Tolerance, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};

/// Config file name looked up by drivers
pub const CONFIG_FILE_NAME: &str = "braidcheck.toml";

/// Harness configuration loaded from `braidcheck.toml`.
///
/// # Example
///
/// ```toml
/// tolerance = 1e-12
/// probe_time = 0.0
/// fine_dt = 0.1
/// coarse_dt = 0.2
/// # coarsen_refine_bound = 1e-3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Epsilon for every numeric comparison.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Time value test vectors are created at.
    #[serde(default)]
    pub probe_time: f64,
    /// Fine time step the coarsen/refine check coarsens from.
    #[serde(default = "default_fine_dt")]
    pub fine_dt: f64,
    /// Coarse time step the coarsen/refine check coarsens to.
    #[serde(default = "default_coarse_dt")]
    pub coarse_dt: f64,
    /// Upper bound on the relative coarsen/refine residual.
    /// When absent the coarsen/refine check is diagnostic only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coarsen_refine_bound: Option<f64>,
}

fn default_tolerance() -> f64 {
    DEFAULT_EPSILON
}

fn default_fine_dt() -> f64 {
    0.1
}

fn default_coarse_dt() -> f64 {
    0.2
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            probe_time: 0.0,
            fine_dt: default_fine_dt(),
            coarse_dt: default_coarse_dt(),
            coarsen_refine_bound: None,
        }
    }
}

impl HarnessConfig {
    /// Validated tolerance.
    pub fn tolerance(&self) -> Result<Tolerance> {
        Tolerance::new(self.tolerance)
    }

    /// Validated step-size pair.
    pub fn steps(&self) -> Result<StepSizes> {
        StepSizes::new(self.fine_dt, self.coarse_dt)
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a negative or non-finite tolerance
    /// or bound, a non-finite probe time, or non-positive step sizes.
    pub fn validate(&self) -> Result<()> {
        self.tolerance()?;
        self.steps()?;
        if !self.probe_time.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "probe_time must be finite, got {}",
                self.probe_time
            )));
        }
        if let Some(bound) = self.coarsen_refine_bound {
            validate_bound(bound)?;
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# braidcheck configuration
#
# Epsilon applied to every floating-point comparison (default: 1e-12).
# Relative to the magnitude of the expected value; absolute only when the
# reference value is zero.
tolerance = 1e-12

# Time value the test vectors are initialized at (default: 0.0).
probe_time = 0.0

# Step sizes for the coarsen/refine check: the vector is coarsened from
# the fine step to the coarse step and refined back.
fine_dt = 0.1
coarse_dt = 0.2

# Upper bound on refine(coarsen(v)) residual relative to <v, v>.
# Leave commented out to keep the coarsen/refine check diagnostic only.
# coarsen_refine_bound = 1e-3
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("{} (in '{}')", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub(crate) fn validate_bound(bound: f64) -> Result<()> {
    if !bound.is_finite() || bound < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "coarsen_refine_bound must be a non-negative finite number, got {}",
            bound
        )));
    }
    Ok(())
}

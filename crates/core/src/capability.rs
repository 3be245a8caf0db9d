//! Capability names and presence tracking
//!
//! [`Capability`] names each operation of the fixed callback interface;
//! [`CapabilitySet`] records which optional ones a [`VectorOps`]
//! implementation actually supplies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::VectorOps;

/// One named operation of the callback interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create a vector at a time value
    Init,
    /// Emit a vector for inspection
    Write,
    /// Release a vector
    Free,
    /// Copy a vector
    Clone,
    /// Linear combination `y ← αx + βy`
    Sum,
    /// Inner product
    Dot,
    /// Packed-size upper bound
    BufSize,
    /// Serialize into a buffer
    BufPack,
    /// Deserialize from a buffer
    BufUnpack,
    /// Spatial coarsening
    Coarsen,
    /// Spatial refinement
    Refine,
}

impl Capability {
    /// Every capability, in interface order
    pub const ALL: [Capability; 11] = [
        Capability::Init,
        Capability::Write,
        Capability::Free,
        Capability::Clone,
        Capability::Sum,
        Capability::Dot,
        Capability::BufSize,
        Capability::BufPack,
        Capability::BufUnpack,
        Capability::Coarsen,
        Capability::Refine,
    ];

    /// Capabilities without which the aggregate run cannot start
    pub const MANDATORY: [Capability; 5] = [
        Capability::Init,
        Capability::Free,
        Capability::Clone,
        Capability::Sum,
        Capability::Dot,
    ];

    /// Lowercase name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Init => "init",
            Capability::Write => "write",
            Capability::Free => "free",
            Capability::Clone => "clone",
            Capability::Sum => "sum",
            Capability::Dot => "dot",
            Capability::BufSize => "bufsize",
            Capability::BufPack => "bufpack",
            Capability::BufUnpack => "bufunpack",
            Capability::Coarsen => "coarsen",
            Capability::Refine => "refine",
        }
    }

    /// Whether the aggregate run requires this capability
    pub fn is_mandatory(&self) -> bool {
        Self::MANDATORY.contains(self)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Presence flags for the optional capability families
///
/// `init`, `free`, `clone` and `sum` are required trait methods and are
/// always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    write: bool,
    dot: bool,
    buffer: bool,
    coarsen: bool,
    refine: bool,
}

impl CapabilitySet {
    /// Probe an implementation for its optional capabilities
    pub fn of<C: VectorOps + ?Sized>(ops: &C) -> Self {
        Self {
            write: ops.writer().is_some(),
            dot: ops.inner_product().is_some(),
            buffer: ops.buffer_codec().is_some(),
            coarsen: ops.coarsener().is_some(),
            refine: ops.refiner().is_some(),
        }
    }

    /// Whether `capability` is supplied
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Init | Capability::Free | Capability::Clone | Capability::Sum => true,
            Capability::Write => self.write,
            Capability::Dot => self.dot,
            Capability::BufSize | Capability::BufPack | Capability::BufUnpack => self.buffer,
            Capability::Coarsen => self.coarsen,
            Capability::Refine => self.refine,
        }
    }

    /// Supplied capabilities, in interface order
    pub fn present(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }

    /// Which of `required` are absent
    pub fn missing(&self, required: &[Capability]) -> Vec<Capability> {
        required.iter().copied().filter(|c| !self.has(*c)).collect()
    }

    /// Fail with [`Error::MissingCapability`] on the first absent capability
    pub fn require(&self, required: &[Capability], required_by: &'static str) -> Result<()> {
        match self.missing(required).first() {
            Some(&capability) => Err(Error::MissingCapability {
                capability,
                required_by,
            }),
            None => Ok(()),
        }
    }
}

//! Sanity checks for user-supplied vector callbacks
//!
//! Before a parallel-in-time solver trusts a user's vector implementation,
//! the harness exercises each capability in isolation:
//!
//! - `init-write`, `clone`, `sum`: diagnostic only; judged from written output
//! - `dot`: inner-product identities (non-negativity, scaling, ratio, clone, inverse)
//! - `buffer`: pack/unpack round trip
//! - `coarsen-refine`: residual of refine(coarsen(v)), skipped when unsupported
//!
//! [`Harness::run_all`] runs them in order and ANDs the automatic verdicts.
//!
//! # Architecture
//!
//! All checks receive the capability object (which is also the user's
//! context), an opaque execution scope, and an injected report sink. Vectors
//! are owned by a scoped guard that releases them through `free` on every
//! exit path.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod config;
mod guard;
pub mod residual;
pub mod runner;

pub use checks::Harness;
pub use config::{HarnessConfig, CONFIG_FILE_NAME};
pub use residual::{polarization_residual, Distance};
pub use runner::{run_all_with_config, RunSummary};

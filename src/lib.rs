//! braidcheck - conformance checks for parallel-in-time vector callbacks
//!
//! A user of a multigrid-in-time solver supplies an opaque vector type and a
//! fixed set of callbacks (init, free, clone, sum, dot, buffer pack/unpack,
//! coarsen/refine). braidcheck runs numerical sanity checks against those
//! callbacks before they are handed to the solver.
//!
//! # Quick Start
//!
//! ```ignore
//! use braidcheck::{Harness, LocalScope, StepSizes, Tolerance, WriterSink};
//!
//! let harness = Harness::new(Tolerance::default());
//! let mut sink = WriterSink::new(std::io::stdout());
//! let steps = StepSizes::new(0.1, 0.2)?;
//! let ok = harness.run_all(&app, &LocalScope, &mut sink, 0.0, steps)?;
//! ```
//!
//! # Architecture
//!
//! - `braidcheck-core`: capability traits, tolerance, scopes, sinks, outcomes, errors
//! - `braidcheck-harness`: the checks, the aggregate runner and configuration

pub use braidcheck_core::*;
pub use braidcheck_harness::*;

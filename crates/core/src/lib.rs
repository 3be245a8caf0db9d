//! Core types and traits for braidcheck
//!
//! This crate defines the vocabulary shared by the harness and by users who
//! implement a vector type for a parallel-in-time solver:
//! - VectorOps and the optional capability traits (write, dot, buffer, coarsen, refine)
//! - Capability / CapabilitySet: named capabilities and presence flags
//! - Tolerance: the epsilon and comparison rules every check uses
//! - ExecutionScope: opaque handle for the cooperating process group
//! - ReportSink: the injected diagnostic channel
//! - CheckOutcome: verdicts and numbered sub-check results
//! - Error: configuration errors and callback failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod error;
pub mod outcome;
pub mod report;
pub mod scope;
pub mod tolerance;
pub mod traits;
pub mod types;

pub use capability::{Capability, CapabilitySet};
pub use error::{CallbackError, CallbackResult, CallbackResultExt, Error, Result};
pub use outcome::{CheckKind, CheckOutcome, SubCheck, SubStatus, Verdict};
pub use report::{MemorySink, NullSink, ReportSink, TracingSink, WriterSink};
pub use scope::{ExecutionScope, LocalScope, NamedScope};
pub use tolerance::{Tolerance, DEFAULT_EPSILON, DEFAULT_ZERO_FLOOR};
pub use traits::{BufferCodec, Coarsen, InnerProduct, Refine, VectorOps, VectorWrite};
pub use types::{GridInterval, StepSizes};

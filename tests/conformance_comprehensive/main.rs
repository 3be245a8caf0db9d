//! Conformance Tests
//!
//! End-to-end runs of the checks through the `braidcheck` facade against a
//! sampled 1-D field with real spatial coarsening:
//! - Checks: each check on a correct implementation and on faulty ones
//! - RunAll: aggregate verdicts, report tokens, JSON summaries
//! - Config: `braidcheck.toml` round trips and config-driven runs
//! - Logging: structured events emitted while checks run

#[path = "../common/mod.rs"]
mod common;

mod checks;
mod config;
mod logging;
mod run_all;

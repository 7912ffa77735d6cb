//! # Engine Module
//!
//! This module implements the convergence orchestration core of foilsolve: the stateful layer
//! that drives an external aerodynamic engine through viscous/inviscid iteration to a converged
//! operating point.
//!
//! ## Overview
//!
//! An analysis [`session::Session`] owns the engine handle together with the loaded geometry and
//! the analysis configuration. The [`solver`] pushes one operating-point specification into the
//! session and runs the two-tier *converge*/*iterate* procedure: a deterministic inviscid stage
//! followed by a bounded, residual-driven boundary-layer iteration. The [`extract`] step turns a
//! converged engine state into an immutable result record.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Analysis parameters, iteration cap and re-initialization policy
//! - **Session** ([`session`]) - Owned engine handle, geometry load and analysis initialization
//! - **Solver** ([`solver`]) - Single operating-point solves in angle-fixed or lift-fixed mode
//! - **Outcomes** ([`outcome`]) - Tagged convergence outcomes instead of raised conditions
//! - **Extraction** ([`extract`]) - Pure read of converged engine state into a result
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress and residual telemetry
//! - **Error Handling** ([`error`]) - Terminal session errors and per-point solve errors

pub mod config;
pub mod error;
pub mod extract;
pub mod outcome;
pub mod progress;
pub mod session;
pub mod solver;

#[cfg(test)]
pub(crate) mod test_support;

//! # Workflows Module
//!
//! High-level multi-point procedures built on the single-point solver in [`crate::engine`].
//!
//! ## Overview
//!
//! A sweep runs an ordered list of operating points through one analysis session, carrying the
//! converged boundary layer of each point into the next as a warm start. A point that fails to
//! converge never aborts the sweep: it is recorded as a partial result (angle only) and the
//! sweep moves on. The output always has one entry per requested point, in request order.
//!
//! ## Architecture
//!
//! - **Sweep Controller** ([`sweep`]) - Ordered angle or lift-coefficient sweeps with per-point
//!   failure isolation and a summary of converged and failed points.
//! - **Polar Workflow** ([`polar`]) - Evenly spaced angle-of-attack polars with CSV export.

pub mod polar;
pub mod sweep;

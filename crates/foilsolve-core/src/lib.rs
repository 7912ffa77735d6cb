//! # foilsolve Core Library
//!
//! Convergence orchestration for two-dimensional airfoil analysis engines that couple a
//! panel-method potential-flow solver with an integral boundary-layer model.
//!
//! The aerodynamic engine itself is an external collaborator reached through the
//! [`core::adapter::AeroEngine`] trait. This crate implements the logic that turns
//! "compute this operating point" into a well-defined sequence of engine calls: driving the
//! viscous/inviscid iteration to convergence, deciding when boundary-layer state must be
//! re-initialized, and isolating failures across a sweep of operating points.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Geometry`, `OperatingPointResult`),
//!   the engine adapter seam, a NACA section generator and an analytic reference engine.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: an owned analysis [`engine::session::Session`],
//!   configuration, the operating-point solver with its two-tier converge/iterate loop, result
//!   extraction, progress reporting and error types.
//!
//! - **[`workflows`]: The Public API.** Multi-point procedures built on the solver: angle and
//!   lift-coefficient sweeps with per-point failure isolation, and polar generation.

pub mod core;
pub mod engine;
pub mod workflows;

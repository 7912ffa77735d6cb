//! # Core Module
//!
//! Foundational, mostly stateless building blocks shared by the solver and the workflows.
//!
//! ## Architecture
//!
//! - **Engine Adapter** ([`adapter`]) - The trait seam to the external aerodynamic engine and the
//!   plain data exchanged across it
//! - **Geometry** ([`geometry`]) - Validated, immutable airfoil coordinate sets
//! - **NACA Sections** ([`naca`]) - Four-digit NACA section generator
//! - **Conformal Sections** ([`conformal`]) - Joukowsky, Kármán–Trefftz and Van de Vooren
//!   sections mapped from a circle
//! - **Results** ([`result`]) - Per-operating-point result records, including the partial
//!   (unconverged) form
//! - **Reference Engine** ([`thin_airfoil`]) - An analytic [`adapter::AeroEngine`] used for demos
//!   and tests when no external engine is linked

pub mod adapter;
pub mod conformal;
pub mod geometry;
pub mod naca;
pub mod result;
pub mod thin_airfoil;

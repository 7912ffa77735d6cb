//! The seam between the orchestration core and the external aerodynamic engine.
//!
//! The engine (geometry discretization, influence coefficients, boundary-layer equations and
//! their Newton solution) is a black box. The solver only sees the flags, scalar residuals and
//! step functions declared by [`AeroEngine`].

use super::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// How the operating point is specified to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecificationMode {
    /// Hold the angle of attack and solve for the resulting forces.
    AngleFixed,
    /// Hold the lift coefficient and solve for the angle that produces it.
    LiftFixed,
}

/// How the engine derives the effective Reynolds number from the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReynoldsMode {
    /// Reynolds number held constant.
    #[default]
    Fixed,
    /// `Re·√CL` held constant (fixed wing loading).
    InverseSqrtLift,
    /// `Re·CL` held constant (fixed lift).
    InverseLift,
}

impl ReynoldsMode {
    /// The engine's integer convention for this mode.
    pub fn code(self) -> u8 {
        match self {
            ReynoldsMode::Fixed => 1,
            ReynoldsMode::InverseSqrtLift => 2,
            ReynoldsMode::InverseLift => 3,
        }
    }
}

/// How the engine derives the effective Mach number from the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MachMode {
    #[default]
    Fixed,
    /// `M·√CL` held constant.
    InverseSqrtLift,
}

impl MachMode {
    pub fn code(self) -> u8 {
        match self {
            MachMode::Fixed => 1,
            MachMode::InverseSqrtLift => 2,
        }
    }
}

/// Parameters forwarded verbatim to [`AeroEngine::initialize_analysis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParameters {
    pub reynolds: f64,
    pub mach: f64,
    pub critical_amplification: f64,
    pub forced_transition_top: f64,
    pub forced_transition_bottom: f64,
    pub reynolds_mode: ReynoldsMode,
    pub mach_mode: MachMode,
    pub viscous: bool,
}

/// Boundary-layer residual telemetry of the last viscous step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Residuals {
    pub rms: f64,
    pub max: f64,
}

/// Raw engine fields read by the result extractor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineState {
    pub alpha_rad: f64,
    pub cl: f64,
    pub cd: f64,
    pub cdp: f64,
    pub cm: f64,
    /// Effective freestream Reynolds number.
    pub reynolds: f64,
    pub viscous: bool,
    pub converged: bool,
    pub transition_top: f64,
    pub transition_bottom: f64,
}

/// Operations of the external aerodynamic engine consumed by the orchestration core.
///
/// Boolean returns follow the engine's own convention: `false` signals failure of the
/// requested stage. Which failures are terminal for a session and which are per-point is
/// decided by the caller, not by the engine.
pub trait AeroEngine {
    /// Arms (`true`) or clears (`false`) the engine's internal abort flag.
    fn set_cancel(&mut self, cancel: bool);

    /// Loads and discretizes the airfoil contour. `false` on degenerate geometry.
    fn load_geometry(&mut self, geometry: &Geometry) -> bool;

    /// Sets up the flow analysis. `false` on an invalid parameter combination.
    fn initialize_analysis(&mut self, parameters: &AnalysisParameters) -> bool;

    fn set_specification_mode(&mut self, mode: SpecificationMode);

    fn set_angle_of_attack(&mut self, alpha_rad: f64);

    fn set_lift_coefficient_target(&mut self, cl: f64);

    fn set_freestream_speed(&mut self, speed: f64);

    /// Inviscid solution for the specified angle. `false` on an invalid local flow condition.
    fn solve_for_angle(&mut self) -> bool;

    /// Inviscid solution for the specified lift coefficient. `false` on an invalid local flow
    /// condition.
    fn solve_for_lift_target(&mut self) -> bool;

    /// Opens a viscous pass (pass gate). `false` if the pass cannot start.
    fn begin_viscous_pass(&mut self) -> bool;

    /// Advances one boundary-layer Newton step. `false` on step failure.
    fn step_viscous_iteration(&mut self) -> bool;

    /// Post-iteration bookkeeping. `false` signals unrecoverable divergence for this point.
    fn finalize_viscous_step(&mut self) -> bool;

    /// Diagnostic minimum-pressure evaluation. Idempotent and side-effect only.
    fn finalize_pressure(&mut self);

    fn is_converged(&self) -> bool;

    fn clear_convergence(&mut self);

    fn clear_wake(&mut self);

    fn residuals(&self) -> Residuals;

    /// Marks the boundary layer (and the inviscid panel solution it builds on) as initialized or
    /// not. `false` forces a fresh initial guess on the next solve.
    fn set_boundary_layer_initialized(&mut self, initialized: bool);

    fn read_state(&self) -> EngineState;
}

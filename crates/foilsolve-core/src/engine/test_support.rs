//! A scripted [`AeroEngine`] that records every mutating call, for control-flow tests.

use crate::core::adapter::{
    AeroEngine, AnalysisParameters, EngineState, Residuals, SpecificationMode,
};
use crate::core::geometry::Geometry;
use std::collections::VecDeque;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetCancel(bool),
    LoadGeometry,
    InitializeAnalysis,
    SetSpecificationMode(SpecificationMode),
    SetAngle(f64),
    SetLiftTarget(f64),
    SetFreestreamSpeed(f64),
    SolveForAngle,
    SolveForLift,
    BeginViscousPass,
    Step,
    FinalizeViscousStep,
    FinalizePressure,
    ClearConvergence,
    ClearWake,
    SetBoundaryLayerInitialized(bool),
}

#[derive(Debug)]
pub struct ScriptedEngine {
    pub accept_geometry: bool,
    pub accept_analysis: bool,
    /// Inviscid acceptance by mode and specified value (angle in radians or target lift).
    pub accept_inviscid: fn(SpecificationMode, f64) -> bool,
    /// Successful steps a pass needs to converge at the given angle; `None` never converges.
    pub converge_after: fn(f64) -> Option<usize>,
    /// One-based step within a pass that fails outright.
    pub fail_step_at: Option<usize>,
    /// Pass gate answers consumed in order; an empty script accepts.
    pub pass_gate: VecDeque<bool>,
    pub finalize_ok: bool,
    /// Returned by `read_state` instead of the computed state when set.
    pub stale_state: Option<EngineState>,

    calls: Vec<Call>,
    mode: Option<SpecificationMode>,
    alpha: f64,
    cl_target: f64,
    viscous: bool,
    converged: bool,
    boundary_layer_initialized: bool,
    pass_steps: usize,
    residuals: Residuals,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self {
            accept_geometry: true,
            accept_analysis: true,
            accept_inviscid: |_, _| true,
            converge_after: |_| Some(3),
            fail_step_at: None,
            pass_gate: VecDeque::new(),
            finalize_ok: true,
            stale_state: None,
            calls: Vec::new(),
            mode: None,
            alpha: 0.0,
            cl_target: 0.0,
            viscous: true,
            converged: false,
            boundary_layer_initialized: false,
            pass_steps: 0,
            residuals: Residuals::default(),
        }
    }
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn step_calls(&self) -> usize {
        self.count(&Call::Step)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn specification_mode(&self) -> Option<SpecificationMode> {
        self.mode
    }

    pub fn boundary_layer_initialized(&self) -> bool {
        self.boundary_layer_initialized
    }
}

impl AeroEngine for ScriptedEngine {
    fn set_cancel(&mut self, cancel: bool) {
        self.calls.push(Call::SetCancel(cancel));
    }

    fn load_geometry(&mut self, _geometry: &Geometry) -> bool {
        self.calls.push(Call::LoadGeometry);
        self.accept_geometry
    }

    fn initialize_analysis(&mut self, parameters: &AnalysisParameters) -> bool {
        self.calls.push(Call::InitializeAnalysis);
        self.viscous = parameters.viscous;
        self.accept_analysis
    }

    fn set_specification_mode(&mut self, mode: SpecificationMode) {
        self.calls.push(Call::SetSpecificationMode(mode));
        self.mode = Some(mode);
    }

    fn set_angle_of_attack(&mut self, alpha_rad: f64) {
        self.calls.push(Call::SetAngle(alpha_rad));
        self.alpha = alpha_rad;
    }

    fn set_lift_coefficient_target(&mut self, cl: f64) {
        self.calls.push(Call::SetLiftTarget(cl));
        self.cl_target = cl;
    }

    fn set_freestream_speed(&mut self, speed: f64) {
        self.calls.push(Call::SetFreestreamSpeed(speed));
    }

    fn solve_for_angle(&mut self) -> bool {
        self.calls.push(Call::SolveForAngle);
        (self.accept_inviscid)(SpecificationMode::AngleFixed, self.alpha)
    }

    fn solve_for_lift_target(&mut self) -> bool {
        self.calls.push(Call::SolveForLift);
        if !(self.accept_inviscid)(SpecificationMode::LiftFixed, self.cl_target) {
            return false;
        }
        self.alpha = self.cl_target / (2.0 * PI);
        true
    }

    fn begin_viscous_pass(&mut self) -> bool {
        self.calls.push(Call::BeginViscousPass);
        if !self.pass_gate.pop_front().unwrap_or(true) {
            return false;
        }
        self.pass_steps = 0;
        self.boundary_layer_initialized = true;
        if !self.viscous {
            self.converged = true;
        }
        true
    }

    fn step_viscous_iteration(&mut self) -> bool {
        self.calls.push(Call::Step);
        if self.fail_step_at == Some(self.pass_steps + 1) {
            return false;
        }
        self.pass_steps += 1;
        let rms = 1.0 / (self.pass_steps as f64 + 1.0);
        self.residuals = Residuals { rms, max: 2.0 * rms };
        if (self.converge_after)(self.alpha).is_some_and(|n| self.pass_steps >= n) {
            self.converged = true;
        }
        true
    }

    fn finalize_viscous_step(&mut self) -> bool {
        self.calls.push(Call::FinalizeViscousStep);
        self.finalize_ok
    }

    fn finalize_pressure(&mut self) {
        self.calls.push(Call::FinalizePressure);
    }

    fn is_converged(&self) -> bool {
        self.converged
    }

    fn clear_convergence(&mut self) {
        self.calls.push(Call::ClearConvergence);
        self.converged = false;
    }

    fn clear_wake(&mut self) {
        self.calls.push(Call::ClearWake);
    }

    fn residuals(&self) -> Residuals {
        self.residuals
    }

    fn set_boundary_layer_initialized(&mut self, initialized: bool) {
        self.calls.push(Call::SetBoundaryLayerInitialized(initialized));
        self.boundary_layer_initialized = initialized;
    }

    fn read_state(&self) -> EngineState {
        if let Some(state) = self.stale_state {
            return state;
        }
        EngineState {
            alpha_rad: self.alpha,
            cl: 2.0 * PI * self.alpha,
            cd: 0.01,
            cdp: 0.004,
            cm: -0.05,
            reynolds: 2.0e6,
            viscous: self.viscous,
            converged: self.converged,
            transition_top: 0.4,
            transition_bottom: 0.6,
        }
    }
}

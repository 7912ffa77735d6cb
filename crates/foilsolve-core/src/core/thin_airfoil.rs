//! Analytic reference engine.
//!
//! [`ThinAirfoilEngine`] implements [`AeroEngine`] with closed-form models instead of a panel
//! method and boundary-layer solver:
//!
//! - lift from thin-airfoil theory (`2π(α − α₀)`, zero-lift angle and quarter-chord moment from
//!   Fourier coefficients of the geometry's camber line), Prandtl–Glauert corrected;
//! - friction drag from laminar/turbulent flat-plate skin friction blended at the predicted
//!   transition location, with a thickness form factor and a stall drag rise;
//! - a pseudo boundary-layer iteration whose residual contracts geometrically below the stall
//!   angle and grows above it, so convergence cost and failure depend on the operating point
//!   the same way they do for a real coupled solver.
//!
//! It is deterministic and cheap, which makes it suitable for demos and for exercising the
//! orchestration logic end to end. It is not a substitute for a real analysis engine.

use super::adapter::{
    AeroEngine, AnalysisParameters, EngineState, MachMode, ReynoldsMode, Residuals,
    SpecificationMode,
};
use super::geometry::Geometry;
use std::f64::consts::PI;
use tracing::trace;

const QUADRATURE_POINTS: usize = 200;
const SLOPE_STEP: f64 = 1e-3;
const MIN_THICKNESS: f64 = 1e-4;

/// Residual below which the boundary layer counts as converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;
/// Residual above which a step is rejected as failed.
pub const DIVERGENCE_LIMIT: f64 = 1e3;
const COLD_START_RESIDUAL: f64 = 1.0;
const WARM_START_RESIDUAL: f64 = 0.05;
const MAX_TO_RMS_RATIO: f64 = 3.0;

const VISCOUS_LIFT_FACTOR: f64 = 0.95;
const STALL_DRAG: f64 = 0.02;
const MIN_LIFT_FOR_SCALING: f64 = 1e-6;

/// Properties of the loaded section derived once at geometry load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProperties {
    pub zero_lift_alpha: f64,
    /// Quarter-chord moment coefficient at zero Mach.
    pub cm0: f64,
    pub thickness: f64,
    /// Angle above the zero-lift angle at which the boundary layer stops converging.
    pub stall_alpha: f64,
}

impl SectionProperties {
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let slope = |x: f64| -> f64 {
            let lo = (x - SLOPE_STEP).max(0.0);
            let hi = (x + SLOPE_STEP).min(1.0);
            match (geometry.camber_at(lo), geometry.camber_at(hi)) {
                (Some(a), Some(b)) if hi > lo => (b - a) / (hi - lo),
                _ => 0.0,
            }
        };

        let d_theta = PI / QUADRATURE_POINTS as f64;
        let (mut alpha_integral, mut a1_integral, mut a2_integral) = (0.0, 0.0, 0.0);
        for i in 0..QUADRATURE_POINTS {
            let theta = (i as f64 + 0.5) * d_theta;
            let dz_dx = slope(0.5 * (1.0 - theta.cos()));
            alpha_integral += dz_dx * (theta.cos() - 1.0) * d_theta;
            a1_integral += dz_dx * theta.cos() * d_theta;
            a2_integral += dz_dx * (2.0 * theta).cos() * d_theta;
        }

        let zero_lift_alpha = -alpha_integral / PI;
        let a1 = 2.0 / PI * a1_integral;
        let a2 = 2.0 / PI * a2_integral;
        let thickness = geometry.max_thickness(100);
        let stall_alpha = (10.0 + 40.0 * thickness).clamp(8.0, 20.0).to_radians();

        Self {
            zero_lift_alpha,
            cm0: PI / 4.0 * (a2 - a1),
            thickness,
            stall_alpha,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThinAirfoilEngine {
    section: Option<SectionProperties>,
    parameters: Option<AnalysisParameters>,
    cancel: bool,
    mode: Option<SpecificationMode>,
    alpha: f64,
    cl_target: f64,
    speed: f64,
    inviscid_solved: bool,
    boundary_layer_initialized: bool,
    wake: bool,
    converged: bool,
    residuals: Residuals,
    steps_taken: usize,
    cp_min: f64,
    state: EngineState,
}

impl ThinAirfoilEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Option<&SectionProperties> {
        self.section.as_ref()
    }

    /// Total boundary-layer steps performed since the geometry was loaded.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn boundary_layer_initialized(&self) -> bool {
        self.boundary_layer_initialized
    }

    pub fn has_wake(&self) -> bool {
        self.wake
    }

    pub fn specification_mode(&self) -> Option<SpecificationMode> {
        self.mode
    }

    pub fn freestream_speed(&self) -> f64 {
        self.speed
    }

    /// Minimum pressure coefficient from the last diagnostic pressure evaluation.
    pub fn cp_min(&self) -> f64 {
        self.cp_min
    }

    fn effective_mach(parameters: &AnalysisParameters, cl: f64) -> f64 {
        match parameters.mach_mode {
            MachMode::Fixed => parameters.mach,
            MachMode::InverseSqrtLift => {
                parameters.mach / cl.max(MIN_LIFT_FOR_SCALING).sqrt()
            }
        }
    }

    fn effective_reynolds(parameters: &AnalysisParameters, cl: f64) -> f64 {
        let cl = cl.max(MIN_LIFT_FOR_SCALING);
        match parameters.reynolds_mode {
            ReynoldsMode::Fixed => parameters.reynolds,
            ReynoldsMode::InverseSqrtLift => parameters.reynolds / cl.sqrt(),
            ReynoldsMode::InverseLift => parameters.reynolds / cl,
        }
    }

    /// Peak surface speed relative to the freestream.
    fn peak_speed_ratio(section: &SectionProperties, cl: f64) -> f64 {
        1.0 + 1.2 * section.thickness + 0.5 * cl.abs()
    }

    fn lift_factor(parameters: &AnalysisParameters) -> f64 {
        if parameters.viscous {
            VISCOUS_LIFT_FACTOR
        } else {
            1.0
        }
    }

    /// Shared tail of both inviscid specification paths once `self.alpha` is known.
    fn solve_inviscid(&mut self) -> bool {
        let (Some(section), Some(parameters)) = (self.section, self.parameters) else {
            return false;
        };
        if self.cancel {
            return false;
        }

        let cl_incompressible = 2.0 * PI * (self.alpha - section.zero_lift_alpha);
        let mach = Self::effective_mach(&parameters, cl_incompressible);
        if !(0.0..1.0).contains(&mach) {
            return false;
        }
        let beta = (1.0 - mach * mach).sqrt();
        let cl = cl_incompressible / beta * Self::lift_factor(&parameters);

        if mach * Self::peak_speed_ratio(&section, cl) >= 1.0 {
            trace!(mach, cl, "Local flow is supersonic; compressibility correction invalid.");
            return false;
        }

        self.inviscid_solved = true;
        self.state = EngineState {
            alpha_rad: self.alpha,
            cl,
            cd: 0.0,
            cdp: 0.0,
            cm: section.cm0 / beta,
            reynolds: Self::effective_reynolds(&parameters, cl),
            viscous: parameters.viscous,
            converged: false,
            transition_top: 1.0,
            transition_bottom: 1.0,
        };
        true
    }

    fn contraction_rate(&self, section: &SectionProperties) -> f64 {
        let loading = (self.alpha - section.zero_lift_alpha).abs() / section.stall_alpha;
        0.2 + 0.6 * loading * loading
    }

    fn apply_viscous_solution(
        &mut self,
        section: &SectionProperties,
        parameters: &AnalysisParameters,
    ) {
        let alpha_deg = (self.alpha - section.zero_lift_alpha).to_degrees();
        let ncrit_shift = 0.03 * (parameters.critical_amplification - 9.0);
        let natural_top = (0.6 - 0.03 * alpha_deg + ncrit_shift).clamp(0.01, 1.0);
        let natural_bottom = (0.6 + 0.03 * alpha_deg + ncrit_shift).clamp(0.01, 1.0);
        let top = natural_top.min(parameters.forced_transition_top);
        let bottom = natural_bottom.min(parameters.forced_transition_bottom);

        let reynolds = Self::effective_reynolds(parameters, self.state.cl);
        let cf_laminar = 1.328 / reynolds.sqrt();
        let cf_turbulent = 0.074 / reynolds.powf(0.2);
        let side_friction = |xtr: f64| xtr * cf_laminar + (1.0 - xtr) * cf_turbulent;
        let friction = side_friction(top) + side_friction(bottom);

        let t = section.thickness;
        let form_factor = 1.0 + 2.0 * t + 60.0 * t.powi(4);
        let loading = (self.alpha - section.zero_lift_alpha).abs() / section.stall_alpha;
        let cdp = friction * (form_factor - 1.0) + STALL_DRAG * loading.powi(4);

        self.state.cd = friction + cdp;
        self.state.cdp = cdp;
        self.state.reynolds = reynolds;
        self.state.transition_top = top;
        self.state.transition_bottom = bottom;
        self.state.converged = true;
    }
}

impl AeroEngine for ThinAirfoilEngine {
    fn set_cancel(&mut self, cancel: bool) {
        self.cancel = cancel;
    }

    fn load_geometry(&mut self, geometry: &Geometry) -> bool {
        let section = SectionProperties::from_geometry(geometry);
        if section.thickness < MIN_THICKNESS || !section.zero_lift_alpha.is_finite() {
            return false;
        }
        *self = Self {
            section: Some(section),
            cancel: self.cancel,
            ..Self::default()
        };
        true
    }

    fn initialize_analysis(&mut self, parameters: &AnalysisParameters) -> bool {
        if self.section.is_none() {
            return false;
        }
        let finite = [
            parameters.reynolds,
            parameters.mach,
            parameters.critical_amplification,
            parameters.forced_transition_top,
            parameters.forced_transition_bottom,
        ]
        .iter()
        .all(|v| v.is_finite());
        let valid = finite
            && parameters.reynolds >= 0.0
            && (0.0..1.0).contains(&parameters.mach)
            && parameters.critical_amplification > 0.0
            && (0.0..=1.0).contains(&parameters.forced_transition_top)
            && (0.0..=1.0).contains(&parameters.forced_transition_bottom)
            && (!parameters.viscous || parameters.reynolds > 0.0);
        if !valid {
            return false;
        }

        self.parameters = Some(*parameters);
        self.inviscid_solved = false;
        self.boundary_layer_initialized = false;
        self.converged = false;
        true
    }

    fn set_specification_mode(&mut self, mode: SpecificationMode) {
        self.mode = Some(mode);
    }

    fn set_angle_of_attack(&mut self, alpha_rad: f64) {
        self.alpha = alpha_rad;
    }

    fn set_lift_coefficient_target(&mut self, cl: f64) {
        self.cl_target = cl;
    }

    fn set_freestream_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    fn solve_for_angle(&mut self) -> bool {
        self.solve_inviscid()
    }

    fn solve_for_lift_target(&mut self) -> bool {
        let (Some(section), Some(parameters)) = (self.section, self.parameters) else {
            return false;
        };
        let mach = Self::effective_mach(&parameters, self.cl_target);
        if !(0.0..1.0).contains(&mach) {
            return false;
        }
        let beta = (1.0 - mach * mach).sqrt();
        let alpha = section.zero_lift_alpha
            + self.cl_target * beta / (2.0 * PI * Self::lift_factor(&parameters));
        if !alpha.is_finite() || (alpha - section.zero_lift_alpha).abs() >= PI / 2.0 {
            return false;
        }
        self.alpha = alpha;
        self.solve_inviscid()
    }

    fn begin_viscous_pass(&mut self) -> bool {
        let (Some(_), Some(parameters)) = (self.section, self.parameters) else {
            return false;
        };
        if !self.inviscid_solved || self.cancel {
            return false;
        }

        self.wake = true;
        if !parameters.viscous {
            self.converged = true;
            self.state.converged = true;
            return true;
        }

        let rms = if self.boundary_layer_initialized {
            self.residuals.rms.max(WARM_START_RESIDUAL)
        } else {
            COLD_START_RESIDUAL
        };
        self.residuals = Residuals {
            rms,
            max: rms * MAX_TO_RMS_RATIO,
        };
        self.boundary_layer_initialized = true;
        self.converged = false;
        true
    }

    fn step_viscous_iteration(&mut self) -> bool {
        let (Some(section), Some(parameters)) = (self.section, self.parameters) else {
            return false;
        };
        if !self.inviscid_solved || !self.boundary_layer_initialized || self.cancel {
            return false;
        }

        self.steps_taken += 1;
        let rms = self.residuals.rms * self.contraction_rate(&section);
        self.residuals = Residuals {
            rms,
            max: rms * MAX_TO_RMS_RATIO,
        };

        if !rms.is_finite() || rms > DIVERGENCE_LIMIT {
            return false;
        }
        if rms < CONVERGENCE_TOLERANCE {
            self.converged = true;
            self.apply_viscous_solution(&section, &parameters);
        }
        true
    }

    fn finalize_viscous_step(&mut self) -> bool {
        self.residuals.rms.is_finite() && !self.cancel
    }

    fn finalize_pressure(&mut self) {
        if let Some(section) = self.section {
            let ratio = Self::peak_speed_ratio(&section, self.state.cl);
            self.cp_min = 1.0 - ratio * ratio;
        }
    }

    fn is_converged(&self) -> bool {
        self.converged
    }

    fn clear_convergence(&mut self) {
        self.converged = false;
        self.state.converged = false;
    }

    fn clear_wake(&mut self) {
        self.wake = false;
    }

    fn residuals(&self) -> Residuals {
        self.residuals
    }

    fn set_boundary_layer_initialized(&mut self, initialized: bool) {
        self.boundary_layer_initialized = initialized;
        if !initialized {
            self.inviscid_solved = false;
        }
    }

    fn read_state(&self) -> EngineState {
        self.state
    }
}

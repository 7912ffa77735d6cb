use super::config::AnalysisConfig;
use super::error::SolveError;
use super::extract::extract_result;
use super::outcome::ConvergenceOutcome;
use super::progress::{Progress, ProgressReporter};
use super::session::Session;
use crate::core::adapter::{AeroEngine, SpecificationMode};
use crate::core::result::OperatingPointResult;
use std::fmt;
use tracing::{debug, instrument, trace, warn};

/// Viscous passes attempted before a point is given up as [`ConvergenceOutcome::PassRejected`].
pub const MAX_PASS_ATTEMPTS: usize = 3;

/// Exactly one specification per solve: a fixed angle or a fixed lift coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperatingPointSpec {
    /// Angle of attack in radians.
    Angle(f64),
    LiftCoefficient(f64),
}

impl OperatingPointSpec {
    pub fn angle_deg(alpha_deg: f64) -> Self {
        OperatingPointSpec::Angle(alpha_deg.to_radians())
    }

    pub fn mode(&self) -> SpecificationMode {
        match self {
            OperatingPointSpec::Angle(_) => SpecificationMode::AngleFixed,
            OperatingPointSpec::LiftCoefficient(_) => SpecificationMode::LiftFixed,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            OperatingPointSpec::Angle(alpha) => alpha,
            OperatingPointSpec::LiftCoefficient(cl) => cl,
        }
    }

    /// The angle pushed to the engine before the inviscid stage (zero in lift mode).
    pub fn initial_alpha_rad(&self) -> f64 {
        match *self {
            OperatingPointSpec::Angle(alpha) => alpha,
            OperatingPointSpec::LiftCoefficient(_) => 0.0,
        }
    }

    pub(crate) fn check_finite(&self) -> Result<(), SolveError> {
        let value = self.value();
        if value.is_finite() {
            Ok(())
        } else {
            Err(SolveError::InvalidInput { value })
        }
    }
}

impl fmt::Display for OperatingPointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OperatingPointSpec::Angle(alpha) => write!(f, "alpha = {:.3} deg", alpha.to_degrees()),
            OperatingPointSpec::LiftCoefficient(cl) => write!(f, "CL = {cl:.4}"),
        }
    }
}

/// Solves one point at a fixed angle of attack (radians), starting from a fresh boundary layer.
pub fn solve_angle<E: AeroEngine>(
    session: &mut Session<E>,
    alpha_rad: f64,
    reporter: &ProgressReporter,
) -> Result<OperatingPointResult, SolveError> {
    solve_one(session, OperatingPointSpec::Angle(alpha_rad), reporter)
}

/// Solves one point for a target lift coefficient, starting from a fresh boundary layer.
pub fn solve_lift<E: AeroEngine>(
    session: &mut Session<E>,
    cl_target: f64,
    reporter: &ProgressReporter,
) -> Result<OperatingPointResult, SolveError> {
    solve_one(session, OperatingPointSpec::LiftCoefficient(cl_target), reporter)
}

/// Solves a single operating point.
///
/// A point whose inviscid stage rejects the specification yields a partial result; every
/// other failure to converge is returned as [`SolveError::Unconverged`].
#[instrument(skip_all, name = "solve_point", fields(spec = %spec))]
pub fn solve_one<E: AeroEngine>(
    session: &mut Session<E>,
    spec: OperatingPointSpec,
    reporter: &ProgressReporter,
) -> Result<OperatingPointResult, SolveError> {
    spec.check_finite()?;
    let (engine, config) = session.parts_mut();

    prepare(engine, spec, true);
    converge(engine, config, spec, reporter).into_result(spec)
}

/// Pushes the specification into the engine and clears per-point flags.
///
/// With `reset_boundary_layer` the next viscous pass starts from a fresh initial guess;
/// without it the previous point's boundary layer is reused as a warm start.
pub(crate) fn prepare<E: AeroEngine>(
    engine: &mut E,
    spec: OperatingPointSpec,
    reset_boundary_layer: bool,
) {
    engine.set_specification_mode(spec.mode());
    match spec {
        OperatingPointSpec::Angle(alpha) => engine.set_angle_of_attack(alpha),
        OperatingPointSpec::LiftCoefficient(cl) => {
            engine.set_angle_of_attack(0.0);
            engine.set_lift_coefficient_target(cl);
        }
    }
    engine.set_freestream_speed(1.0);
    engine.clear_wake();
    engine.clear_convergence();
    if reset_boundary_layer {
        engine.set_boundary_layer_initialized(false);
    }
}

/// Drives a prepared engine to convergence: inviscid stage, then viscous passes.
pub(crate) fn converge<E: AeroEngine>(
    engine: &mut E,
    config: &AnalysisConfig,
    spec: OperatingPointSpec,
    reporter: &ProgressReporter,
) -> ConvergenceOutcome {
    let inviscid_ok = match spec.mode() {
        SpecificationMode::AngleFixed => engine.solve_for_angle(),
        SpecificationMode::LiftFixed => engine.solve_for_lift_target(),
    };
    if !inviscid_ok {
        warn!(%spec, "Inviscid solution rejected the specification.");
        return ConvergenceOutcome::InvalidSpecification;
    }

    engine.clear_wake();
    engine.clear_convergence();

    for attempt in 1..=MAX_PASS_ATTEMPTS {
        match iterate(engine, config, reporter) {
            PassResult::Rejected => {
                debug!(attempt, "Viscous pass rejected; retrying.");
            }
            PassResult::Completed { iterations } => {
                debug!(iterations, "Viscous pass converged.");
                return ConvergenceOutcome::Converged(extract_result(engine));
            }
            PassResult::Fatal(outcome) => {
                warn!(%spec, ?outcome, "Operating point did not converge.");
                return outcome;
            }
        }
    }

    warn!(%spec, attempts = MAX_PASS_ATTEMPTS, "Engine refused every viscous pass.");
    ConvergenceOutcome::PassRejected {
        attempts: MAX_PASS_ATTEMPTS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PassResult {
    /// The pass gate refused to open; no progress was made.
    Rejected,
    Completed {
        iterations: usize,
    },
    Fatal(ConvergenceOutcome),
}

/// One viscous pass: bounded boundary-layer steps followed by finalization.
pub(crate) fn iterate<E: AeroEngine>(
    engine: &mut E,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> PassResult {
    if !engine.begin_viscous_pass() {
        engine.clear_convergence();
        return PassResult::Rejected;
    }

    let cap = config.max_iterations;
    let mut iterations = 0;
    let mut step_failed = false;

    while iterations < cap && !engine.is_converged() {
        if !engine.step_viscous_iteration() {
            step_failed = true;
            break;
        }
        iterations += 1;

        let residuals = engine.residuals();
        trace!(iteration = iterations, rms = residuals.rms, max = residuals.max);
        reporter.report(Progress::Residual {
            iteration: iterations,
            rms: residuals.rms,
            max: residuals.max,
        });
    }

    if !engine.finalize_viscous_step() {
        engine.clear_convergence();
        engine.set_boundary_layer_initialized(false);
        return PassResult::Fatal(ConvergenceOutcome::FinalizeFailed { iterations });
    }

    let converged = engine.is_converged();
    if !converged && config.auto_reinitialize_boundary_layer {
        engine.set_boundary_layer_initialized(false);
        reporter.report(Progress::Message(format!(
            "Boundary layer re-initialized after {iterations} iterations"
        )));
    }

    engine.finalize_pressure();

    match (converged, step_failed) {
        (true, _) => PassResult::Completed { iterations },
        (false, true) => PassResult::Fatal(ConvergenceOutcome::StepFailed { iterations }),
        (false, false) => PassResult::Fatal(ConvergenceOutcome::CapExceeded { iterations }),
    }
}
